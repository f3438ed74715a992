//! Split pane props: required minimums and storage key, optional behaviour.

use std::time::Duration;

use super::Side;

/// Width of a collapsed pane when none is configured.
pub const DEFAULT_COLLAPSED_WIDTH: i32 = 24;

/// Duration of the expand transition when none is configured.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(200);

/// Invalid prop combinations, reported by [`SplitPaneProps::validate`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PropsError {
    #[error("{side} minimum width must not be negative (got {value})")]
    NegativeMinimum { side: Side, value: i32 },
    #[error("storage key must not be empty")]
    EmptyStorageKey,
    #[error("collapsed width must be positive (got {0})")]
    InvalidCollapsedWidth(i32),
    #[error("keyboard step must be positive (got {0})")]
    InvalidKeyboardStep(i32),
}

// ---------------------------------------------------------------------------
// SplitPaneProps
// ---------------------------------------------------------------------------

/// Configuration for a [`SplitPane`](super::SplitPane).
///
/// The constructor takes the required props; everything else has a default
/// and a builder method.
///
/// # Examples
///
/// ```ignore
/// let props = SplitPaneProps::new(20, 30, "editor.sidebar")
///     .with_collapsible_pane(Some(Side::Left))
///     .with_collapsed_width(3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPaneProps {
    /// Minimum width of the left pane.
    pub left_min: i32,
    /// Minimum width of the right pane.
    pub right_min: i32,
    /// Key the split ratio is persisted under.
    pub storage_key: String,
    /// Draw the grip on the separator when dragging is possible.
    pub show_resize_indicator: bool,
    /// Width of a collapsed pane.
    pub collapsed_width: i32,
    /// Externally controlled collapsed pane. `Some(..)` at construction puts
    /// the component in controlled mode; see [`CollapseMode`](super::CollapseMode).
    pub collapsed_pane: Option<Option<Side>>,
    /// The pane that gets a collapse affordance, if any.
    pub collapsible_pane: Option<Side>,
    /// Separator movement per keyboard nudge.
    pub keyboard_step: i32,
    /// How long the expand transition lasts when resolved by timer.
    pub transition_duration: Duration,
}

impl SplitPaneProps {
    /// Create props with the required values and defaults for the rest.
    pub fn new(left_min: i32, right_min: i32, storage_key: impl Into<String>) -> Self {
        Self {
            left_min,
            right_min,
            storage_key: storage_key.into(),
            show_resize_indicator: true,
            collapsed_width: DEFAULT_COLLAPSED_WIDTH,
            collapsed_pane: None,
            collapsible_pane: None,
            keyboard_step: 1,
            transition_duration: DEFAULT_TRANSITION,
        }
    }

    /// Show or hide the separator grip (builder).
    pub fn with_resize_indicator(mut self, show: bool) -> Self {
        self.show_resize_indicator = show;
        self
    }

    /// Set the collapsed pane width (builder).
    pub fn with_collapsed_width(mut self, width: i32) -> Self {
        self.collapsed_width = width;
        self
    }

    /// Control the collapsed pane from outside (builder).
    ///
    /// Passing `None` still makes the component controlled, with no pane
    /// collapsed initially.
    pub fn with_collapsed_pane(mut self, pane: Option<Side>) -> Self {
        self.collapsed_pane = Some(pane);
        self
    }

    /// Enable the collapse affordance on one pane (builder).
    pub fn with_collapsible_pane(mut self, pane: Option<Side>) -> Self {
        self.collapsible_pane = pane;
        self
    }

    /// Set the keyboard nudge step (builder).
    pub fn with_keyboard_step(mut self, step: i32) -> Self {
        self.keyboard_step = step;
        self
    }

    /// Set the expand transition duration (builder).
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// The minimum width configured for `side`.
    pub fn min_for(&self, side: Side) -> i32 {
        match side {
            Side::Left => self.left_min,
            Side::Right => self.right_min,
        }
    }

    /// The pane whose height is observed: the one opposite the collapsible
    /// pane, or the right pane when nothing is collapsible.
    pub fn observed_pane(&self) -> Side {
        self.collapsible_pane
            .map(Side::opposite)
            .unwrap_or(Side::Right)
    }

    /// Check the props for values no layout could honour.
    ///
    /// Minimums that merely exceed the current container width are not an
    /// error: that condition disables dragging at runtime instead.
    pub fn validate(&self) -> Result<(), PropsError> {
        for side in [Side::Left, Side::Right] {
            let value = self.min_for(side);
            if value < 0 {
                return Err(PropsError::NegativeMinimum { side, value });
            }
        }
        if self.storage_key.trim().is_empty() {
            return Err(PropsError::EmptyStorageKey);
        }
        if self.collapsed_width <= 0 {
            return Err(PropsError::InvalidCollapsedWidth(self.collapsed_width));
        }
        if self.keyboard_step <= 0 {
            return Err(PropsError::InvalidKeyboardStep(self.keyboard_step));
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = SplitPaneProps::new(300, 300, "split");
        assert!(p.show_resize_indicator);
        assert_eq!(p.collapsed_width, 24);
        assert_eq!(p.collapsed_pane, None);
        assert_eq!(p.collapsible_pane, None);
        assert_eq!(p.keyboard_step, 1);
        assert_eq!(p.transition_duration, Duration::from_millis(200));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn builders_chain() {
        let p = SplitPaneProps::new(1, 2, "k")
            .with_resize_indicator(false)
            .with_collapsed_width(3)
            .with_collapsed_pane(Some(Side::Right))
            .with_collapsible_pane(Some(Side::Right))
            .with_keyboard_step(5)
            .with_transition_duration(Duration::from_millis(10));
        assert!(!p.show_resize_indicator);
        assert_eq!(p.collapsed_width, 3);
        assert_eq!(p.collapsed_pane, Some(Some(Side::Right)));
        assert_eq!(p.keyboard_step, 5);
        assert_eq!(p.transition_duration, Duration::from_millis(10));
    }

    #[test]
    fn controlled_with_none_is_still_controlled() {
        let p = SplitPaneProps::new(1, 1, "k").with_collapsed_pane(None);
        assert_eq!(p.collapsed_pane, Some(None));
    }

    #[test]
    fn observed_pane_is_opposite_of_collapsible() {
        let base = SplitPaneProps::new(1, 1, "k");
        assert_eq!(base.observed_pane(), Side::Right);
        assert_eq!(
            base.clone().with_collapsible_pane(Some(Side::Right)).observed_pane(),
            Side::Left
        );
        assert_eq!(
            base.with_collapsible_pane(Some(Side::Left)).observed_pane(),
            Side::Right
        );
    }

    #[test]
    fn negative_minimum_is_rejected() {
        let err = SplitPaneProps::new(10, -1, "k").validate().unwrap_err();
        assert_eq!(
            err,
            PropsError::NegativeMinimum {
                side: Side::Right,
                value: -1
            }
        );
        assert_eq!(err.to_string(), "right minimum width must not be negative (got -1)");
    }

    #[test]
    fn blank_storage_key_is_rejected() {
        assert_eq!(
            SplitPaneProps::new(1, 1, "  ").validate(),
            Err(PropsError::EmptyStorageKey)
        );
    }

    #[test]
    fn collapsed_width_and_step_must_be_positive() {
        assert_eq!(
            SplitPaneProps::new(1, 1, "k").with_collapsed_width(0).validate(),
            Err(PropsError::InvalidCollapsedWidth(0))
        );
        assert_eq!(
            SplitPaneProps::new(1, 1, "k").with_keyboard_step(0).validate(),
            Err(PropsError::InvalidKeyboardStep(0))
        );
    }

    #[test]
    fn oversized_minimums_are_not_a_props_error() {
        assert!(SplitPaneProps::new(5000, 5000, "k").validate().is_ok());
    }
}
