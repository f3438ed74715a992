//! Key binding registry and resolution.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to [`SplitAction`]s.
//! The `with_defaults()` constructor installs the standard split pane
//! bindings (Escape cancels a drag, arrows nudge the separator, Enter toggles
//! the collapsible pane).

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// SplitAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitAction {
    /// Abort the drag in progress, discarding its delta.
    CancelDrag,
    /// Move the separator left by the keyboard step.
    NudgeLeft,
    /// Move the separator right by the keyboard step.
    NudgeRight,
    /// Collapse or expand the collapsible pane.
    ToggleCollapse,
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> SplitAction.
#[derive(Debug, Clone)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), SplitAction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a registry with the standard split pane bindings.
    ///
    /// Defaults:
    /// - `Escape` -> CancelDrag
    /// - `Left` -> NudgeLeft
    /// - `Right` -> NudgeRight
    /// - `Enter` -> ToggleCollapse
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Escape, Modifiers::NONE, SplitAction::CancelDrag);
        registry.bind(Key::Left, Modifiers::NONE, SplitAction::NudgeLeft);
        registry.bind(Key::Right, Modifiers::NONE, SplitAction::NudgeRight);
        registry.bind(Key::Enter, Modifiers::NONE, SplitAction::ToggleCollapse);
        registry
    }

    /// Register a key binding.
    ///
    /// If a binding already exists for this key+modifier combination, it is replaced.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: SplitAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Look up the action for a given key event (exact key + modifiers match).
    pub fn resolve(&self, event: &KeyEvent) -> Option<SplitAction> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
