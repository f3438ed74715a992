//! Async host loop for a [`SplitPane`].
//!
//! [`run`] owns the component for the lifetime of a mount: it applies host
//! events from a channel, resolves the expand transition by timer when the
//! host never reports its end, and forwards collapsed-pane notifications.
//! Everything runs on the caller's task; the component is never shared.

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::time::sleep_until;

use crate::event::input::{from_crossterm, InputEvent};
use crate::geometry::Region;
use crate::observe::{ElementId, ObserveError, ObserverRegistry};
use crate::split::{Side, SplitPane};
use crate::storage::RatioStore;

/// Errors that stop the host loop.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("resize reported for an unregistered element: {0}")]
    Observe(#[from] ObserveError),
}

// ---------------------------------------------------------------------------
// HostEvent
// ---------------------------------------------------------------------------

/// Something the host tells the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Keyboard, pointer, touch or focus input.
    Input(InputEvent),
    /// An element's bounds changed.
    Resize { element: ElementId, bounds: Region },
    /// The host finished animating the expand transition.
    TransitionEnd,
    /// New value of the controlled `collapsed_pane` prop.
    CollapsedPaneProp(Option<Side>),
    /// Unmount the component and stop the loop.
    Teardown,
}

impl HostEvent {
    /// Convert a terminal event. A terminal resize becomes a resize of
    /// `container`, anchored at the origin.
    pub fn from_terminal(event: crossterm::event::Event, container: ElementId) -> Option<Self> {
        match event {
            crossterm::event::Event::Resize(width, height) => Some(HostEvent::Resize {
                element: container,
                bounds: Region::new(0, 0, i32::from(width), i32::from(height)),
            }),
            other => from_crossterm(other).map(HostEvent::Input),
        }
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Drive `pane` until [`HostEvent::Teardown`] arrives or `events` closes.
///
/// The pane must already be mounted in `registry`. On exit it is torn down.
/// A dropped `notifications` receiver is logged and otherwise ignored.
pub async fn run<S: RatioStore>(
    pane: &mut SplitPane<S>,
    registry: &mut ObserverRegistry,
    mut events: mpsc::Receiver<HostEvent>,
    notifications: mpsc::UnboundedSender<Option<Side>>,
) -> Result<(), DriverError> {
    tracing::debug!(key = %pane.props().storage_key, "split pane loop started");

    let result = loop {
        let deadline = pane.transition_deadline();
        let wake_at = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            event = events.recv() => match event {
                Some(HostEvent::Teardown) | None => break Ok(()),
                Some(event) => {
                    if let Err(err) = apply(pane, registry, event) {
                        break Err(err);
                    }
                }
            },
            _ = sleep_until(wake_at), if deadline.is_some() => {
                pane.tick(Instant::now());
            }
        }

        forward(pane, &notifications);
    };

    pane.teardown(registry);
    forward(pane, &notifications);
    tracing::debug!(key = %pane.props().storage_key, "split pane loop stopped");
    result
}

/// Apply a single host event.
pub fn apply<S: RatioStore>(
    pane: &mut SplitPane<S>,
    registry: &mut ObserverRegistry,
    event: HostEvent,
) -> Result<(), DriverError> {
    match event {
        HostEvent::Input(input) => {
            pane.handle_input(input);
        }
        HostEvent::Resize { element, bounds } => {
            for delivery in registry.report(element, bounds)? {
                pane.handle_resize(&delivery);
            }
        }
        HostEvent::TransitionEnd => {
            pane.on_transition_end();
        }
        HostEvent::CollapsedPaneProp(prop) => {
            pane.set_collapsed_pane(prop);
        }
        HostEvent::Teardown => pane.teardown(registry),
    }
    Ok(())
}

fn forward<S: RatioStore>(pane: &mut SplitPane<S>, notifications: &mpsc::UnboundedSender<Option<Side>>) {
    for payload in pane.take_notifications() {
        if notifications.send(payload).is_err() {
            tracing::debug!("collapsed pane receiver dropped");
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
