//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a mounted [`SplitPane`](crate::split::SplitPane)
//! without a real terminal or host. Use [`render_to_string`] and related helpers
//! to capture widget output as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::{Pilot, PilotError};
pub use snapshot::{render_to_string, strips_to_string};
