//! Event system: input normalisation, messages, key bindings, listeners.

pub mod binding;
pub mod handler;
pub mod input;
pub mod listeners;
pub mod message;

pub use binding::{KeyBindingRegistry, SplitAction};
pub use handler::EventDispatcher;
pub use input::{
    from_crossterm, InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent,
    PointerEvent, PointerKind, PointerPhase, TouchEvent, TouchPhase,
};
pub use listeners::{GlobalListener, ListenerChange, ListenerSet};
pub use message::{CollapsedPaneChanged, Envelope, Message};
