//! Built-in slot content widgets.

pub mod static_widget;

pub use static_widget::Static;
