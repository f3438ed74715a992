//! Widget system: the trait every slot content and the split pane implement.

pub mod traits;

pub use traits::Widget;
