//! Interactive playground window for editing and watching the light field

mod viewer;

pub use viewer::{InteractiveViewer, Selector, ViewerConfig, ViewerError};
