//! Clickable buttons
//!
//! - registry: the ordered, immutable set of buttons with hit-testing and playback
//! - layout: the rule that turns sprite sizes into non-overlapping rectangles

pub mod layout;
pub mod registry;

pub use layout::ColumnLayout;
pub use registry::{Button, ButtonRegistry, RegistryBuilder, RegistryError};
