//! Data models for decoded keyboard layouts.
//!
//! These are the types handed to downstream consumers once a layout document
//! has been decoded. Models are independent of the parser and the CLI.

pub mod key;
pub mod keyboard;
pub mod rgb;

// Re-export all model types
pub use key::{IconFamily, Key, Label, LabelIcon, Profile};
pub use keyboard::Keyboard;
pub use rgb::RgbColor;
