//! Decoding of keyboard-layout-editor Raw documents.
//!
//! The pipeline is: [`kle`] walks the document and its rows, [`context`]
//! resolves the inherited key properties, [`key_factory`] builds each key and
//! [`metadata`] handles keyboard-level objects and their notes directives.

pub mod context;
pub mod error;
pub mod key_factory;
pub mod kle;
pub mod metadata;

// Re-export commonly used items
pub use context::RotationMode;
pub use error::{Location, ParseError};
pub use kle::{
    parse_kle_bytes, parse_kle_file, parse_kle_file_with, parse_kle_str, parse_kle_str_with,
    parse_kle_value, ParseOptions,
};
