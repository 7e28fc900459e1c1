//! KLE Keycaps Library
//!
//! Decodes keyboard-layout-editor "Raw" documents into a resolved keyboard
//! model: every key's position, size, rotation, legends and colors, plus
//! board-level metadata and backlight settings taken from the notes.
//!
//! ```
//! use kle_keycaps::parser::parse_kle_str;
//!
//! let keyboard = parse_kle_str(r#"[["Q","W"],[{"x":0.25},"A","S"]]"#).unwrap();
//! assert_eq!(keyboard.key_count(), 4);
//! assert_eq!(keyboard.keys[2].x, 0.25);
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
