//! Application-wide constants.
//!
//! This module defines the application name and the property defaults that the
//! layout editor assumes for every key in a Raw document.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "KLE Keycaps";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "kle-keycaps";

/// Number of legend slots on every key (3x3 grid, row-major).
pub const LABEL_SLOTS: usize = 9;

/// Keycap color used when no `c` property is in effect.
pub const DEFAULT_KEY_COLOR: &str = "#cccccc";

/// Legend color used when no `t` property is in effect.
pub const DEFAULT_TEXT_COLOR: &str = "#111111";

/// Keyboard background color used when no `backcolor` metadata is present.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#eeeeee";

/// Legend font size used when no `f` property is in effect.
pub const DEFAULT_FONT_SIZE: f64 = 3.0;

/// Legend alignment flags used when no `a` property is in effect.
pub const DEFAULT_ALIGNMENT: u8 = 4;

/// Width and height of a key in layout units.
pub const DEFAULT_KEY_SIZE: f64 = 1.0;
