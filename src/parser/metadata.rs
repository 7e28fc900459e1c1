//! Keyboard-level metadata objects and the notes directives inside them.
//!
//! A metadata object can appear anywhere in the document. Each one is applied
//! on its own: recognized keys overwrite earlier values, unknown keys are
//! ignored.
//!
//! The `notes` text may carry two backlight directives, anywhere and in any
//! case:
//!
//! ```text
//! led_color: #RRGGBB
//! led_brightness: 0.75
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::models::Keyboard;

static LED_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)led_color\s*:\s*#([0-9a-f]{6})").expect("led_color pattern is valid")
});

static LED_BRIGHTNESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)led_brightness\s*:\s*(1(?:\.0+)?|0(?:\.[0-9]+)?)")
        .expect("led_brightness pattern is valid")
});

/// Recognized keys of a metadata object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct KeyboardMetadata {
    /// Background color
    pub backcolor: Option<String>,
    /// Layout name
    pub name: Option<String>,
    /// Author
    pub author: Option<String>,
    /// Switch type
    #[serde(rename = "switchType")]
    pub switch_type: Option<String>,
    /// Switch mount
    #[serde(rename = "switchMount")]
    pub switch_mount: Option<String>,
    /// Switch brand
    #[serde(rename = "switchBrand")]
    pub switch_brand: Option<String>,
    /// Custom CSS
    pub css: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

/// Backlight settings found in a notes string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedDirectives {
    /// `#` followed by the six captured digits, case preserved
    pub color: Option<String>,
    /// Parsed brightness
    pub brightness: Option<f64>,
}

/// Scans notes text for the two LED directives.
///
/// The scans are independent; either, both or neither may match. Surrounding
/// text is ignored.
#[must_use]
pub fn extract_led_directives(notes: &str) -> LedDirectives {
    let color = LED_COLOR
        .captures(notes)
        .and_then(|captures| captures.get(1))
        .map(|digits| format!("#{}", digits.as_str()));

    // the pattern only admits numbers, but a failed parse is still just "no directive"
    let brightness = LED_BRIGHTNESS
        .captures(notes)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse::<f64>().ok());

    LedDirectives { color, brightness }
}

/// Applies one metadata object to the keyboard, last write wins.
pub fn apply_metadata(keyboard: &mut Keyboard, metadata: KeyboardMetadata) {
    if let Some(backcolor) = metadata.backcolor {
        keyboard.background_color = backcolor;
    }
    if let Some(name) = metadata.name {
        keyboard.name = Some(name);
    }
    if let Some(author) = metadata.author {
        keyboard.author = Some(author);
    }
    if let Some(switch_type) = metadata.switch_type {
        keyboard.switch_type = Some(switch_type);
    }
    if let Some(switch_mount) = metadata.switch_mount {
        keyboard.switch_mount = Some(switch_mount);
    }
    if let Some(switch_brand) = metadata.switch_brand {
        keyboard.switch_brand = Some(switch_brand);
    }
    if let Some(css) = metadata.css {
        keyboard.css = Some(css);
    }
    if let Some(notes) = metadata.notes {
        apply_led_directives(keyboard, &notes);
        keyboard.notes = Some(notes);
    }
}

/// Sets the keyboard's LED fields from any directives in `notes`.
///
/// Fields without a matching directive keep their previous value.
pub fn apply_led_directives(keyboard: &mut Keyboard, notes: &str) {
    if notes.is_empty() {
        return;
    }

    let directives = extract_led_directives(notes);
    if let Some(color) = directives.color {
        keyboard.led_color = Some(color);
    }
    if let Some(brightness) = directives.brightness {
        keyboard.led_brightness = Some(brightness);
    }
}
