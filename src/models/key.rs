//! Resolved key definitions produced by the layout decoder.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALIGNMENT, DEFAULT_FONT_SIZE, DEFAULT_KEY_COLOR, DEFAULT_KEY_SIZE, DEFAULT_TEXT_COLOR,
    LABEL_SLOTS,
};
use crate::models::RgbColor;

/// Inline icon tag recognized in label text: `<i class="fa fa-NAME"></i>`.
static ICON_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<i class=['"](fa|kb) (fa|kb)-([a-zA-Z0-9\-]+)['"]></i>$"#)
        .expect("icon tag pattern is valid")
});

/// Icon font family referenced by an icon tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconFamily {
    /// Font Awesome (`fa`)
    FontAwesome,
    /// Keyboard webfont (`kb`)
    KeyboardWebfont,
}

impl IconFamily {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "fa" => Some(Self::FontAwesome),
            "kb" => Some(Self::KeyboardWebfont),
            _ => None,
        }
    }

    /// Short class prefix used in the tag (`fa` or `kb`).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::FontAwesome => "fa",
            Self::KeyboardWebfont => "kb",
        }
    }
}

/// Icon reference parsed out of a label's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelIcon {
    /// Icon family
    pub family: IconFamily,
    /// Icon name without the family prefix (e.g. "windows")
    pub name: String,
}

/// One legend slot on a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Slot text as written in the legend (may be empty or an icon tag)
    pub text: String,
    /// Font size for this slot.
    ///
    /// `None` means the per-slot override array held an explicit empty entry;
    /// `Some(0.0)` is forwarded the same way. Renderers decide what to draw.
    pub size: Option<f64>,
    /// Grid position 0-8, row-major
    pub slot: usize,
}

impl Label {
    /// Returns true if the slot carries no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Parses the text as an icon tag.
    ///
    /// Only the exact `<i class="fa fa-NAME"></i>` / `<i class="kb kb-NAME"></i>`
    /// shapes are recognized; anything else is plain text.
    #[must_use]
    pub fn icon(&self) -> Option<LabelIcon> {
        let captures = ICON_TAG.captures(&self.text)?;
        let family = IconFamily::from_prefix(captures.get(1)?.as_str())?;
        Some(LabelIcon {
            family,
            name: captures.get(3)?.as_str().to_string(),
        })
    }
}

/// Keycap profile derived from the `p` style hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Profile {
    /// DCS (also used for unknown or empty hints)
    #[default]
    Dcs,
    /// DSA
    Dsa,
    /// SA
    Sa,
    /// DSS
    Dss,
}

impl Profile {
    /// Interprets a raw profile hint such as `"DSA"` or `"SA R3"`.
    ///
    /// Matching is on the first word, case-insensitive. Anything unrecognized
    /// falls back to DCS.
    #[must_use]
    pub fn from_hint(hint: &str) -> Self {
        let family = hint.split_whitespace().next().unwrap_or_default();
        match family.to_ascii_uppercase().as_str() {
            "DSA" => Self::Dsa,
            "SA" => Self::Sa,
            "DSS" => Self::Dss,
            _ => Self::Dcs,
        }
    }

    /// Legend inset from the key edges as `[left, top, right, bottom]` in key units.
    ///
    /// DSS has no fixed inset.
    #[must_use]
    pub const fn label_margins(self) -> Option<[f64; 4]> {
        match self {
            Self::Dcs => Some([0.25, 0.05, 0.25, 0.25]),
            Self::Dsa => Some([0.25, 0.15, 0.25, 0.2]),
            Self::Sa => Some([0.25, 0.2, 0.25, 0.2]),
            Self::Dss => None,
        }
    }
}

/// One key (or decal) with every property resolved.
///
/// Coordinates are in layout units with the origin at the top-left of the
/// board; 1.0 is the width of a standard key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Raw legend text as received (slots separated by newlines)
    pub legend: String,
    /// Row index (counts row arrays only)
    pub row: usize,
    /// Emission order within the row
    pub column: usize,
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width (default 1.0)
    pub width: f64,
    /// Height (default 1.0)
    pub height: f64,
    /// Rotation in degrees, clockwise
    pub rotation: f64,
    /// Rotation origin x
    pub rotation_x: f64,
    /// Rotation origin y.
    ///
    /// `ry` persists, so this reports the last recorded origin even on keys
    /// whose own rotation is zero.
    pub rotation_y: f64,
    /// Keycap color, passed through unvalidated
    pub color: String,
    /// Legend color, passed through unvalidated
    pub text_color: String,
    /// Default legend font size
    pub font_size: f64,
    /// Secondary legend font size (`f2`), if one is in effect
    pub secondary_font_size: Option<f64>,
    /// Per-slot font size overrides (`fa`), empty when none were given
    pub font_sizes: Vec<Option<f64>>,
    /// Legend alignment flags (`a`)
    pub alignment: u8,
    /// Raw profile hint (`p`)
    pub profile_hint: String,
    /// Ghosted key (drawn translucent by the editor)
    pub ghost: bool,
    /// Decal: visual only, not a switch
    pub decal: bool,
    /// Homing nub
    pub nub: bool,
    /// Stepped keycap
    pub stepped: bool,
    /// Legend slots, always nine
    pub labels: [Label; LABEL_SLOTS],
}

impl Key {
    /// Creates an unrotated 1u key at the given position with empty labels.
    #[must_use]
    pub fn new(legend: impl Into<String>, row: usize, column: usize, x: f64, y: f64) -> Self {
        Self {
            legend: legend.into(),
            row,
            column,
            x,
            y,
            width: DEFAULT_KEY_SIZE,
            height: DEFAULT_KEY_SIZE,
            rotation: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            color: DEFAULT_KEY_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            secondary_font_size: None,
            font_sizes: Vec::new(),
            alignment: DEFAULT_ALIGNMENT,
            profile_hint: String::new(),
            ghost: false,
            decal: false,
            nub: false,
            stepped: false,
            labels: std::array::from_fn(|slot| Label {
                text: String::new(),
                size: Some(DEFAULT_FONT_SIZE),
                slot,
            }),
        }
    }

    /// Gets the label in a slot (0-8).
    #[must_use]
    pub fn label(&self, slot: usize) -> Option<&Label> {
        self.labels.get(slot)
    }

    /// Iterates over the slots that carry text.
    pub fn non_empty_labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(|label| !label.is_empty())
    }

    /// Returns true if the key has a non-zero rotation.
    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }

    /// Typed view of the profile hint.
    #[must_use]
    pub fn profile(&self) -> Profile {
        Profile::from_hint(&self.profile_hint)
    }

    /// Parses the keycap color.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored color is not a hex color.
    pub fn color_rgb(&self) -> Result<RgbColor> {
        RgbColor::from_hex(&self.color)
    }

    /// Parses the legend color.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored color is not a hex color.
    pub fn text_color_rgb(&self) -> Result<RgbColor> {
        RgbColor::from_hex(&self.text_color)
    }
}
