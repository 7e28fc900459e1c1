//! Keyboard aggregate: decoded keys plus board-level metadata.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BACKGROUND_COLOR;
use crate::models::{Key, RgbColor};

/// A fully decoded layout.
///
/// Built empty, filled by a single decoder pass, then treated as read-only by
/// everything downstream (material and mesh builders, the CLI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyboard {
    /// Layout name (`name` metadata)
    pub name: Option<String>,
    /// Layout author (`author` metadata)
    pub author: Option<String>,
    /// Board background color (`backcolor` metadata)
    pub background_color: String,
    /// Switch type (`switchType` metadata, e.g. "MX1A-11Nx")
    pub switch_type: Option<String>,
    /// Switch mount (`switchMount` metadata, e.g. "cherry")
    pub switch_mount: Option<String>,
    /// Switch brand (`switchBrand` metadata)
    pub switch_brand: Option<String>,
    /// Custom CSS (`css` metadata)
    pub css: Option<String>,
    /// Free-text notes (`notes` metadata), kept verbatim
    pub notes: Option<String>,
    /// Backlight color from the `led_color` notes directive
    pub led_color: Option<String>,
    /// Backlight brightness 0.0-1.0 from the `led_brightness` notes directive
    pub led_brightness: Option<f64>,
    /// Keys in document order
    pub keys: Vec<Key>,
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    /// Creates an empty keyboard with default metadata.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            author: None,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            switch_type: None,
            switch_mount: None,
            switch_brand: None,
            css: None,
            notes: None,
            led_color: None,
            led_brightness: None,
            keys: Vec::new(),
        }
    }

    /// Adds a key.
    pub fn add_key(&mut self, key: Key) {
        self.keys.push(key);
    }

    /// Gets the total number of keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of rows that produced at least one key.
    #[must_use]
    pub fn row_count(&self) -> usize {
        // row indices are non-decreasing, so counting changes is enough
        let mut rows: Vec<usize> = self.keys.iter().map(|key| key.row).collect();
        rows.dedup();
        rows.len()
    }

    /// Keys emitted by one row, in column order.
    pub fn keys_in_row(&self, row: usize) -> impl Iterator<Item = &Key> {
        self.keys.iter().filter(move |key| key.row == row)
    }

    /// Bounding extent `(width, height)` of the unrotated key rectangles.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        self.keys.iter().fold((0.0_f64, 0.0_f64), |(w, h), key| {
            (w.max(key.x + key.width), h.max(key.y + key.height))
        })
    }

    /// Parses the backlight color, if one was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored color is not a hex color. Colors set by
    /// the notes directive always parse.
    pub fn led_rgb(&self) -> Result<Option<RgbColor>> {
        self.led_color
            .as_deref()
            .map(RgbColor::from_hex)
            .transpose()
    }
}
