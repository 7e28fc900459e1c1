//! Builds [`Key`] values from resolved properties and a legend string.

use crate::constants::LABEL_SLOTS;
use crate::models::{Key, Label};
use crate::parser::context::KeyProps;

/// Position of a key within the document being decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Row index
    pub row: usize,
    /// Column index within the row
    pub column: usize,
    /// Cursor x when the key is placed
    pub x: f64,
    /// Cursor y when the key is placed
    pub y: f64,
}

/// Splits a legend into its nine grid slots.
///
/// Lines map row-major onto the 3x3 grid. Missing lines become empty slots and
/// lines past the ninth are dropped.
#[must_use]
pub fn split_legend(legend: &str) -> [String; LABEL_SLOTS] {
    let mut lines = legend.split('\n');
    std::array::from_fn(|_| lines.next().map(str::to_string).unwrap_or_default())
}

/// Resolves the font size of one slot.
///
/// A numeric `fa` entry wins as-is (zero included); an explicit `null` entry
/// means "no size"; otherwise the key's default size applies.
fn slot_size(props: &KeyProps, slot: usize) -> Option<f64> {
    match props.font_sizes.get(slot) {
        Some(entry) => *entry,
        None => Some(props.font_size),
    }
}

/// Creates one key. Colors are copied verbatim; nothing here validates them.
#[must_use]
pub fn build_key(legend: &str, props: &KeyProps, placement: Placement) -> Key {
    let mut texts = split_legend(legend);
    let labels = std::array::from_fn(|slot| Label {
        text: std::mem::take(&mut texts[slot]),
        size: slot_size(props, slot),
        slot,
    });

    Key {
        legend: legend.to_string(),
        row: placement.row,
        column: placement.column,
        x: placement.x,
        y: placement.y,
        width: props.width,
        height: props.height,
        rotation: props.rotation,
        rotation_x: props.rotation_x,
        rotation_y: props.rotation_y,
        color: props.color.clone(),
        text_color: props.text_color.clone(),
        font_size: props.font_size,
        secondary_font_size: props.secondary_font_size,
        font_sizes: props.font_sizes.clone(),
        alignment: props.alignment,
        profile_hint: props.profile.clone(),
        ghost: props.ghost,
        decal: props.decal,
        nub: props.nub,
        stepped: props.stepped,
        labels,
    }
}
