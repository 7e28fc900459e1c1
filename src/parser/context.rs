//! Property inheritance for key tokens.
//!
//! Every key's properties come from three layers, lowest to highest:
//!
//! 1. the editor defaults,
//! 2. the [`StyleContext`] carried across keys and rows,
//! 3. the [`KeyModifier`] objects placed directly before the key.
//!
//! [`resolve_props`] is the only place the layers are combined.

use clap::ValueEnum;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{
    DEFAULT_ALIGNMENT, DEFAULT_FONT_SIZE, DEFAULT_KEY_COLOR, DEFAULT_KEY_SIZE, DEFAULT_TEXT_COLOR,
};

/// How rotation properties behave after the key that declared them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum RotationMode {
    /// `r` and `rx` apply to the next key only
    #[default]
    PerKey,
    /// `r` and `rx` stay in effect until overwritten, like the editor itself
    Carried,
}

/// A modifier object from a row, e.g. `{"w": 1.5, "c": "#444444"}`.
///
/// Unknown keys are ignored. A recognized key with a value of the wrong JSON
/// type fails deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KeyModifier {
    /// Keycap color
    #[serde(rename = "c")]
    pub color: Option<String>,
    /// Legend color
    #[serde(rename = "t")]
    pub text_color: Option<String>,
    /// Ghosted key
    #[serde(rename = "g")]
    pub ghost: Option<bool>,
    /// Legend alignment flags
    #[serde(rename = "a", default, deserialize_with = "deserialize_alignment")]
    pub alignment: Option<u8>,
    /// Default legend size
    #[serde(rename = "f")]
    pub font_size: Option<f64>,
    /// Secondary legend size
    #[serde(rename = "f2")]
    pub secondary_font_size: Option<f64>,
    /// Per-slot legend sizes
    #[serde(rename = "fa")]
    pub font_sizes: Option<Vec<Option<f64>>>,
    /// Profile hint
    #[serde(rename = "p")]
    pub profile: Option<String>,
    /// Width
    #[serde(rename = "w")]
    pub width: Option<f64>,
    /// Height
    #[serde(rename = "h")]
    pub height: Option<f64>,
    /// Cursor x offset
    pub x: Option<f64>,
    /// Cursor y offset
    pub y: Option<f64>,
    /// Rotation angle
    #[serde(rename = "r")]
    pub rotation: Option<f64>,
    /// Rotation origin x
    #[serde(rename = "rx")]
    pub rotation_x: Option<f64>,
    /// Rotation origin y
    #[serde(rename = "ry")]
    pub rotation_y: Option<f64>,
    /// Decal
    #[serde(rename = "d")]
    pub decal: Option<bool>,
    /// Homing nub
    #[serde(rename = "n")]
    pub nub: Option<bool>,
    /// Stepped keycap
    #[serde(rename = "l")]
    pub stepped: Option<bool>,
}

/// Reads `a` from any whole number, so `7` and `7.0` (as some JSON5 readers
/// produce) both work.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn deserialize_alignment<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(|value| {
            if value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value) {
                Ok(value as u8)
            } else {
                Err(D::Error::custom(format!(
                    "alignment must be a whole number 0-255, got {value}"
                )))
            }
        })
        .transpose()
}

impl KeyModifier {
    /// Folds a later modifier into this one; fields set in `later` win.
    pub fn merge(&mut self, later: Self) {
        fn take<T>(slot: &mut Option<T>, later: Option<T>) {
            if later.is_some() {
                *slot = later;
            }
        }

        take(&mut self.color, later.color);
        take(&mut self.text_color, later.text_color);
        take(&mut self.ghost, later.ghost);
        take(&mut self.alignment, later.alignment);
        take(&mut self.font_size, later.font_size);
        take(&mut self.secondary_font_size, later.secondary_font_size);
        take(&mut self.font_sizes, later.font_sizes);
        take(&mut self.profile, later.profile);
        take(&mut self.width, later.width);
        take(&mut self.height, later.height);
        take(&mut self.x, later.x);
        take(&mut self.y, later.y);
        take(&mut self.rotation, later.rotation);
        take(&mut self.rotation_x, later.rotation_x);
        take(&mut self.rotation_y, later.rotation_y);
        take(&mut self.decal, later.decal);
        take(&mut self.nub, later.nub);
        take(&mut self.stepped, later.stepped);
    }

    /// Returns true if the modifier repositions the rotation baseline.
    #[must_use]
    pub const fn sets_rotation(&self) -> bool {
        self.rotation.is_some() || self.rotation_x.is_some()
    }
}

/// Properties carried from key to key and row to row until overwritten.
///
/// One value lives per decoder invocation and is replaced, not shared, on
/// every update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleContext {
    /// Keycap color
    pub color: Option<String>,
    /// Legend color
    pub text_color: Option<String>,
    /// Ghosted keys
    pub ghost: Option<bool>,
    /// Legend alignment flags
    pub alignment: Option<u8>,
    /// Default legend size
    pub font_size: Option<f64>,
    /// Secondary legend size
    pub secondary_font_size: Option<f64>,
    /// Profile hint
    pub profile: Option<String>,
    /// Recorded rotation origin y
    pub rotation_y: Option<f64>,
    /// Rotation angle (only carried in [`RotationMode::Carried`])
    pub rotation: Option<f64>,
    /// Rotation origin x (only carried in [`RotationMode::Carried`])
    pub rotation_x: Option<f64>,
}

impl StyleContext {
    /// Returns the context that follows `modifier`.
    ///
    /// Copies the carried subset of the modifier. A rotation (`r` or `rx`)
    /// without an `ry` anywhere records an origin of 0.
    #[must_use]
    pub fn absorb(&self, modifier: &KeyModifier, mode: RotationMode) -> Self {
        let mut next = self.clone();

        if let Some(color) = &modifier.color {
            next.color = Some(color.clone());
        }
        if let Some(text_color) = &modifier.text_color {
            next.text_color = Some(text_color.clone());
        }
        if let Some(profile) = &modifier.profile {
            next.profile = Some(profile.clone());
        }
        next.ghost = modifier.ghost.or(next.ghost);
        next.alignment = modifier.alignment.or(next.alignment);
        next.font_size = modifier.font_size.or(next.font_size);
        next.secondary_font_size = modifier.secondary_font_size.or(next.secondary_font_size);

        if mode == RotationMode::Carried {
            next.rotation = modifier.rotation.or(next.rotation);
            next.rotation_x = modifier.rotation_x.or(next.rotation_x);
        }

        if let Some(ry) = modifier.rotation_y {
            next.rotation_y = Some(ry);
        } else if modifier.sets_rotation() && next.rotation_y.is_none() {
            next.rotation_y = Some(0.0);
        }

        next
    }
}

/// Fully resolved properties for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyProps {
    /// Keycap color
    pub color: String,
    /// Legend color
    pub text_color: String,
    /// Ghosted key
    pub ghost: bool,
    /// Legend alignment flags
    pub alignment: u8,
    /// Default legend size
    pub font_size: f64,
    /// Secondary legend size
    pub secondary_font_size: Option<f64>,
    /// Per-slot legend sizes
    pub font_sizes: Vec<Option<f64>>,
    /// Profile hint
    pub profile: String,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
    /// Rotation angle
    pub rotation: f64,
    /// Rotation origin x
    pub rotation_x: f64,
    /// Rotation origin y
    pub rotation_y: f64,
    /// Decal
    pub decal: bool,
    /// Homing nub
    pub nub: bool,
    /// Stepped keycap
    pub stepped: bool,
}

impl Default for KeyProps {
    fn default() -> Self {
        Self {
            color: DEFAULT_KEY_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            ghost: false,
            alignment: DEFAULT_ALIGNMENT,
            font_size: DEFAULT_FONT_SIZE,
            secondary_font_size: None,
            font_sizes: Vec::new(),
            profile: String::new(),
            width: DEFAULT_KEY_SIZE,
            height: DEFAULT_KEY_SIZE,
            rotation: 0.0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            decal: false,
            nub: false,
            stepped: false,
        }
    }
}

/// Resolves defaults ⊕ carried context ⊕ pending overrides, rightmost wins.
#[must_use]
pub fn resolve_props(context: &StyleContext, overrides: &KeyModifier) -> KeyProps {
    let defaults = KeyProps::default();

    KeyProps {
        color: overrides
            .color
            .clone()
            .or_else(|| context.color.clone())
            .unwrap_or(defaults.color),
        text_color: overrides
            .text_color
            .clone()
            .or_else(|| context.text_color.clone())
            .unwrap_or(defaults.text_color),
        ghost: overrides.ghost.or(context.ghost).unwrap_or(defaults.ghost),
        alignment: overrides
            .alignment
            .or(context.alignment)
            .unwrap_or(defaults.alignment),
        font_size: overrides
            .font_size
            .or(context.font_size)
            .unwrap_or(defaults.font_size),
        secondary_font_size: overrides
            .secondary_font_size
            .or(context.secondary_font_size)
            .or(defaults.secondary_font_size),
        font_sizes: overrides
            .font_sizes
            .clone()
            .unwrap_or(defaults.font_sizes),
        profile: overrides
            .profile
            .clone()
            .or_else(|| context.profile.clone())
            .unwrap_or(defaults.profile),
        width: overrides.width.unwrap_or(defaults.width),
        height: overrides.height.unwrap_or(defaults.height),
        rotation: overrides
            .rotation
            .or(context.rotation)
            .unwrap_or(defaults.rotation),
        rotation_x: overrides
            .rotation_x
            .or(context.rotation_x)
            .unwrap_or(defaults.rotation_x),
        rotation_y: overrides
            .rotation_y
            .or(context.rotation_y)
            .unwrap_or(defaults.rotation_y),
        decal: overrides.decal.unwrap_or(defaults.decal),
        nub: overrides.nub.unwrap_or(defaults.nub),
        stepped: overrides.stepped.unwrap_or(defaults.stepped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifier(json: &str) -> KeyModifier {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_modifier_short_names() {
        let m = modifier(
            r##"{"c":"#444444","t":"#ffffff","w":1.5,"h":2,"x":0.25,"y":-0.5,
                "r":15,"rx":1,"ry":2,"a":7,"f":4,"f2":2,"fa":[5,0,null],
                "p":"DSA","g":true,"d":true,"n":true,"l":true}"##,
        );
        assert_eq!(m.color.as_deref(), Some("#444444"));
        assert_eq!(m.text_color.as_deref(), Some("#ffffff"));
        assert_eq!(m.width, Some(1.5));
        assert_eq!(m.height, Some(2.0));
        assert_eq!(m.x, Some(0.25));
        assert_eq!(m.y, Some(-0.5));
        assert_eq!(m.rotation, Some(15.0));
        assert_eq!(m.rotation_x, Some(1.0));
        assert_eq!(m.rotation_y, Some(2.0));
        assert_eq!(m.alignment, Some(7));
        assert_eq!(m.font_size, Some(4.0));
        assert_eq!(m.secondary_font_size, Some(2.0));
        assert_eq!(m.font_sizes, Some(vec![Some(5.0), Some(0.0), None]));
        assert_eq!(m.profile.as_deref(), Some("DSA"));
        assert_eq!(m.ghost, Some(true));
        assert_eq!(m.decal, Some(true));
        assert_eq!(m.nub, Some(true));
        assert_eq!(m.stepped, Some(true));
    }

    #[test]
    fn test_modifier_ignores_unknown_keys() {
        let m = modifier(r##"{"w":2,"sm":"cherry","future":{"nested":true}}"##);
        assert_eq!(m.width, Some(2.0));
    }

    #[test]
    fn test_modifier_rejects_wrong_types() {
        assert!(serde_json::from_str::<KeyModifier>(r##"{"w":"wide"}"##).is_err());
        assert!(serde_json::from_str::<KeyModifier>(r##"{"c":5}"##).is_err());
        assert!(serde_json::from_str::<KeyModifier>(r##"{"a":2.5}"##).is_err());
        assert!(serde_json::from_str::<KeyModifier>(r##"{"a":300}"##).is_err());
    }

    #[test]
    fn test_alignment_accepts_whole_floats() {
        assert_eq!(modifier(r##"{"a":7.0}"##).alignment, Some(7));
        assert_eq!(modifier(r##"{"a":null}"##).alignment, None);
        assert_eq!(modifier("{}").alignment, None);
    }

    #[test]
    fn test_merge_later_wins() {
        let mut pending = modifier(r##"{"w":2,"c":"#111111"}"##);
        pending.merge(modifier(r##"{"c":"#222222","d":true}"##));
        assert_eq!(pending.width, Some(2.0));
        assert_eq!(pending.color.as_deref(), Some("#222222"));
        assert_eq!(pending.decal, Some(true));
    }

    #[test]
    fn test_absorb_keeps_only_carried_fields() {
        let ctx = StyleContext::default().absorb(
            &modifier(r##"{"c":"#333333","w":2,"d":true,"x":1,"fa":[4],"a":5}"##),
            RotationMode::PerKey,
        );
        assert_eq!(ctx.color.as_deref(), Some("#333333"));
        assert_eq!(ctx.alignment, Some(5));
        assert_eq!(ctx.rotation, None);

        let props = resolve_props(&ctx, &KeyModifier::default());
        assert_eq!(props.color, "#333333");
        assert_eq!(props.width, 1.0);
        assert!(!props.decal);
        assert!(props.font_sizes.is_empty());
    }

    #[test]
    fn test_absorb_records_zero_origin_for_rotation() {
        let ctx = StyleContext::default().absorb(&modifier(r##"{"r":10}"##), RotationMode::PerKey);
        assert_eq!(ctx.rotation_y, Some(0.0));
        assert_eq!(ctx.rotation, None);

        let ctx = ctx.absorb(&modifier(r##"{"ry":3}"##), RotationMode::PerKey);
        assert_eq!(ctx.rotation_y, Some(3.0));

        // a later rotation keeps the recorded origin
        let ctx = ctx.absorb(&modifier(r##"{"rx":2}"##), RotationMode::PerKey);
        assert_eq!(ctx.rotation_y, Some(3.0));
    }

    #[test]
    fn test_absorb_carried_rotation() {
        let ctx = StyleContext::default()
            .absorb(&modifier(r##"{"r":15,"rx":4}"##), RotationMode::Carried);
        assert_eq!(ctx.rotation, Some(15.0));
        assert_eq!(ctx.rotation_x, Some(4.0));

        let props = resolve_props(&ctx, &KeyModifier::default());
        assert_eq!(props.rotation, 15.0);
        assert_eq!(props.rotation_x, 4.0);
        assert_eq!(props.rotation_y, 0.0);
    }

    #[test]
    fn test_resolve_defaults() {
        let props = resolve_props(&StyleContext::default(), &KeyModifier::default());
        assert_eq!(props, KeyProps::default());
        assert_eq!(props.color, "#cccccc");
        assert_eq!(props.text_color, "#111111");
        assert_eq!(props.font_size, 3.0);
        assert_eq!(props.alignment, 4);
    }

    #[test]
    fn test_resolve_precedence() {
        let ctx = StyleContext {
            color: Some("#aaaaaa".to_string()),
            font_size: Some(5.0),
            ..StyleContext::default()
        };
        let overrides = modifier(r##"{"c":"#bbbbbb","w":1.25}"##);
        let props = resolve_props(&ctx, &overrides);
        assert_eq!(props.color, "#bbbbbb");
        assert_eq!(props.font_size, 5.0);
        assert_eq!(props.width, 1.25);
    }

    #[test]
    fn test_rotation_mode_flag_matches_config_spelling() {
        for mode in RotationMode::value_variants() {
            let flag = mode.to_possible_value().unwrap();
            assert_eq!(serde_json::to_value(mode).unwrap(), flag.get_name());
        }
    }
}
