//! Decoder for keyboard-layout-editor "Raw" documents.
//!
//! A document is an array whose elements are either metadata objects or rows.
//! A row is an array of legend strings, each optionally preceded by modifier
//! objects:
//!
//! ```json
//! [
//!   {"name": "Tiny", "notes": "led_color: #ff00aa"},
//!   ["Esc", {"w": 1.5}, "Tab"],
//!   [{"r": 15, "rx": 1, "ry": 2}, "A", "B"]
//! ]
//! ```
//!
//! Decoding is one synchronous pass. The carried style and the x/y cursors
//! belong to a single [`RowWalker`], so concurrent decodes share nothing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::Keyboard;
use crate::parser::context::{resolve_props, KeyModifier, RotationMode, StyleContext};
use crate::parser::error::{Location, ParseError};
use crate::parser::key_factory::{build_key, Placement};
use crate::parser::metadata::{apply_metadata, KeyboardMetadata};

/// Decoder switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Whether `r`/`rx` carry over to later keys
    #[serde(default)]
    pub rotation: RotationMode,
    /// Accept the editor's Raw-pane text (unquoted keys, no outer brackets)
    #[serde(default = "default_relaxed_syntax")]
    pub relaxed_syntax: bool,
}

fn default_relaxed_syntax() -> bool {
    true
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            rotation: RotationMode::default(),
            relaxed_syntax: default_relaxed_syntax(),
        }
    }
}

/// Parses a layout file with default options.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read, otherwise the same
/// errors as [`parse_kle_str`].
pub fn parse_kle_file(path: &Path) -> Result<Keyboard, ParseError> {
    parse_kle_file_with(path, &ParseOptions::default())
}

/// Parses a layout file.
///
/// The file is read fully and decoded as UTF-8 with invalid sequences
/// replaced, so encoding problems never fail the parse.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read, otherwise the same
/// errors as [`parse_kle_str`].
pub fn parse_kle_file_with(path: &Path, options: &ParseOptions) -> Result<Keyboard, ParseError> {
    let bytes = fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_kle_bytes(&bytes, options)
}

/// Parses raw bytes, replacing undecodable sequences with U+FFFD.
///
/// # Errors
///
/// Same as [`parse_kle_str_with`].
pub fn parse_kle_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Keyboard, ParseError> {
    let text = String::from_utf8_lossy(bytes);
    parse_kle_str_with(&text, options)
}

/// Parses layout text with default options.
///
/// # Errors
///
/// Same as [`parse_kle_str_with`].
pub fn parse_kle_str(text: &str) -> Result<Keyboard, ParseError> {
    parse_kle_str_with(text, &ParseOptions::default())
}

/// Parses layout text.
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] if the text is not a well-formed document
/// and [`ParseError::Structural`] if it does not have the layout shape.
pub fn parse_kle_str_with(text: &str, options: &ParseOptions) -> Result<Keyboard, ParseError> {
    let document = read_document(text, options.relaxed_syntax)?;
    parse_kle_value(&document, options)
}

/// Reads the document tree.
///
/// Strict JSON first. In relaxed mode the editor's Raw-pane text is retried
/// as JSON5, as-is and then wrapped in brackets. The as-is reading only wins
/// outright when it already has the layout shape; a single Raw-pane row such
/// as `[{w:2},"A"]` parses as-is but needs the brackets. The strict error is
/// the one reported when nothing works.
fn read_document(text: &str, relaxed: bool) -> Result<Value, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let strict_error = match serde_json::from_str::<Value>(text) {
        Ok(document) => return Ok(document),
        Err(err) => err,
    };

    if relaxed {
        let as_is = match json5::from_str::<Value>(text) {
            Ok(document) if is_layout_shaped(&document) => return Ok(document),
            Ok(document) => Some(document),
            Err(_) => None,
        };
        if let Ok(document) = json5::from_str::<Value>(&format!("[{text}]")) {
            return Ok(document);
        }
        if let Some(document) = as_is {
            return Ok(document);
        }
    }

    Err(ParseError::Syntax(strict_error))
}

/// A top-level array of metadata objects and row arrays.
fn is_layout_shaped(document: &Value) -> bool {
    document.as_array().is_some_and(|elements| {
        elements
            .iter()
            .all(|element| element.is_object() || element.is_array())
    })
}

/// Decodes an already-parsed document tree.
///
/// # Errors
///
/// Returns [`ParseError::Structural`] if the tree does not have the layout
/// shape. No partial keyboard is returned.
pub fn parse_kle_value(document: &Value, options: &ParseOptions) -> Result<Keyboard, ParseError> {
    let elements = document.as_array().ok_or_else(|| {
        ParseError::structural(
            Location::Document,
            format!("expected an array at the top level, found {}", kind(document)),
        )
    })?;

    let mut keyboard = Keyboard::new();
    let mut walker = RowWalker::new(options.rotation);

    for (index, element) in elements.iter().enumerate() {
        match element {
            Value::Object(_) => {
                let metadata = KeyboardMetadata::deserialize(element).map_err(|err| {
                    ParseError::structural(
                        Location::Element(index),
                        format!("invalid keyboard metadata: {err}"),
                    )
                })?;
                apply_metadata(&mut keyboard, metadata);
            }
            Value::Array(tokens) => walker.walk_row(index, tokens, &mut keyboard)?,
            other => {
                return Err(ParseError::structural(
                    Location::Element(index),
                    format!("expected a metadata object or a row array, found {}", kind(other)),
                ))
            }
        }
    }

    Ok(keyboard)
}

/// Cursor and carried style for one decode.
#[derive(Debug, Clone)]
pub struct RowWalker {
    mode: RotationMode,
    context: StyleContext,
    row: usize,
    y: f64,
}

impl RowWalker {
    /// Creates a walker positioned at the first row.
    #[must_use]
    pub fn new(mode: RotationMode) -> Self {
        Self {
            mode,
            context: StyleContext::default(),
            row: 0,
            y: 0.0,
        }
    }

    /// Current carried style.
    #[must_use]
    pub const fn context(&self) -> &StyleContext {
        &self.context
    }

    /// Current y cursor (top of the next row).
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Walks one row, adding its keys to `keyboard`.
    ///
    /// `element` is the row's index in the document, used for error locations.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Structural`] for a token that is neither a
    /// modifier object nor a legend string, or a modifier with mistyped fields.
    pub fn walk_row(
        &mut self,
        element: usize,
        tokens: &[Value],
        keyboard: &mut Keyboard,
    ) -> Result<(), ParseError> {
        let mut x = 0.0;
        let mut column = 0;
        let mut pending = KeyModifier::default();

        for (token_index, token) in tokens.iter().enumerate() {
            let location = Location::Token {
                element,
                token: token_index,
            };

            match token {
                Value::Object(_) => {
                    let modifier = KeyModifier::deserialize(token).map_err(|err| {
                        ParseError::structural(location, format!("invalid key modifier: {err}"))
                    })?;
                    self.apply_modifier(&modifier, &mut x);
                    pending.merge(modifier);
                }
                Value::String(legend) => {
                    let props = resolve_props(&self.context, &pending);
                    let key = build_key(
                        legend,
                        &props,
                        Placement {
                            row: self.row,
                            column,
                            x,
                            y: self.y,
                        },
                    );
                    x += key.width;
                    column += 1;
                    keyboard.add_key(key);
                    pending = KeyModifier::default();
                }
                other => {
                    return Err(ParseError::structural(
                        location,
                        format!("expected a modifier object or a legend string, found {}", kind(other)),
                    ))
                }
            }
        }

        self.y += 1.0;
        self.row += 1;
        Ok(())
    }

    /// Moves the cursors and updates the carried style for one modifier.
    ///
    /// `ry` re-anchors y at the origin. `r` or `rx` without `ry` snaps y back
    /// to the recorded origin, 0 if none was recorded. Either way the token's
    /// own `y` offset is added on top. Without any of them `y` is a plain
    /// offset.
    fn apply_modifier(&mut self, modifier: &KeyModifier, x: &mut f64) {
        self.context = self.context.absorb(modifier, self.mode);

        if let Some(dx) = modifier.x {
            *x += dx;
        }

        let dy = modifier.y.unwrap_or(0.0);
        if let Some(ry) = modifier.rotation_y {
            self.y = ry + dy;
        } else if modifier.sets_rotation() {
            self.y = self.context.rotation_y.unwrap_or(0.0) + dy;
        } else {
            self.y += dy;
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Keyboard {
        parse_kle_str(text).unwrap()
    }

    fn positions(keyboard: &Keyboard) -> Vec<(f64, f64)> {
        keyboard.keys.iter().map(|k| (k.x, k.y)).collect()
    }

    #[test]
    fn test_single_row_positions() {
        let keyboard = parse(r#"[["A","B","C"]]"#);
        assert_eq!(positions(&keyboard), vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert!(keyboard.keys.iter().all(|k| k.row == 0));
    }

    #[test]
    fn test_two_rows_indices() {
        let keyboard = parse(r#"[["Q","W"],["A","S"]]"#);
        let rows: Vec<usize> = keyboard.keys.iter().map(|k| k.row).collect();
        let columns: Vec<usize> = keyboard.keys.iter().map(|k| k.column).collect();
        let ys: Vec<f64> = keyboard.keys.iter().map(|k| k.y).collect();
        assert_eq!(rows, vec![0, 0, 1, 1]);
        assert_eq!(columns, vec![0, 1, 0, 1]);
        assert_eq!(ys, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_x_offset_applies_once() {
        let keyboard = parse(r#"[[{"x":0.5},"A","B"]]"#);
        assert_eq!(keyboard.keys[0].x, 0.5);
        assert_eq!(keyboard.keys[1].x, 1.5);
    }

    #[test]
    fn test_width_is_one_shot() {
        let keyboard = parse(r#"[[{"w":1.5},"Tab","Q"]]"#);
        assert_eq!(keyboard.keys[0].width, 1.5);
        assert_eq!(keyboard.keys[1].width, 1.0);
        assert_eq!(keyboard.keys[1].x, 1.5);
    }

    #[test]
    fn test_y_offset_moves_the_row_and_following_rows() {
        let keyboard = parse(r#"[["A"],[{"y":0.5},"B"],["C"]]"#);
        assert_eq!(positions(&keyboard), vec![(0.0, 0.0), (0.0, 1.5), (0.0, 2.5)]);
    }

    #[test]
    fn test_metadata_does_not_advance_cursor_or_row() {
        let keyboard = parse(r#"[{"name":"x"},["A"],{"css":"y"},["B"]]"#);
        assert_eq!(keyboard.keys[0].row, 0);
        assert_eq!(keyboard.keys[1].row, 1);
        assert_eq!(keyboard.keys[1].y, 1.0);
        assert_eq!(keyboard.name.as_deref(), Some("x"));
        assert_eq!(keyboard.css.as_deref(), Some("y"));
    }

    #[test]
    fn test_walker_state_after_row() {
        let mut walker = RowWalker::new(RotationMode::PerKey);
        let mut keyboard = Keyboard::new();
        let tokens: Vec<Value> =
            serde_json::from_str(r##"[{"c":"#123456","ry":2},"A"]"##).unwrap();
        walker.walk_row(0, &tokens, &mut keyboard).unwrap();
        assert_eq!(walker.y(), 3.0);
        assert_eq!(walker.context().color.as_deref(), Some("#123456"));
        assert_eq!(walker.context().rotation_y, Some(2.0));
    }

    #[test]
    fn test_top_level_must_be_array() {
        let err = parse_kle_str(r#"{"name":"x"}"#).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Structural {
                location: Location::Document,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_element_is_structural() {
        let err = parse_kle_str(r#"[["A"], 42]"#).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Structural {
                location: Location::Element(1),
                ..
            }
        ));
    }

    #[test]
    fn test_bad_token_is_structural() {
        let err = parse_kle_str(r#"[["A", 7]]"#).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Structural {
                location: Location::Token {
                    element: 0,
                    token: 1
                },
                ..
            }
        ));
    }

    #[test]
    fn test_mistyped_modifier_is_structural() {
        let err = parse_kle_str(r#"[[{"w":"wide"},"A"]]"#).unwrap_err();
        assert!(matches!(err, ParseError::Structural { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_kle_str("[[\"A\",").unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));

        let strict = ParseOptions {
            relaxed_syntax: false,
            ..ParseOptions::default()
        };
        let err = parse_kle_str_with(r#"["A"],["B"]"#, &strict).unwrap_err();
        assert!(matches!(err, ParseError::Syntax(_)));
    }

    #[test]
    fn test_relaxed_raw_pane_text() {
        let keyboard = parse("[\"Esc\",{w:1.5},\"Tab\"],\n[{a:7,c:\"#333333\"},\"A\"]");
        assert_eq!(keyboard.key_count(), 3);
        assert_eq!(keyboard.keys[1].width, 1.5);
        assert_eq!(keyboard.keys[2].alignment, 7);
        assert_eq!(keyboard.keys[2].color, "#333333");
        assert_eq!(keyboard.keys[2].row, 1);
    }

    #[test]
    fn test_relaxed_single_row() {
        let keyboard = parse(r#"[{w:2},"A","B"]"#);
        assert_eq!(keyboard.key_count(), 2);
        assert_eq!(keyboard.keys[0].width, 2.0);
        assert_eq!(keyboard.keys[1].x, 2.0);
        assert!(keyboard.keys.iter().all(|k| k.row == 0));
    }

    #[test]
    fn test_relaxed_metadata_only() {
        let keyboard = parse(r#"{name:"Solo"}"#);
        assert_eq!(keyboard.name.as_deref(), Some("Solo"));
        assert_eq!(keyboard.key_count(), 0);
    }

    #[test]
    fn test_relaxed_single_row_with_bad_token() {
        let err = parse_kle_str("[{w:2}, 7]").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Structural {
                location: Location::Token {
                    element: 0,
                    token: 1
                },
                ..
            }
        ));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let keyboard = parse("\u{feff}[[\"A\"]]");
        assert_eq!(keyboard.key_count(), 1);
    }

    #[test]
    fn test_lossy_bytes() {
        let bytes = b"[[\"A\xff\"]]";
        let keyboard = parse_kle_bytes(bytes, &ParseOptions::default()).unwrap();
        assert_eq!(keyboard.keys[0].legend, "A\u{fffd}");
    }

    #[test]
    fn test_empty_document_and_rows() {
        assert_eq!(parse("[]").key_count(), 0);
        let keyboard = parse(r#"[[],["A"]]"#);
        assert_eq!(keyboard.keys[0].row, 1);
        assert_eq!(keyboard.keys[0].y, 1.0);
    }
}
