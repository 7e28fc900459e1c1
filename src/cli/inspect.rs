//! Inspect command: lists every decoded key of a layout.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{load_config, print_json, CliError, CliResult, LayoutInput};
use crate::models::{Key, Keyboard};

/// List every key of a layout with its resolved properties
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    input: LayoutInput,

    /// Only show keys from this row
    #[arg(long, value_name = "N")]
    pub row: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output when a single row is requested
#[derive(Serialize, Debug)]
struct RowOutput<'a> {
    row: usize,
    keys: Vec<&'a Key>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let keyboard = self.input.load(&config)?;
        let json = self.json || config.output.json;

        match self.row {
            Some(row) => {
                let keys: Vec<&Key> = keyboard.keys_in_row(row).collect();
                if keys.is_empty() {
                    return Err(CliError::validation(format!(
                        "No keys in row {row} (layout has {} rows with keys)",
                        keyboard.row_count()
                    )));
                }

                if json {
                    print_json(&RowOutput { row, keys })?;
                } else {
                    print_row(row, &keys);
                }
            }
            None => {
                if json {
                    print_json(&keyboard)?;
                } else {
                    print_keyboard(&keyboard);
                }
            }
        }

        Ok(())
    }
}

fn print_keyboard(keyboard: &Keyboard) {
    println!(
        "Keyboard: {}",
        keyboard.name.as_deref().unwrap_or("(unnamed)")
    );
    println!("Keys: {}", keyboard.key_count());

    let mut current_row = None;
    let mut row_keys = Vec::new();
    for key in &keyboard.keys {
        if current_row != Some(key.row) {
            if let Some(row) = current_row {
                println!();
                print_row(row, &row_keys);
            }
            current_row = Some(key.row);
            row_keys.clear();
        }
        row_keys.push(key);
    }
    if let Some(row) = current_row {
        println!();
        print_row(row, &row_keys);
    }
}

fn print_row(row: usize, keys: &[&Key]) {
    println!("Row {row}:");
    for key in keys {
        print_key(key);
    }
}

fn print_key(key: &Key) {
    println!(
        "  [{}] x={:.2} y={:.2} w={:.2} h={:.2} color={} text={} {:?}",
        key.column, key.x, key.y, key.width, key.height, key.color, key.text_color, key.legend
    );

    if key.is_rotated() || key.rotation_x != 0.0 || key.rotation_y != 0.0 {
        println!(
            "      rotation: {:.2} deg around ({:.2}, {:.2})",
            key.rotation, key.rotation_x, key.rotation_y
        );
    }

    let flags = key_flags(key);
    if !flags.is_empty() {
        println!("      flags: {}", flags.join(", "));
    }

    for label in key.non_empty_labels() {
        let size = label
            .size
            .map_or_else(|| "-".to_string(), |size| format!("{size}"));
        match label.icon() {
            Some(icon) => println!(
                "      label {}: {}-{} icon (size {size})",
                label.slot,
                icon.family.prefix(),
                icon.name
            ),
            None => println!("      label {}: {:?} (size {size})", label.slot, label.text),
        }
    }
}

fn key_flags(key: &Key) -> Vec<&'static str> {
    [
        (key.ghost, "ghost"),
        (key.decal, "decal"),
        (key.nub, "nub"),
        (key.stepped, "stepped"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}
