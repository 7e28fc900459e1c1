//! Summary command: board metadata, backlight settings and key statistics.

use clap::Args;
use serde::Serialize;

use crate::cli::common::{load_config, print_json, CliError, CliResult, LayoutInput};
use crate::models::Keyboard;

/// Show layout metadata, LED settings and key counts
#[derive(Debug, Clone, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    input: LayoutInput,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON-serializable summary
#[derive(Serialize, Debug, PartialEq)]
struct SummaryOutput {
    name: Option<String>,
    author: Option<String>,
    background_color: String,
    switch_type: Option<String>,
    switch_mount: Option<String>,
    switch_brand: Option<String>,
    led: LedOutput,
    keys: usize,
    rows: usize,
    rotated_keys: usize,
    decals: usize,
    width: f64,
    height: f64,
}

#[derive(Serialize, Debug, PartialEq)]
struct LedOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linear_rgba: Option<[f32; 4]>,
}

impl SummaryArgs {
    /// Execute the summary command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let keyboard = self.input.load(&config)?;
        let summary = summarize(&keyboard)?;

        if self.json || config.output.json {
            print_json(&summary)?;
        } else {
            output_human_readable(&summary);
        }

        Ok(())
    }
}

fn summarize(keyboard: &Keyboard) -> CliResult<SummaryOutput> {
    let led_rgb = keyboard
        .led_rgb()
        .map_err(|e| CliError::validation(format!("Invalid LED color: {e}")))?;
    let (width, height) = keyboard.extent();

    Ok(SummaryOutput {
        name: keyboard.name.clone(),
        author: keyboard.author.clone(),
        background_color: keyboard.background_color.clone(),
        switch_type: keyboard.switch_type.clone(),
        switch_mount: keyboard.switch_mount.clone(),
        switch_brand: keyboard.switch_brand.clone(),
        led: LedOutput {
            color: keyboard.led_color.clone(),
            brightness: keyboard.led_brightness,
            linear_rgba: led_rgb.map(|rgb| rgb.to_linear_rgba()),
        },
        keys: keyboard.key_count(),
        rows: keyboard.row_count(),
        rotated_keys: keyboard.keys.iter().filter(|key| key.is_rotated()).count(),
        decals: keyboard.keys.iter().filter(|key| key.decal).count(),
        width,
        height,
    })
}

fn output_human_readable(summary: &SummaryOutput) {
    let or_unset = |value: &Option<String>| value.clone().unwrap_or_else(|| "(not set)".to_string());

    println!("Layout:");
    println!("  Name: {}", or_unset(&summary.name));
    println!("  Author: {}", or_unset(&summary.author));
    println!("  Background: {}", summary.background_color);
    println!();

    println!("Switches:");
    println!("  Type: {}", or_unset(&summary.switch_type));
    println!("  Mount: {}", or_unset(&summary.switch_mount));
    println!("  Brand: {}", or_unset(&summary.switch_brand));
    println!();

    println!("LED:");
    println!("  Color: {}", or_unset(&summary.led.color));
    match summary.led.brightness {
        Some(brightness) => println!("  Brightness: {brightness}"),
        None => println!("  Brightness: (not set)"),
    }
    println!();

    println!("Keys:");
    println!("  Total: {}", summary.keys);
    println!("  Rows: {}", summary.rows);
    println!("  Rotated: {}", summary.rotated_keys);
    println!("  Decals: {}", summary.decals);
    println!("  Extent: {:.2} x {:.2}", summary.width, summary.height);
}
