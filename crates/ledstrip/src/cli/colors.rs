//! `colors` subcommand: list the named colors accepted by `--color`.

use super::{ColorEntryJson, ColorsOutput, LedstripError, Result, kv, kv_width, led};

fn entries() -> Vec<ColorEntryJson> {
    led::named_colors()
        .iter()
        .map(|&(name, c)| ColorEntryJson {
            name,
            hex: led::format_color(c),
            rgb: [c.r, c.g, c.b],
        })
        .collect()
}

pub(super) fn cmd_colors(json: bool) -> Result<()> {
    let colors = entries();

    if json {
        let output = ColorsOutput {
            count: colors.len(),
            colors,
        };
        let text = serde_json::to_string_pretty(&output)
            .map_err(|e| LedstripError::Config(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    let names: Vec<&str> = colors.iter().map(|e| e.name).collect();
    let w = kv_width(&names, &[]);
    for e in &colors {
        kv(
            e.name,
            format_args!("{}  ({}, {}, {})", e.hex, e.rgb[0], e.rgb[1], e.rgb[2]),
            w,
        );
    }
    println!();
    println!("Or give three channel values 0-255, e.g. `--color 255 128 0`.");
    Ok(())
}
