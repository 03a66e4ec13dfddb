//! `config` subcommand: show current configuration and file paths, or write
//! a default config file with `--init`.

use std::path::{Path, PathBuf};

use super::{Config, ConfigOutput, LedstripError, RangeJson, Result, kv, kv_indent, kv_width, led};

fn color_label(value: &Option<String>) -> String {
    match value.as_deref() {
        None => "(unset)".to_string(),
        Some(spec) => match led::parse_color_spec(spec) {
            Ok(c) => format!("{spec} -> {}", led::format_color(c)),
            Err(_) => format!("{spec} (invalid)"),
        },
    }
}

fn setting_label<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "(default)".to_string(), |v| v.to_string())
}

/// Where `config --init` writes: the `--config` path, else the platform path.
fn init_target(custom_path: Option<&Path>) -> Result<PathBuf> {
    custom_path
        .map(Path::to_path_buf)
        .or_else(Config::path)
        .ok_or_else(|| LedstripError::Config("no config directory on this platform".into()))
}

pub(super) fn cmd_config_init(custom_path: Option<&Path>, force: bool) -> Result<()> {
    let path = init_target(custom_path)?;
    if path.exists() && !force {
        return Err(LedstripError::Config(format!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(&path)?;
    log::info!("wrote default config to {}", path.display());
    println!("Wrote {}", path.display());
    Ok(())
}

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(custom_path)?;
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let problems: Vec<String> = match config.validate() {
        Ok(()) => vec![],
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };
    let range = config.pixel_range();

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            selection: RangeJson::from(&range),
            settings: config,
            problems,
        };
        let text = serde_json::to_string_pretty(&output)
            .map_err(|e| LedstripError::Config(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:", "Selection:"],
        &[
            "led_count:",
            "brightness:",
            "span_primary:",
            "span_secondary:",
            "spacing_primary:",
            "spacing_secondary:",
        ],
    );

    match &config_path {
        Some(p) => {
            if config_exists {
                kv("Config file:", format_args!("{} (loaded)", p.display()), w);
            } else {
                kv(
                    "Config file:",
                    format_args!("{} (not found, using defaults)", p.display()),
                    w,
                );
            }
        }
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("led_count:", config.led_count, w);
    kv_indent("brightness:", config.brightness, w);
    println!();

    println!("Palette:");
    let p = &config.palette;
    kv_indent("span_primary:", color_label(&p.span_primary), w);
    kv_indent("span_secondary:", color_label(&p.span_secondary), w);
    kv_indent("spacing_primary:", color_label(&p.spacing_primary), w);
    kv_indent("spacing_secondary:", color_label(&p.spacing_secondary), w);
    println!();

    let s = &config.selection;
    println!("Selection:");
    kv_indent("start:", setting_label(s.start), w);
    kv_indent("end:", setting_label(s.end), w);
    kv_indent("span:", setting_label(s.span), w);
    kv_indent("spacing:", setting_label(s.spacing), w);
    kv_indent("invert:", setting_label(s.invert), w);
    kv_indent("effective:", &range, w);

    if !problems.is_empty() {
        println!();
        println!("Problems:");
        for problem in &problems {
            println!("  {problem}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_labels() {
        assert_eq!(color_label(&None), "(unset)");
        assert_eq!(color_label(&Some("red".into())), "red -> #FF0000");
        assert_eq!(color_label(&Some("0, 0, 255".into())), "0, 0, 255 -> #0000FF");
        assert_eq!(color_label(&Some("purple".into())), "purple (invalid)");
    }

    #[test]
    fn init_writes_defaults_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(init_target(Some(&path)).unwrap(), path);

        cmd_config_init(Some(&path), false).unwrap();
        assert_eq!(Config::load_strict(&path).unwrap(), Config::default());

        std::fs::write(&path, "led_count = 5\n").unwrap();
        let err = cmd_config_init(Some(&path), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(Config::load_strict(&path).unwrap().led_count, 5);

        cmd_config_init(Some(&path), true).unwrap();
        assert_eq!(Config::load_strict(&path).unwrap().led_count, 60);
    }

    #[test]
    fn setting_labels() {
        assert_eq!(setting_label::<i64>(None), "(default)");
        assert_eq!(setting_label(Some(3)), "3");
        assert_eq!(setting_label(Some(true)), "true");
    }
}
