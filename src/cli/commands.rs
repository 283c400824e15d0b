//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands. Capture and
//! settings commands run against the built-in mock camera; a hardware
//! binding would be wired in here by swapping the driver type.

use crate::camera::settings::{ConfigSetting, ReadOnlySetting};
use crate::camera::{Camera, CaptureOverrides};
use crate::cli::progress::{print_header, sequence_bar};
use crate::cli::{Args, Commands};
use crate::config::{self, Config};
use crate::core::formatter::FilenameFormatter;
use crate::testdb::MockCamera;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Dispatch the parsed command line
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Some(Commands::Capture {
            count,
            output,
            rule,
            shutterspeed,
            aperture,
            iso,
        }) => {
            let mut overrides = CaptureOverrides::none();
            if let Some(value) = shutterspeed {
                overrides = overrides.shutterspeed(value.clone());
            }
            if let Some(value) = aperture {
                overrides = overrides.aperture(value.clone());
            }
            if let Some(value) = iso {
                overrides = overrides.iso(value.clone());
            }
            run_capture(config, *count, output.as_deref(), rule.as_deref(), &overrides)
        }
        Some(Commands::Settings) | None => run_settings(config),
        Some(Commands::Rename {
            rule,
            files,
            apply,
            start,
        }) => run_rename(rule, files, *apply, *start),
        Some(Commands::ShowConfig) => run_show_config(config),
        Some(Commands::GenerateConfig { output }) => run_generate_config(output.as_deref()),
    }
}

/// Capture a sequence of frames, naming files through the formatter
fn run_capture(
    config: &Config,
    count: u32,
    output: Option<&Path>,
    rule: Option<&str>,
    overrides: &CaptureOverrides,
) -> Result<()> {
    let mut options = config.camera_options();
    if let Some(output) = output {
        options.capture_directory = Some(output.to_path_buf());
    }
    if let Some(directory) = &options.capture_directory {
        fs::create_dir_all(directory)
            .with_context(|| format!("failed to create {}", directory.display()))?;
    }

    let mut camera = Camera::with_options(MockCamera::new(), options)?;
    *camera.formatter_mut() = config.naming.build_formatter();
    if let Some(rule) = rule {
        camera.formatter_mut().set_rename_rule(rule);
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        if shutdown_flag.load(Ordering::SeqCst) {
            // Second Ctrl+C - force exit
            eprintln!("\nForce shutdown requested. Exiting immediately...");
            std::process::exit(1);
        }
        shutdown_flag.store(true, Ordering::SeqCst);
        eprintln!("\nFinishing current frame... (Press Ctrl+C again to force quit)");
    })
    .context("failed to set Ctrl+C handler")?;

    info!("capturing {count} frame(s)");
    let bar = sequence_bar(u64::from(count), "capturing");
    let mut written = Vec::new();
    for _ in 0..count {
        if shutdown.load(Ordering::SeqCst) {
            info!("capture sequence interrupted");
            break;
        }
        // The mock produces JPEG frames, so the {ext}/{EXT} fields are
        // derived from a jpg original.
        let path = camera.capture_named("capture.jpg", overrides)?;
        debug!("captured {}", path.display());
        written.push(path);
        bar.inc(1);
    }
    bar.finish_and_clear();

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}

/// Print the device's read-only properties and configurable settings
fn run_settings(config: &Config) -> Result<()> {
    let camera = Camera::with_options(MockCamera::new(), config.camera_options())?;

    print_header("Device");
    for setting in ReadOnlySetting::ALL {
        let value = camera
            .get_setting(setting)
            .unwrap_or_else(|| "n/a".to_string());
        println!("  {:<15} {}", setting.name(), value);
    }

    print_header("Settings");
    for setting in ConfigSetting::ALL {
        let value = camera
            .get_setting(setting)
            .unwrap_or_else(|| "n/a".to_string());
        match camera.model(setting) {
            Some(model) => println!(
                "  {:<15} {}  (choices: {})",
                setting.name(),
                value,
                model.values().join(", ")
            ),
            None => println!("  {:<15} {}", setting.name(), value),
        }
    }
    println!();
    Ok(())
}

/// Apply a rename rule to existing files
fn run_rename(rule: &str, files: &[PathBuf], apply: bool, start: u64) -> Result<()> {
    let mut formatter = FilenameFormatter::new().with_rule(rule).with_initial(start);
    let bar = apply.then(|| sequence_bar(files.len() as u64, "renaming"));

    for file in files {
        let original = file
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("invalid filename: {}", file.display()))?;
        let new_name = formatter.get_filename(original)?;
        let target = file.with_file_name(&new_name);

        if apply {
            if target.exists() {
                warn!(
                    "skipping {}: target {} already exists",
                    file.display(),
                    target.display()
                );
            } else {
                fs::rename(file, &target)
                    .with_context(|| format!("failed to rename {}", file.display()))?;
            }
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }
        println!("{} -> {}", file.display(), new_name);
    }

    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }
    Ok(())
}

/// Print the resolved configuration as TOML
fn run_show_config(config: &Config) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Write a default configuration file
fn run_generate_config(output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, Config::generate_default_config())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => {
            let path = config::init_config()?;
            println!("Config at {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rename_applies_rule_in_order() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.jpg");
        let second = dir.path().join("b.jpg");
        fs::write(&first, b"one").unwrap();
        fs::write(&second, b"two").unwrap();

        run_rename(
            "{seq:02}_{original}",
            &[first.clone(), second.clone()],
            true,
            0,
        )
        .unwrap();

        assert!(!first.exists());
        assert!(dir.path().join("01_a.jpg").exists());
        assert!(dir.path().join("02_b.jpg").exists());
    }

    #[test]
    fn test_rename_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.jpg");
        fs::write(&file, b"one").unwrap();

        run_rename("{seq:02}.{ext}", &[file.clone()], false, 0).unwrap();

        assert!(file.exists());
        assert!(!dir.path().join("01.jpg").exists());
    }

    #[test]
    fn test_rename_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.jpg");
        let blocker = dir.path().join("01.jpg");
        fs::write(&file, b"one").unwrap();
        fs::write(&blocker, b"existing").unwrap();

        run_rename("{seq:02}.{ext}", &[file.clone()], true, 0).unwrap();

        assert!(file.exists());
        assert_eq!(fs::read(&blocker).unwrap(), b"existing");
    }
}
