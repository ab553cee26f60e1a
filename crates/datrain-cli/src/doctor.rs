//! # onedrive-sync doctor
//!
//! Local health checks: home variable, OneDrive folder, marker file and
//! config files. Nothing here can tell whether OneDrive uploaded anything.

use std::path::Path;

use anyhow::Result;
use console::{style, Emoji};
use datrain_config::path::{
    compute_relative_path, home_dir, locate_onedrive_dir, marker_path, onedrive_dir, HOME_ENV,
};
use datrain_config::{Config, PROJECT_CONFIG_PATH};

use crate::marker::MARKER_CONTENT;

static CHECK: Emoji<'_, '_> = Emoji("✔ ", "[ok] ");
static CROSS: Emoji<'_, '_> = Emoji("✘ ", "[!!] ");
static WARN_ICON: Emoji<'_, '_> = Emoji("⚠ ", "[??] ");
static DOT: Emoji<'_, '_> = Emoji("● ", "[-] ");

struct DiagResult {
    passed: u32,
    warned: u32,
    failed: u32,
}

impl DiagResult {
    fn new() -> Self {
        Self {
            passed: 0,
            warned: 0,
            failed: 0,
        }
    }

    fn pass(&mut self, msg: &str) {
        self.passed += 1;
        eprintln!("  {} {}", CHECK, style(msg).green());
    }

    fn warn(&mut self, msg: &str) {
        self.warned += 1;
        eprintln!("  {} {}", WARN_ICON, style(msg).yellow());
    }

    fn fail(&mut self, msg: &str) {
        self.failed += 1;
        eprintln!("  {} {}", CROSS, style(msg).red());
    }

    fn info(&self, msg: &str) {
        eprintln!("  {} {}", DOT, style(msg).dim());
    }
}

pub fn cmd_doctor() -> Result<()> {
    eprintln!();
    eprintln!("{}", style("DatRain OneDrive Doctor").bold().cyan());
    eprintln!("{}", style("─".repeat(40)).dim());

    let mut d = DiagResult::new();

    eprintln!();
    eprintln!("{}", style("Environment").bold());
    let home = match home_dir() {
        Ok(home) => {
            d.pass(&format!("{} = {}", HOME_ENV, home.display()));
            Some(home)
        }
        Err(e) => {
            d.fail(&e.to_string());
            None
        }
    };

    if let Some(home) = &home {
        eprintln!();
        eprintln!("{}", style("OneDrive").bold());
        check_onedrive(home, &mut d);
    }

    eprintln!();
    eprintln!("{}", style("Config").bold());
    check_config(&mut d);

    eprintln!();
    eprintln!("{}", style("─".repeat(40)).dim());
    eprintln!(
        "  {} passed, {} warnings, {} errors",
        style(d.passed).green().bold(),
        style(d.warned).yellow().bold(),
        style(d.failed).red().bold(),
    );
    eprintln!();

    if d.failed > 0 {
        anyhow::bail!("doctor found {} error(s)", d.failed);
    }
    Ok(())
}

fn check_onedrive(home: &Path, d: &mut DiagResult) {
    if locate_onedrive_dir(home).is_none() {
        d.fail(&format!(
            "OneDrive folder not found at {}",
            onedrive_dir(home).display()
        ));
        return;
    }
    d.pass(&format!("Folder present: {}", onedrive_dir(home).display()));

    let marker = marker_path(home);
    let shown = compute_relative_path(home, &marker);
    match std::fs::read_to_string(&marker) {
        Ok(content) if content == MARKER_CONTENT => {
            d.pass(&format!("Marker present: {}", shown.display()));
        }
        Ok(_) => d.warn(&format!(
            "Marker {} has unexpected content; run onedrive-sync to rewrite it",
            shown.display()
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            d.info(&format!("Marker not written yet: {}", shown.display()));
        }
        Err(e) => d.fail(&format!("Cannot read marker {}: {}", shown.display(), e)),
    }
}

fn check_config(d: &mut DiagResult) {
    match Config::global_config_path() {
        Some(global) => check_config_file("Global", &global, d),
        None => d.info("Global config: home directory unknown"),
    }
    check_config_file("Project", Path::new(PROJECT_CONFIG_PATH), d);
}

fn check_config_file(label: &str, path: &Path, d: &mut DiagResult) {
    if !path.exists() {
        d.info(&format!("{} config: not present ({})", label, path.display()));
        return;
    }
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|s| toml_check(&s));
    match parsed {
        Ok(()) => d.pass(&format!("{} config: {}", label, path.display())),
        Err(e) => d.fail(&format!("{} config invalid: {}: {}", label, path.display(), e)),
    }
}

fn toml_check(contents: &str) -> Result<(), String> {
    Config::from_toml(contents)
        .map(|_| ())
        .map_err(|e| e.to_string())
}
