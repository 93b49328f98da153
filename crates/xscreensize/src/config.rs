// Author: Dustin Pilgrim
// License: MIT

use std::path::Path;

use rune_cfg::RuneConfig;

use xscreensize_core::OutputFormat;

use crate::cli::Args;

/// Defaults read from `xscreensize.rune`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XssConfig {
    pub display: Option<String>,
    pub screen: Option<usize>,
    pub current: bool,
    pub format: OutputFormat,
    pub connected_only: bool,
}

pub fn load(path: &Path) -> Result<XssConfig, String> {
    if !path.exists() {
        return Ok(XssConfig::default());
    }

    let rc = RuneConfig::from_file(path).map_err(|e| format!("failed to read config: {e}"))?;

    parse_config(&rc)
}

fn parse_config(rc: &RuneConfig) -> Result<XssConfig, String> {
    let mut cfg = XssConfig::default();

    if !rc.has("xscreensize") {
        return Ok(cfg);
    }

    if let Some(display) = get_string(rc, "xscreensize.display")? {
        let display = display.trim();
        if !display.is_empty() {
            cfg.display = Some(display.to_string());
        }
    }

    if let Some(screen) = get_string(rc, "xscreensize.screen")? {
        cfg.screen = Some(
            parse_screen(&screen).map_err(|e| format!("config error at xscreensize.screen: {e}"))?,
        );
    }

    if let Some(current) = get_string(rc, "xscreensize.current")? {
        cfg.current = parse_bool(&current)
            .map_err(|e| format!("config error at xscreensize.current: {e}"))?;
    }

    if let Some(format) = get_string(rc, "xscreensize.format")? {
        cfg.format = OutputFormat::parse(&format).ok_or_else(|| {
            format!(
                "config error at xscreensize.format: expected text|json, got \"{}\"",
                format.trim()
            )
        })?;
    }

    if let Some(connected) = get_string(rc, "xscreensize.connected_only")? {
        cfg.connected_only = parse_bool(&connected)
            .map_err(|e| format!("config error at xscreensize.connected_only: {e}"))?;
    }

    Ok(cfg)
}

fn get_string(rc: &RuneConfig, key: &str) -> Result<Option<String>, String> {
    rc.get_optional::<String>(key)
        .map_err(|e| format!("config error at {key}: {e}"))
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("expected true|false, got \"{other}\"")),
    }
}

fn parse_screen(s: &str) -> Result<usize, String> {
    s.trim()
        .parse::<usize>()
        .map_err(|_| format!("expected a screen number, got \"{}\"", s.trim()))
}

/// Effective options for one run: command-line flags over config values.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub display: Option<String>,
    pub screen: Option<usize>,
    /// Cached server state instead of a hardware re-probe.
    pub current: bool,
    pub format: OutputFormat,
    pub connected_only: bool,
    pub output: Option<String>,
    pub mode: Option<String>,
    /// 0 when no rate was requested.
    pub refresh: f64,
}

impl Settings {
    pub fn merge(args: &Args, cfg: XssConfig) -> Self {
        Self {
            display: args.display.clone().or(cfg.display),
            screen: args.screen.or(cfg.screen),
            current: args.current || cfg.current,
            format: args.format.unwrap_or(cfg.format),
            connected_only: args.connected || cfg.connected_only,
            output: args.output.clone(),
            mode: args.mode.clone(),
            refresh: args.refresh.unwrap_or(0.0),
        }
    }
}
