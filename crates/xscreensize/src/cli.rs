// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::Parser;

use xscreensize_core::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "xscreensize", version, about = "Report the outputs, crtcs and modes of an X screen.")]
pub struct Args {
    /// X display to query (default: $DISPLAY)
    #[arg(long, short = 'd')]
    pub display: Option<String>,

    /// Screen number (default: the display's default screen)
    #[arg(long, short = 's')]
    pub screen: Option<usize>,

    /// Report the server's cached configuration instead of re-probing outputs (faster)
    #[arg(long)]
    pub current: bool,

    /// Report format
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Only list connected outputs
    #[arg(long)]
    pub connected: bool,

    /// Only list the output with this name (e.g. DP-1)
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Also look up this mode name (e.g. 1920x1080) among each listed output's modes
    #[arg(long, short = 'm')]
    pub mode: Option<String>,

    /// Preferred refresh rate in Hz for --mode
    #[arg(long, short = 'r', requires = "mode", value_parser = parse_refresh)]
    pub refresh: Option<f64>,

    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/xscreensize/xscreensize.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override config path (default: $XDG_CONFIG_HOME/xscreensize/xscreensize.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_refresh(s: &str) -> Result<f64, String> {
    let hz: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("expected a refresh rate in Hz, got \"{s}\""))?;

    if !hz.is_finite() || hz < 0.0 {
        return Err(format!("refresh rate must be a finite, non-negative number, got {s}"));
    }
    Ok(hz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_refresh() {
        assert_eq!(parse_refresh("60"), Ok(60.0));
        assert_eq!(parse_refresh(" 59.94 "), Ok(59.94));
        assert_eq!(parse_refresh("0"), Ok(0.0));

        for bad in ["nan", "inf", "-inf", "-60", "fast"] {
            assert!(parse_refresh(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_refresh_flag_rejects_nan() {
        let args = Args::try_parse_from(["xscreensize", "--mode", "1920x1080", "--refresh", "NaN"]);
        assert!(args.is_err());

        let args =
            Args::try_parse_from(["xscreensize", "--mode", "1920x1080", "--refresh", "75"]).unwrap();
        assert_eq!(args.refresh, Some(75.0));
    }
}
