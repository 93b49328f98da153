// Author: Dustin Pilgrim
// License: MIT

use eventline::{debug, error, info};

use xscreensize_core::{OutputFormat, Topology};
use xscreensize_x11::X11Source;

use crate::cli::Args;
use crate::config::{self, Settings};
use crate::paths;
use crate::print::Report;

pub fn run(args: Args) -> Result<(), String> {
    info!("starting");

    let config_path = args.config.clone().unwrap_or_else(paths::default_config_path);
    debug!("config: {}", config_path.display());

    let cfg = config::load(&config_path).map_err(|e| {
        error!("{e}");
        format!("xscreensize: {e} ({})", config_path.display())
    })?;

    let settings = Settings::merge(&args, cfg);
    debug!("settings: {:?}", settings);

    let source = X11Source::connect(settings.display.as_deref(), settings.screen, settings.current)
        .map_err(|e| {
            error!("connect failed: {e}");
            format!("xscreensize: {e}")
        })?;

    let topology = Topology::resolve(&source).map_err(|e| {
        error!("resolution failed: {e}");
        format!("xscreensize: {e}")
    })?;

    info!(
        "screen {}: {} outputs, {} connected",
        topology.screen().number,
        topology.outputs().len(),
        topology.connected().count()
    );

    let report = Report::build(&topology, &settings).map_err(|e| format!("xscreensize: {e}"))?;

    match settings.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    info!("done");
    Ok(())
}
