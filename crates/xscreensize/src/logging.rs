// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use eventline::runtime::{self, LogLevel};

use crate::paths::{default_log_path, ensure_parent_dir};

/// Where log records go for one run.
#[derive(Debug, Clone)]
pub struct LogSink {
    pub file: PathBuf,

    /// Mirror records to stderr at debug level.
    pub verbose: bool,
}

impl LogSink {
    pub fn new(file: Option<PathBuf>, verbose: bool) -> Self {
        Self {
            file: file.unwrap_or_else(|| default_log_path("xscreensize.log")),
            verbose,
        }
    }

    pub fn init(&self) -> Result<(), String> {
        init_logging(&self.file, self.verbose)
    }
}

fn init_logging(log_path: &Path, verbose: bool) -> Result<(), String> {
    ensure_parent_dir(log_path).map_err(|e| format!("create log dir: {e}"))?;

    async_io::block_on(runtime::init());

    runtime::enable_file_output(log_path).map_err(|e| format!("enable file output: {e}"))?;

    // stdout carries the report; keep the console sink off unless asked for
    runtime::enable_console_output(verbose);
    runtime::enable_console_color(verbose);

    runtime::set_log_level(if verbose { LogLevel::Debug } else { LogLevel::Info });

    Ok(())
}
