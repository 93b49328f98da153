// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

#[cfg(feature = "clap")]
use clap::ValueEnum;

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
