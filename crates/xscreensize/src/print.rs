// Author: Dustin Pilgrim
// License: MIT

use std::fmt::Write as _;

use serde::Serialize;

use xscreensize_core::{Identifier, ModeDescriptor, Output, Screen, Topology};

use crate::config::Settings;

/// The outputs selected for printing, plus the `--mode` lookup per output.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub screen: &'a Screen,
    pub outputs: Vec<Entry<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Entry<'a> {
    #[serde(flatten)]
    pub output: &'a Output,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup: Option<ModeLookup<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ModeLookup<'a> {
    pub name: &'a str,
    pub found: Option<&'a ModeDescriptor>,
}

impl<'a> Report<'a> {
    pub fn build(topology: &'a Topology, settings: &'a Settings) -> Result<Self, String> {
        if let Some(name) = &settings.output {
            if topology.output_by_name(name).is_none() {
                return Err(format!("no output named {name}"));
            }
        }

        let outputs = topology
            .outputs()
            .iter()
            .filter(|o| !settings.connected_only || o.is_connected())
            .filter(|o| settings.output.as_deref().is_none_or(|name| o.name == name))
            .map(|output| Entry {
                output,
                lookup: settings.mode.as_deref().map(|name| ModeLookup {
                    name,
                    found: topology.find_mode_for(
                        output,
                        &Identifier::from_name(name),
                        settings.refresh,
                    ),
                }),
            })
            .collect();

        Ok(Self {
            screen: topology.screen(),
            outputs,
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", screen_line(self.screen));

        for entry in &self.outputs {
            let _ = writeln!(out, "\t{}", output_line(entry.output));

            if let Some(lookup) = &entry.lookup {
                match lookup.found {
                    Some(mode) => {
                        let _ = writeln!(out, "\t\tmode {}", mode_line(mode));
                    }
                    None => {
                        let _ = writeln!(out, "\t\tmode {}: not supported", lookup.name);
                    }
                }
            }
        }

        out
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("json encode: {e}"))
    }
}

pub fn screen_line(screen: &Screen) -> String {
    format!(
        "screen {}: {}px x {}px",
        screen.number, screen.width, screen.height
    )
}

pub fn output_line(o: &Output) -> String {
    let mut line = format!("{} [{}]", o.name, o.connection);
    if o.has_details {
        let _ = write!(
            line,
            " at {}Hz: {}x{}+{}+{}, {}mm x {}mm",
            hz(o.refresh), o.width, o.height, o.x, o.y, o.mm_width, o.mm_height
        );
    }
    line
}

pub fn mode_line(mode: &ModeDescriptor) -> String {
    let mut line = format!(
        "{} (0x{:x}) {}x{} at {}Hz",
        mode.name,
        mode.id,
        mode.width,
        mode.height,
        hz(mode.refresh())
    );
    if mode.is_doublescan() {
        line.push_str(" doublescan");
    }
    line
}

/// Six significant digits, trailing zeros dropped: 60, 64.2612, 59.9506.
fn hz(rate: f64) -> String {
    if !rate.is_finite() || rate == 0.0 {
        return rate.to_string();
    }

    // {:e} rounds before the exponent is read: 99.999996 becomes 1.00000e2
    let sci = format!("{rate:.5e}");
    let exp: i32 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if !(-5..6).contains(&exp) {
        return sci;
    }

    let decimals = usize::try_from(5 - exp).unwrap_or(0);
    let fixed = format!("{rate:.decimals$}");
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}
