// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::assemble::assemble_output;
use crate::controller::{Controller, ControllerRegistry};
use crate::error::{ResolutionError, Result};
use crate::identifier::Identifier;
use crate::mode::ModeDescriptor;
use crate::output::Output;
use crate::resolve::{find_mode_by_xid, find_mode_for_output};
use crate::screen::Screen;
use crate::source::DisplaySource;

/// Read-only snapshot of one screen's outputs, in server order.
///
/// Built in a single pass by [`Topology::resolve`]; there is no way to get a
/// partially resolved one. Query the server again to see changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    screen: Screen,
    controllers: Vec<Controller>,
    modes: Vec<ModeDescriptor>,
    outputs: Vec<Output>,
}

impl Topology {
    pub fn resolve<S: DisplaySource + ?Sized>(source: &S) -> Result<Self> {
        let registry = ControllerRegistry::load(source)?;
        let catalog = source.modes();

        let outputs = source
            .output_ids()
            .into_iter()
            .map(|xid| {
                let raw = source
                    .output_info(xid)
                    .map_err(|reason| ResolutionError::OutputUnavailable { id: xid, reason })?;
                assemble_output(xid, &raw, &registry, catalog)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            screen: source.screen(),
            controllers: registry.into_vec(),
            modes: catalog.to_vec(),
            outputs,
        })
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn modes(&self) -> &[ModeDescriptor] {
        &self.modes
    }

    pub fn connected(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter().filter(|o| o.is_connected())
    }

    pub fn output_by_name(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.name == name)
    }

    pub fn controller_of(&self, output: &Output) -> Option<&Controller> {
        let xid = output.controller?;
        self.controllers.iter().find(|c| c.xid == xid)
    }

    pub fn mode_of(&self, output: &Output) -> Option<&ModeDescriptor> {
        find_mode_by_xid(&self.modes, output.mode?)
    }

    /// Best mode among those `output` supports; see [`find_mode_for_output`].
    pub fn find_mode_for(
        &self,
        output: &Output,
        name: &Identifier,
        refresh: f64,
    ) -> Option<&ModeDescriptor> {
        find_mode_for_output(&self.modes, &output.supported_modes, name, refresh)
    }
}
