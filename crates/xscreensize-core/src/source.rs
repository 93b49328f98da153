// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::identifier::{NONE, Xid};
use crate::mode::ModeDescriptor;
use crate::screen::Screen;

/// Crtc details as the server reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawController {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,

    /// Currently bound mode, or [`NONE`].
    pub mode: Xid,
}

/// Output details as the server reports them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawOutput {
    pub name: String,

    /// RandR tri-state: 0 connected, 1 disconnected, 2 unknown.
    pub connection: u8,

    /// Crtc currently driving this output, or [`NONE`].
    pub crtc: Xid,

    pub mm_width: u32,
    pub mm_height: u32,

    /// Crtcs this output is able to use.
    pub crtcs: Vec<Xid>,

    /// Modes this output supports.
    pub modes: Vec<Xid>,
}

impl RawOutput {
    pub fn can_use_controller(&self, crtc: Xid) -> bool {
        self.crtcs.contains(&crtc)
    }
}

/// Everything the resolver needs from a display server.
///
/// Detail queries may fail individually; the error text is wrapped into a
/// typed resolution error by the caller.
pub trait DisplaySource {
    fn screen(&self) -> Screen;

    /// Crtc ids in server enumeration order.
    fn controller_ids(&self) -> Vec<Xid>;
    fn controller_info(&self, id: Xid) -> Result<RawController, String>;

    /// Output ids in server enumeration order.
    fn output_ids(&self) -> Vec<Xid>;
    fn output_info(&self, id: Xid) -> Result<RawOutput, String>;

    /// Full mode catalog for the screen.
    fn modes(&self) -> &[ModeDescriptor];
}

/// In-memory display source. Entries whose details are `None` fail their
/// detail query.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub screen: Screen,
    pub controllers: Vec<(Xid, Option<RawController>)>,
    pub outputs: Vec<(Xid, Option<RawOutput>)>,
    pub modes: Vec<ModeDescriptor>,
}

impl StaticSource {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            ..Self::default()
        }
    }

    pub fn with_controller(mut self, id: Xid, raw: RawController) -> Self {
        self.controllers.push((id, Some(raw)));
        self
    }

    pub fn with_broken_controller(mut self, id: Xid) -> Self {
        self.controllers.push((id, None));
        self
    }

    pub fn with_output(mut self, id: Xid, raw: RawOutput) -> Self {
        self.outputs.push((id, Some(raw)));
        self
    }

    pub fn with_broken_output(mut self, id: Xid) -> Self {
        self.outputs.push((id, None));
        self
    }

    pub fn with_mode(mut self, mode: ModeDescriptor) -> Self {
        self.modes.push(mode);
        self
    }
}

impl DisplaySource for StaticSource {
    fn screen(&self) -> Screen {
        self.screen
    }

    fn controller_ids(&self) -> Vec<Xid> {
        self.controllers.iter().map(|(id, _)| *id).collect()
    }

    fn controller_info(&self, id: Xid) -> Result<RawController, String> {
        lookup(&self.controllers, id).ok_or_else(|| format!("no details for crtc 0x{id:x}"))
    }

    fn output_ids(&self) -> Vec<Xid> {
        self.outputs.iter().map(|(id, _)| *id).collect()
    }

    fn output_info(&self, id: Xid) -> Result<RawOutput, String> {
        lookup(&self.outputs, id).ok_or_else(|| format!("no details for output 0x{id:x}"))
    }

    fn modes(&self) -> &[ModeDescriptor] {
        &self.modes
    }
}

fn lookup<T: Clone>(entries: &[(Xid, Option<T>)], id: Xid) -> Option<T> {
    if id == NONE {
        return None;
    }
    entries
        .iter()
        .find(|(xid, _)| *xid == id)
        .and_then(|(_, raw)| raw.clone())
}
