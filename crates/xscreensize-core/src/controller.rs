// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

use crate::error::{ResolutionError, Result};
use crate::identifier::{Identifier, NONE, Xid};
use crate::source::{DisplaySource, RawController};

/// A crtc, addressable both by server id and by enumeration position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Controller {
    pub xid: Xid,
    pub index: usize,

    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,

    /// Bound mode, `None` when the crtc is idle.
    pub mode: Option<Xid>,
}

impl Controller {
    pub fn new(xid: Xid, index: usize, raw: RawController) -> Self {
        Self {
            xid,
            index,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
            mode: (raw.mode != NONE).then_some(raw.mode),
        }
    }

    pub fn identifier(&self) -> Identifier {
        Identifier::from_xid(self.xid).with_index(self.index)
    }
}

/// All crtcs of one screen, fetched once per resolution pass.
#[derive(Debug, Clone, Default)]
pub struct ControllerRegistry {
    controllers: Vec<Controller>,
}

impl ControllerRegistry {
    /// Fetch every crtc the source enumerates. Any failing detail query
    /// fails the whole load.
    pub fn load<S: DisplaySource + ?Sized>(source: &S) -> Result<Self> {
        let mut controllers = Vec::new();

        for (index, xid) in source.controller_ids().into_iter().enumerate() {
            let raw = source
                .controller_info(xid)
                .map_err(|reason| ResolutionError::ControllerUnavailable { id: xid, reason })?;
            controllers.push(Controller::new(xid, index, raw));
        }

        Ok(Self { controllers })
    }

    pub fn find(&self, id: &Identifier) -> Option<&Controller> {
        self.controllers.iter().find(|c| c.identifier().matches(id))
    }

    pub fn find_by_xid(&self, xid: Xid) -> Option<&Controller> {
        self.find(&Identifier::from_xid(xid))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Controller> {
        self.controllers.iter()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn into_vec(self) -> Vec<Controller> {
        self.controllers
    }
}
