// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

use crate::identifier::{Identifier, Xid};

pub type Result<T> = std::result::Result<T, ResolutionError>;

#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Display connection could not be opened or lacks RandR support.
    #[error("{0}")]
    Connection(String),

    #[error("could not get crtc 0x{id:x} information: {reason}")]
    ControllerUnavailable { id: Xid, reason: String },

    #[error("could not get output 0x{id:x} information: {reason}")]
    OutputUnavailable { id: Xid, reason: String },

    #[error("cannot find crtc {0}")]
    ControllerNotFound(Identifier),

    #[error("output {output} cannot use crtc 0x{controller:x}")]
    IncompatibleController { output: String, controller: Xid },

    #[error("server did not report mode 0x{mode:x} for output {output}")]
    ModeNotReported { mode: Xid, output: String },
}
