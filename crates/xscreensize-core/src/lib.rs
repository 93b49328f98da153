// Author: Dustin Pilgrim
// License: MIT

pub mod controller;
pub mod error;
pub mod format;
pub mod identifier;
pub mod mode;
pub mod output;
pub mod resolve;
pub mod screen;
pub mod source;
pub mod topology;

mod assemble;

pub use controller::{Controller, ControllerRegistry};
pub use error::{ResolutionError, Result};
pub use format::OutputFormat;
pub use identifier::{Identifier, NONE, Xid};
pub use mode::{ModeDescriptor, ModeFlags};
pub use output::{Binding, ConnectionState, Output, UNRESOLVED};
pub use resolve::{find_mode, find_mode_by_xid, find_mode_for_output};
pub use screen::Screen;
pub use source::{DisplaySource, RawController, RawOutput, StaticSource};
pub use topology::Topology;
