// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::{Identifier, Xid};

/// Geometry value of an output with no bound mode.
pub const UNRESOLVED: i32 = -1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connected,
    Disconnected,
    Unknown,
}

impl ConnectionState {
    /// Map the RandR tri-state. Out-of-range values read as unknown.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Connected,
            1 => Self::Disconnected,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Unknown => "unknown connection",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How far an output got bound during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// No crtc drives the output.
    Unbound,
    /// A crtc is assigned but has no active mode.
    BoundNoMode,
    /// Crtc and mode both resolved.
    Resolved,
}

/// A fully cross-referenced output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Output {
    pub id: Identifier,
    pub name: String,
    pub connection: ConnectionState,

    /// Driving crtc, looked up through [`crate::Topology::controller_of`].
    pub controller: Option<Xid>,

    /// Active mode, looked up through [`crate::Topology::mode_of`].
    pub mode: Option<Xid>,

    /// Every mode the output can run, in server order.
    pub supported_modes: Vec<Xid>,

    /// True when a mode was resolved and the fields below are filled.
    pub has_details: bool,
    pub refresh: f64,

    /// Position comes from the crtc and is 0 when unbound.
    pub x: i32,
    pub y: i32,

    pub width: i32,
    pub height: i32,
    pub mm_width: i32,
    pub mm_height: i32,
}

impl Output {
    pub fn xid(&self) -> Option<Xid> {
        self.id.xid()
    }

    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    pub fn binding(&self) -> Binding {
        match (self.controller, self.mode) {
            (None, _) => Binding::Unbound,
            (Some(_), None) => Binding::BoundNoMode,
            (Some(_), Some(_)) => Binding::Resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_from_raw() {
        assert_eq!(ConnectionState::from_raw(0), ConnectionState::Connected);
        assert_eq!(ConnectionState::from_raw(1), ConnectionState::Disconnected);
        assert_eq!(ConnectionState::from_raw(2), ConnectionState::Unknown);
        assert_eq!(ConnectionState::from_raw(200), ConnectionState::Unknown);
    }

    #[test]
    fn test_connection_display() {
        assert_eq!(ConnectionState::Connected.to_string(), "connected");
        assert_eq!(ConnectionState::Unknown.to_string(), "unknown connection");
    }
}
