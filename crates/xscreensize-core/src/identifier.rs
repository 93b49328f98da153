// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned resource id (crtc, output, mode).
pub type Xid = u32;

/// The X11 `None` resource id: "not bound".
pub const NONE: Xid = 0;

/// A handle that can name a resource by id, by name, by enumeration index,
/// or by any combination of those at once.
///
/// Two identifiers match when at least one kind present on *both* sides has
/// equal values. Kinds present on only one side are ignored, so a fully
/// qualified identifier matches a query carrying just an id. Identifiers
/// sharing no kind never match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    xid: Option<Xid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

impl Identifier {
    /// An identifier with no kinds set. Matches nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_xid(xid: Xid) -> Self {
        Self {
            xid: Some(xid),
            ..Self::default()
        }
    }

    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.set_index(index);
        self
    }

    pub fn set_xid(&mut self, xid: Xid) {
        self.xid = Some(xid);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = Some(index);
    }

    pub fn xid(&self) -> Option<Xid> {
        self.xid
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn has_xid(&self) -> bool {
        self.xid.is_some()
    }

    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_xid() && !self.has_name() && !self.has_index()
    }

    pub fn matches(&self, other: &Identifier) -> bool {
        shared(self.xid, other.xid)
            || shared(self.name.as_deref(), other.name.as_deref())
            || shared(self.index, other.index)
    }
}

fn shared<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(xid) = self.xid {
            write!(f, "0x{xid:x}")
        } else if let Some(name) = &self.name {
            f.write_str(name)
        } else if let Some(index) = self.index {
            write!(f, "#{index}")
        } else {
            f.write_str("(none)")
        }
    }
}
