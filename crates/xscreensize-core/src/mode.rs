// Author: Dustin Pilgrim
// License: MIT

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::identifier::Xid;

/// RandR mode flag bits.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ModeFlags(pub u32);

impl ModeFlags {
    pub const HSYNC_POSITIVE: Self = Self(1 << 0);
    pub const HSYNC_NEGATIVE: Self = Self(1 << 1);
    pub const VSYNC_POSITIVE: Self = Self(1 << 2);
    pub const VSYNC_NEGATIVE: Self = Self(1 << 3);
    pub const INTERLACE: Self = Self(1 << 4);
    pub const DOUBLE_SCAN: Self = Self(1 << 5);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ModeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One entry of the server's mode catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModeDescriptor {
    pub id: Xid,
    pub name: String,

    pub width: u32,
    pub height: u32,

    /// Pixel clock in Hz.
    pub dot_clock: u32,
    pub h_total: u32,
    pub v_total: u32,

    pub flags: ModeFlags,
}

impl ModeDescriptor {
    /// Vertical refresh in Hz, or 0 when either total is zero.
    pub fn refresh(&self) -> f64 {
        if self.h_total == 0 || self.v_total == 0 {
            return 0.0;
        }
        f64::from(self.dot_clock) / (f64::from(self.h_total) * f64::from(self.v_total))
    }

    pub fn is_doublescan(&self) -> bool {
        self.flags.contains(ModeFlags::DOUBLE_SCAN)
    }
}
