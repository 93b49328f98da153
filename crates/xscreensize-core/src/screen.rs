// Author: Dustin Pilgrim
// License: MIT

use serde::{Deserialize, Serialize};

/// The root surface of one X screen.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Screen {
    /// Screen number on the display connection.
    pub number: usize,

    /// Size in pixels.
    pub width: i32,
    pub height: i32,

    /// Physical size in millimetres, as reported by the server.
    pub mm_width: i32,
    pub mm_height: i32,
}
