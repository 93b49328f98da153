// Author: Dustin Pilgrim
// License: MIT
// RandR 1.2+ backend for the topology resolver

use eventline::{debug, info};
use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::randr::{self, ConnectionExt as RandrConnectionExt, ModeInfo};
use x11rb::protocol::xproto::Timestamp;
use x11rb::rust_connection::RustConnection;

use xscreensize_core::{
    DisplaySource, ModeDescriptor, ModeFlags, RawController, RawOutput, ResolutionError, Screen,
    Xid,
};

/// Oldest RandR version with crtc/output resources.
const RANDR_MAJOR: u32 = 1;
const RANDR_MINOR: u32 = 2;

/// A live X connection plus the screen resources fetched at connect time.
pub struct X11Source {
    conn: RustConnection,
    screen: Screen,
    crtcs: Vec<Xid>,
    outputs: Vec<Xid>,
    modes: Vec<ModeDescriptor>,
    config_timestamp: Timestamp,
}

impl X11Source {
    /// Open `display_name` (or `$DISPLAY`) and fetch screen resources.
    ///
    /// By default the server re-probes its outputs, which can be slow.
    /// `current` takes its cached configuration instead.
    pub fn connect(
        display_name: Option<&str>,
        screen: Option<usize>,
        current: bool,
    ) -> Result<Self, ResolutionError> {
        let shown_name = display_name
            .map(str::to_owned)
            .or_else(|| std::env::var("DISPLAY").ok())
            .unwrap_or_default();

        let (conn, default_screen) = RustConnection::connect(display_name).map_err(|e| {
            ResolutionError::Connection(format!("can't open display {shown_name}: {e}"))
        })?;
        debug!("connected to {shown_name}, default screen {default_screen}");

        let number = screen.unwrap_or(default_screen);
        let count = conn.setup().roots.len();
        if number >= count {
            return Err(ResolutionError::Connection(format!(
                "invalid screen number {number}, display has {count}"
            )));
        }

        check_randr(&conn)?;

        let root = &conn.setup().roots[number];
        let window = root.root;
        let screen = Screen {
            number,
            width: i32::from(root.width_in_pixels),
            height: i32::from(root.height_in_pixels),
            mm_width: i32::from(root.width_in_millimeters),
            mm_height: i32::from(root.height_in_millimeters),
        };

        let (crtcs, outputs, modes, config_timestamp) = if current {
            let res = conn
                .randr_get_screen_resources_current(window)
                .map_err(connection_error)?
                .reply()
                .map_err(|e| resources_error(&e))?;
            let modes = mode_catalog(&res.modes, &res.names);
            (res.crtcs, res.outputs, modes, res.config_timestamp)
        } else {
            let res = conn
                .randr_get_screen_resources(window)
                .map_err(connection_error)?
                .reply()
                .map_err(|e| resources_error(&e))?;
            let modes = mode_catalog(&res.modes, &res.names);
            (res.crtcs, res.outputs, modes, res.config_timestamp)
        };

        info!(
            "screen {number}: {} crtcs, {} outputs, {} modes (current={current})",
            crtcs.len(),
            outputs.len(),
            modes.len()
        );

        Ok(Self {
            conn,
            screen,
            crtcs,
            outputs,
            modes,
            config_timestamp,
        })
    }
}

impl DisplaySource for X11Source {
    fn screen(&self) -> Screen {
        self.screen
    }

    fn controller_ids(&self) -> Vec<Xid> {
        self.crtcs.clone()
    }

    fn controller_info(&self, id: Xid) -> Result<RawController, String> {
        let info = self
            .conn
            .randr_get_crtc_info(id, self.config_timestamp)
            .map_err(|e| e.to_string())?
            .reply()
            .map_err(|e| e.to_string())?;

        debug!(
            "crtc 0x{id:x}: {}x{}+{}+{} mode 0x{:x}",
            info.width, info.height, info.x, info.y, info.mode
        );

        Ok(RawController {
            x: i32::from(info.x),
            y: i32::from(info.y),
            width: u32::from(info.width),
            height: u32::from(info.height),
            mode: info.mode,
        })
    }

    fn output_ids(&self) -> Vec<Xid> {
        self.outputs.clone()
    }

    fn output_info(&self, id: Xid) -> Result<RawOutput, String> {
        let info = self
            .conn
            .randr_get_output_info(id, self.config_timestamp)
            .map_err(|e| e.to_string())?
            .reply()
            .map_err(|e| e.to_string())?;

        let name = String::from_utf8_lossy(&info.name).into_owned();
        debug!("output 0x{id:x} {name}: crtc 0x{:x}, {} modes", info.crtc, info.modes.len());

        Ok(RawOutput {
            name,
            connection: u8::from(info.connection),
            crtc: info.crtc,
            mm_width: info.mm_width,
            mm_height: info.mm_height,
            crtcs: info.crtcs,
            modes: info.modes,
        })
    }

    fn modes(&self) -> &[ModeDescriptor] {
        &self.modes
    }
}

fn check_randr(conn: &RustConnection) -> Result<(), ResolutionError> {
    let present = conn
        .extension_information(randr::X11_EXTENSION_NAME)
        .map_err(connection_error)?
        .is_some();
    if !present {
        return Err(ResolutionError::Connection("RandR extension missing".into()));
    }

    let version = conn
        .randr_query_version(RANDR_MAJOR, RANDR_MINOR)
        .map_err(connection_error)?
        .reply()
        .map_err(|_| ResolutionError::Connection("RandR extension missing".into()))?;

    let (major, minor) = (version.major_version, version.minor_version);
    debug!("RandR {major}.{minor}");

    if major < RANDR_MAJOR || (major == RANDR_MAJOR && minor < RANDR_MINOR) {
        return Err(ResolutionError::Connection(format!(
            "RandR version >{RANDR_MAJOR}.{RANDR_MINOR} is required, having {major}.{minor}"
        )));
    }
    Ok(())
}

fn connection_error(e: impl std::fmt::Display) -> ResolutionError {
    ResolutionError::Connection(format!("display connection error: {e}"))
}

fn resources_error(e: &impl std::fmt::Display) -> ResolutionError {
    ResolutionError::Connection(format!("could not get screen resources: {e}"))
}

fn mode_catalog(modes: &[ModeInfo], names: &[u8]) -> Vec<ModeDescriptor> {
    let names = split_names(modes.iter().map(|m| usize::from(m.name_len)), names);

    modes
        .iter()
        .zip(names)
        .map(|(m, name)| ModeDescriptor {
            id: m.id,
            name,
            width: u32::from(m.width),
            height: u32::from(m.height),
            dot_clock: m.dot_clock,
            h_total: u32::from(m.htotal),
            v_total: u32::from(m.vtotal),
            flags: ModeFlags(u32::from(m.mode_flags)),
        })
        .collect()
}

/// The server packs every mode name into one buffer, back to back, in mode
/// order. A truncated buffer yields empty names for the missing tail.
fn split_names(lengths: impl Iterator<Item = usize>, buf: &[u8]) -> Vec<String> {
    let mut offset = 0;

    lengths
        .map(|len| {
            let end = (offset + len).min(buf.len());
            let start = offset.min(end);
            offset += len;
            String::from_utf8_lossy(&buf[start..end]).into_owned()
        })
        .collect()
}
