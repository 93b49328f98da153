// Author: Dustin Pilgrim
// License: MIT

use crate::controller::ControllerRegistry;
use crate::error::{ResolutionError, Result};
use crate::identifier::{Identifier, NONE, Xid};
use crate::mode::ModeDescriptor;
use crate::output::{ConnectionState, Output, UNRESOLVED};
use crate::resolve::find_mode_by_xid;
use crate::source::RawOutput;

/// Bind one raw output record to its crtc and mode.
pub(crate) fn assemble_output(
    xid: Xid,
    raw: &RawOutput,
    registry: &ControllerRegistry,
    catalog: &[ModeDescriptor],
) -> Result<Output> {
    let mut id = Identifier::from_xid(xid);
    if !raw.name.is_empty() && !id.has_name() {
        id.set_name(raw.name.as_str());
    }

    // crtc
    let controller = if raw.crtc == NONE {
        None
    } else {
        let wanted = Identifier::from_xid(raw.crtc);
        let found = registry
            .find(&wanted)
            .ok_or(ResolutionError::ControllerNotFound(wanted))?;

        if !raw.can_use_controller(found.xid) {
            return Err(ResolutionError::IncompatibleController {
                output: raw.name.clone(),
                controller: found.xid,
            });
        }
        Some(found)
    };

    // mode, taken from whatever the crtc is currently running
    let mode = match controller.and_then(|c| c.mode) {
        Some(mode_id) => Some(find_mode_by_xid(catalog, mode_id).ok_or_else(|| {
            ResolutionError::ModeNotReported {
                mode: mode_id,
                output: raw.name.clone(),
            }
        })?),
        None => None,
    };

    let mut output = Output {
        id,
        name: raw.name.clone(),
        connection: ConnectionState::from_raw(raw.connection),
        controller: controller.map(|c| c.xid),
        mode: mode.map(|m| m.id),
        supported_modes: raw.modes.clone(),
        has_details: false,
        refresh: 0.0,
        x: controller.map_or(0, |c| c.x),
        y: controller.map_or(0, |c| c.y),
        width: UNRESOLVED,
        height: UNRESOLVED,
        mm_width: UNRESOLVED,
        mm_height: UNRESOLVED,
    };

    if let Some(mode) = mode {
        output.has_details = true;
        output.refresh = mode.refresh();
        output.width = clamp_i32(mode.width);
        output.height = clamp_i32(mode.height);
        output.mm_width = clamp_i32(raw.mm_width);
        output.mm_height = clamp_i32(raw.mm_height);
    }

    Ok(output)
}

fn clamp_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Binding;
    use crate::screen::Screen;
    use crate::source::{RawController, StaticSource};

    fn registry(crtcs: &[(Xid, Xid)]) -> ControllerRegistry {
        let source = crtcs.iter().fold(StaticSource::new(Screen::default()), |s, &(id, mode)| {
            s.with_controller(
                id,
                RawController {
                    x: 100,
                    y: 200,
                    mode,
                    ..Default::default()
                },
            )
        });
        ControllerRegistry::load(&source).unwrap()
    }

    fn catalog() -> Vec<ModeDescriptor> {
        vec![ModeDescriptor {
            id: 0x55,
            name: "2560x1440".into(),
            width: 2560,
            height: 1440,
            dot_clock: 241_500_000,
            h_total: 2720,
            v_total: 1481,
            ..Default::default()
        }]
    }

    fn record(crtc: Xid, crtcs: Vec<Xid>) -> RawOutput {
        RawOutput {
            name: "HDMI-1".into(),
            connection: 0,
            crtc,
            mm_width: 597,
            mm_height: 336,
            crtcs,
            modes: vec![0x55],
        }
    }

    #[test]
    fn test_identifier_carries_xid_and_name() {
        let out = assemble_output(0x70, &record(NONE, vec![]), &registry(&[]), &[]).unwrap();
        assert_eq!(out.id.xid(), Some(0x70));
        assert_eq!(out.id.name(), Some("HDMI-1"));
        assert!(!out.id.has_index());
    }

    #[test]
    fn test_unnamed_record_has_xid_only() {
        let mut raw = record(NONE, vec![]);
        raw.name.clear();
        let out = assemble_output(0x70, &raw, &registry(&[]), &[]).unwrap();
        assert!(!out.id.has_name());
        assert_eq!(out.xid(), Some(0x70));
    }

    #[test]
    fn test_fully_resolved() {
        let out = assemble_output(
            0x70,
            &record(0x40, vec![0x40]),
            &registry(&[(0x40, 0x55)]),
            &catalog(),
        )
        .unwrap();

        assert_eq!(out.binding(), Binding::Resolved);
        assert!(out.has_details);
        assert_eq!((out.x, out.y), (100, 200));
        assert_eq!((out.width, out.height), (2560, 1440));
        assert_eq!((out.mm_width, out.mm_height), (597, 336));
        assert!((out.refresh - 59.951).abs() < 1e-3);
    }

    #[test]
    fn test_bound_without_mode() {
        let out = assemble_output(
            0x70,
            &record(0x40, vec![0x40]),
            &registry(&[(0x40, NONE)]),
            &catalog(),
        )
        .unwrap();

        assert_eq!(out.binding(), Binding::BoundNoMode);
        assert!(!out.has_details);
        assert_eq!((out.x, out.y), (100, 200));
        assert_eq!(out.width, UNRESOLVED);
        assert_eq!(out.mm_height, UNRESOLVED);
        assert_eq!(out.refresh, 0.0);
    }

    #[test]
    fn test_controller_not_found() {
        let err = assemble_output(
            0x70,
            &record(0x41, vec![0x41]),
            &registry(&[(0x40, NONE)]),
            &catalog(),
        )
        .unwrap_err();

        match err {
            ResolutionError::ControllerNotFound(id) => assert_eq!(id.xid(), Some(0x41)),
            other => panic!("expected ControllerNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_incompatible_controller() {
        let err = assemble_output(
            0x70,
            &record(0x40, vec![0x42]),
            &registry(&[(0x40, 0x55)]),
            &catalog(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ResolutionError::IncompatibleController { controller: 0x40, .. }
        ));
        assert_eq!(err.to_string(), "output HDMI-1 cannot use crtc 0x40");
    }

    #[test]
    fn test_mode_not_reported() {
        let err = assemble_output(
            0x70,
            &record(0x40, vec![0x40]),
            &registry(&[(0x40, 0x99)]),
            &catalog(),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "server did not report mode 0x99 for output HDMI-1"
        );
    }

    #[test]
    fn test_bound_mode_need_not_be_in_supported_list() {
        let mut raw = record(0x40, vec![0x40]);
        raw.modes.clear();
        let out = assemble_output(0x70, &raw, &registry(&[(0x40, 0x55)]), &catalog()).unwrap();
        assert_eq!(out.mode, Some(0x55));
    }
}
