// Author: Dustin Pilgrim
// License: MIT

//! Mode lookup.
//!
//! A numeric id is unique in the catalog, so an id hit ends the scan. Names
//! are not: several modes can share "1920x1080" at different rates, so a
//! name lookup keeps the entry whose refresh is closest to the requested
//! one. With no requested rate every name hit ties and the first one wins.

use crate::identifier::{Identifier, Xid};
use crate::mode::ModeDescriptor;

/// Look a mode up in the whole catalog. `refresh` of 0 means "any rate".
pub fn find_mode<'a>(
    catalog: &'a [ModeDescriptor],
    name: &Identifier,
    refresh: f64,
) -> Option<&'a ModeDescriptor> {
    best_match(catalog, name, refresh, false)
}

pub fn find_mode_by_xid(catalog: &[ModeDescriptor], id: Xid) -> Option<&ModeDescriptor> {
    find_mode(catalog, &Identifier::from_xid(id), 0.0)
}

/// Look a mode up among the ones an output supports (`supported` ids).
///
/// Doublescan modes are skipped on the name path unless a rate is given.
/// Supported ids missing from the catalog are ignored.
pub fn find_mode_for_output<'a>(
    catalog: &'a [ModeDescriptor],
    supported: &[Xid],
    name: &Identifier,
    refresh: f64,
) -> Option<&'a ModeDescriptor> {
    let supported = supported
        .iter()
        .filter_map(|&id| find_mode_by_xid(catalog, id));

    best_match(supported, name, refresh, true)
}

fn best_match<'a, I>(
    modes: I,
    name: &Identifier,
    refresh: f64,
    skip_doublescan: bool,
) -> Option<&'a ModeDescriptor>
where
    I: IntoIterator<Item = &'a ModeDescriptor>,
{
    // NaN or infinite rates have no meaningful distance
    let refresh = if refresh.is_finite() { refresh } else { 0.0 };
    let mut best: Option<(&ModeDescriptor, f64)> = None;

    for mode in modes {
        if name.xid() == Some(mode.id) {
            return Some(mode);
        }

        if name.name() != Some(mode.name.as_str()) {
            continue;
        }

        if skip_doublescan && refresh == 0.0 && mode.is_doublescan() {
            continue;
        }

        let dist = if refresh != 0.0 {
            (mode.refresh() - refresh).abs()
        } else {
            0.0
        };

        // strict less-than: ties keep the earlier entry
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((mode, dist)),
        }
    }

    best.map(|(mode, _)| mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ModeFlags;

    /// Mode whose refresh is exactly `hz` (h_total * v_total = 1_000_000).
    fn mode(id: Xid, name: &str, hz: u32) -> ModeDescriptor {
        ModeDescriptor {
            id,
            name: name.into(),
            width: 1920,
            height: 1080,
            dot_clock: hz * 1_000_000,
            h_total: 1000,
            v_total: 1000,
            flags: ModeFlags::default(),
        }
    }

    fn doublescan(mut m: ModeDescriptor) -> ModeDescriptor {
        m.flags = m.flags | ModeFlags::DOUBLE_SCAN;
        m
    }

    fn catalog() -> Vec<ModeDescriptor> {
        vec![
            mode(1, "1920x1080", 60),
            mode(2, "1920x1080", 75),
            mode(3, "1920x1080", 144),
            mode(4, "1280x720", 60),
        ]
    }

    #[test]
    fn test_xid_is_exact() {
        let catalog = catalog();
        let found = find_mode_by_xid(&catalog, 3).unwrap();
        assert_eq!(found.id, 3);
        assert!(find_mode_by_xid(&catalog, 99).is_none());
    }

    #[test]
    fn test_xid_ignores_refresh_and_doublescan() {
        let catalog = vec![mode(1, "a", 60), doublescan(mode(2, "a", 30))];

        let found = find_mode(&catalog, &Identifier::from_xid(2), 60.0).unwrap();
        assert_eq!(found.id, 2);

        let found = find_mode_for_output(&catalog, &[1, 2], &Identifier::from_xid(2), 0.0).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_xid_wins_over_earlier_name_hit() {
        let catalog = catalog();
        let query = Identifier::from_xid(3).with_name("1920x1080");
        assert_eq!(find_mode(&catalog, &query, 60.0).unwrap().id, 3);
    }

    #[test]
    fn test_unknown_xid_falls_back_to_name() {
        let catalog = catalog();
        let query = Identifier::from_xid(99).with_name("1280x720");
        assert_eq!(find_mode(&catalog, &query, 0.0).unwrap().id, 4);
    }

    #[test]
    fn test_name_picks_closest_refresh() {
        let catalog = catalog();
        let name = Identifier::from_name("1920x1080");

        assert_eq!(find_mode(&catalog, &name, 70.0).unwrap().id, 2);
        assert_eq!(find_mode(&catalog, &name, 120.0).unwrap().id, 3);
        assert_eq!(find_mode(&catalog, &name, 1.0).unwrap().id, 1);
    }

    #[test]
    fn test_name_without_refresh_takes_first() {
        let catalog = catalog();
        let found = find_mode(&catalog, &Identifier::from_name("1920x1080"), 0.0).unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_name_tie_keeps_first_seen() {
        // 60 and 70 are both 5 Hz away from 65
        let catalog = vec![mode(7, "m", 70), mode(6, "m", 60)];
        let found = find_mode(&catalog, &Identifier::from_name("m"), 65.0).unwrap();
        assert_eq!(found.id, 7);
    }

    #[test]
    fn test_non_finite_refresh_is_no_target() {
        let catalog = catalog();
        let name = Identifier::from_name("1920x1080");

        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(find_mode(&catalog, &name, rate).unwrap().id, 1);
        }

        let supported = [1, 2, 3];
        let found = find_mode_for_output(&catalog, &supported, &name, f64::NAN).unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_no_match() {
        let catalog = catalog();
        assert!(find_mode(&catalog, &Identifier::from_name("640x480"), 0.0).is_none());
        assert!(find_mode(&catalog, &Identifier::none(), 60.0).is_none());
        assert!(find_mode(&[], &Identifier::from_xid(1), 0.0).is_none());
    }

    #[test]
    fn test_output_only_considers_supported_modes() {
        let catalog = catalog();
        let supported = [1, 2, 42];

        let found =
            find_mode_for_output(&catalog, &supported, &Identifier::from_name("1920x1080"), 144.0)
                .unwrap();
        assert_eq!(found.id, 2);

        assert!(
            find_mode_for_output(&catalog, &supported, &Identifier::from_name("1280x720"), 0.0)
                .is_none()
        );
    }

    #[test]
    fn test_output_skips_doublescan_without_refresh() {
        let catalog = vec![doublescan(mode(1, "320x240", 120)), mode(2, "320x240", 60)];
        let supported = [1, 2];
        let name = Identifier::from_name("320x240");

        assert_eq!(find_mode_for_output(&catalog, &supported, &name, 0.0).unwrap().id, 2);
        assert_eq!(find_mode_for_output(&catalog, &supported, &name, 120.0).unwrap().id, 1);

        // the catalog-wide lookup does not filter
        assert_eq!(find_mode(&catalog, &name, 0.0).unwrap().id, 1);
    }

    #[test]
    fn test_output_only_doublescan_without_refresh() {
        let catalog = vec![doublescan(mode(1, "320x240", 120))];
        let name = Identifier::from_name("320x240");
        assert!(find_mode_for_output(&catalog, &[1], &name, 0.0).is_none());
    }
}
