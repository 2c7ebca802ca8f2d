//! Scaled solar-system catalog.
//!
//! Distances and radii are in scene units, not kilometres; speeds are the
//! visualisation's orbital-speed figures, turned into angular rates by the
//! integrator.

use crate::body::BodyKind;

/// One catalog row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub kind: BodyKind,
    pub radius: f64,
    /// Orbit radius; around the parent for moons, around the origin otherwise.
    pub distance: f64,
    pub speed: f64,
    pub tilt_deg: f64,
    pub color: u32,
    /// Parent body name for moons.
    pub parent: Option<&'static str>,
}

const fn star(name: &'static str, radius: f64, color: u32) -> CatalogEntry {
    CatalogEntry {
        name,
        kind: BodyKind::Star,
        radius,
        distance: 0.0,
        speed: 0.0,
        tilt_deg: 0.0,
        color,
        parent: None,
    }
}

const fn planet(
    name: &'static str,
    kind: BodyKind,
    radius: f64,
    distance: f64,
    speed: f64,
    tilt_deg: f64,
    color: u32,
) -> CatalogEntry {
    CatalogEntry {
        name,
        kind,
        radius,
        distance,
        speed,
        tilt_deg,
        color,
        parent: None,
    }
}

const fn moon(
    name: &'static str,
    parent: &'static str,
    radius: f64,
    distance: f64,
    speed: f64,
    color: u32,
) -> CatalogEntry {
    CatalogEntry {
        name,
        kind: BodyKind::Moon,
        radius,
        distance,
        speed,
        tilt_deg: 0.0,
        color,
        parent: Some(parent),
    }
}

pub const SUN: CatalogEntry = star("sun", 50.0, 0xFDB813);

pub const PLANETS: [CatalogEntry; 8] = [
    planet("mercury", BodyKind::Planet, 3.8, 150.0, 4.74, 0.034, 0x8C7853),
    planet("venus", BodyKind::Planet, 9.5, 220.0, 3.50, 177.4, 0xFFC649),
    planet("earth", BodyKind::Planet, 10.0, 300.0, 2.98, 23.4, 0x2233FF),
    planet("mars", BodyKind::Planet, 5.3, 400.0, 2.41, 25.2, 0xCD5C5C),
    planet("jupiter", BodyKind::Planet, 35.0, 600.0, 1.31, 3.1, 0xC88B3A),
    planet("saturn", BodyKind::Planet, 29.0, 850.0, 0.97, 26.7, 0xFAD5A5),
    planet("uranus", BodyKind::Planet, 20.0, 1100.0, 0.68, 97.8, 0x4FD0E7),
    planet("neptune", BodyKind::Planet, 19.0, 1350.0, 0.54, 28.3, 0x4166F5),
];

pub const DWARF_PLANETS: [CatalogEntry; 5] = [
    planet("ceres", BodyKind::DwarfPlanet, 2.4, 480.0, 1.78, 4.0, 0x9B8B7E),
    planet("pluto", BodyKind::DwarfPlanet, 2.4, 1600.0, 0.47, 122.5, 0xC4A582),
    planet("eris", BodyKind::DwarfPlanet, 2.3, 2200.0, 0.35, 44.0, 0xD4D4D4),
    planet("makemake", BodyKind::DwarfPlanet, 1.8, 1900.0, 0.41, 0.0, 0xB8967D),
    planet("haumea", BodyKind::DwarfPlanet, 2.0, 1850.0, 0.43, 0.0, 0xE8D4C0),
];

/// Major moons. Earth's moon is parked at a fixed offset and only spins.
pub const MOONS: [CatalogEntry; 13] = [
    moon("moon", "earth", 2.7, 25.0, 0.0, 0xAAAAAA),
    moon("phobos", "mars", 0.3, 15.0, 8.0, 0x8B7355),
    moon("deimos", "mars", 0.2, 25.0, 5.0, 0x9B8B7E),
    moon("io", "jupiter", 1.8, 50.0, 6.0, 0xFFD700),
    moon("europa", "jupiter", 1.6, 65.0, 5.0, 0xE8E8E8),
    moon("ganymede", "jupiter", 2.6, 85.0, 4.0, 0xB8B8B8),
    moon("callisto", "jupiter", 2.4, 105.0, 3.0, 0x8B8B8B),
    moon("titan", "saturn", 2.6, 70.0, 4.0, 0xFFA500),
    moon("rhea", "saturn", 0.8, 50.0, 5.0, 0xD3D3D3),
    moon("iapetus", "saturn", 0.7, 90.0, 3.0, 0xA9A9A9),
    moon("titania", "uranus", 0.8, 45.0, 4.0, 0xC0C0C0),
    moon("oberon", "uranus", 0.8, 60.0, 3.5, 0xB0B0B0),
    moon("triton", "neptune", 1.4, 40.0, 5.0, 0xE0E0E0),
];

/// Catalog rows in arena order (parents before children).
pub fn entries(include_dwarf_planets: bool, include_moons: bool) -> Vec<CatalogEntry> {
    let mut rows = vec![SUN];
    rows.extend_from_slice(&PLANETS);
    if include_dwarf_planets {
        rows.extend_from_slice(&DWARF_PLANETS);
    }
    if include_moons {
        rows.extend_from_slice(&MOONS);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parents_precede_moons() {
        let rows = entries(true, true);
        for (i, row) in rows.iter().enumerate() {
            if let Some(parent) = row.parent {
                let parent_idx = rows.iter().position(|r| r.name == parent).unwrap();
                assert!(parent_idx < i, "{} listed before {}", row.name, parent);
            }
        }
    }

    #[test]
    fn test_toggles_filter_rows() {
        let rows = entries(false, true);
        assert!(rows.iter().all(|r| r.kind != BodyKind::DwarfPlanet));
        assert!(rows.iter().any(|r| r.name == "io"));
        assert_eq!(entries(false, false).len(), 1 + PLANETS.len());
    }

    #[test]
    fn test_only_sun_is_central() {
        let rows = entries(true, true);
        let central: Vec<_> = rows.iter().filter(|r| r.distance == 0.0).collect();
        assert_eq!(central.len(), 1);
        assert_eq!(central[0].name, "sun");
    }

    #[test]
    fn test_names_are_unique() {
        let rows = entries(true, true);
        let mut names: Vec<_> = rows.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), rows.len());
    }
}
