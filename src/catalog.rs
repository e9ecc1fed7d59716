use std::collections::HashSet;

use nalgebra::Point3;
use thiserror::Error;

/// Reserved camera-target identifier; never a valid body name.
pub const OVERVIEW_NAME: &str = "overview";

// Real ratios maintained but compressed for screen viewing
pub const SCALE_FACTOR: f32 = 0.1;
pub const DISTANCE_SCALE: f32 = 0.02;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate body name {0:?}")]
    DuplicateName(String),
    #[error("body name {0:?} collides with the reserved overview target")]
    ReservedName(String),
    #[error("body {name:?} has non-positive {field}")]
    NonPositive { name: String, field: &'static str },
    #[error("body {0:?} has a zero rotation period")]
    ZeroRotationPeriod(String),
    #[error("moon {0:?} may not have moons of its own")]
    NestedMoons(String),
}

/// Everything we know about a planet or moon. Purely descriptive; the
/// per-frame angles live in `kinematics`.
#[derive(Debug, Clone)]
pub struct BodyDescriptor {
    pub name: String,
    pub radius: f32,
    /// Orbit radius, measured from the parent body.
    pub distance: f32,
    /// Simulation-time units per revolution around the parent. Always
    /// positive; orbits are counter-clockwise in the reference plane.
    pub orbital_period: f64,
    /// Sign encodes spin direction (negative = retrograde, i.e. Venus).
    pub rotation_period: f64,
    pub color: Point3<f32>,
    pub texture: Option<String>,
    pub bump_map: Option<String>,
    pub moons: Vec<BodyDescriptor>,
}

/// The central body. No orbital elements, and it emits light rather than
/// reflecting it.
#[derive(Debug, Clone)]
pub struct StarDescriptor {
    pub name: String,
    pub radius: f32,
    pub rotation_period: f64,
    pub color: Point3<f32>,
    pub texture: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    star: StarDescriptor,
    planets: Vec<BodyDescriptor>,
}

impl Catalog {
    /// Validates the whole catalog up front, so the render loop never sees
    /// a zero period or an ambiguous name.
    pub fn new(star: StarDescriptor, planets: Vec<BodyDescriptor>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        check_name(&star.name, &mut seen)?;
        check_positive(&star.name, "radius", f64::from(star.radius))?;
        check_period(&star.name, star.rotation_period)?;

        for planet in &planets {
            check_body(planet, &mut seen)?;
            for moon in &planet.moons {
                if !moon.moons.is_empty() {
                    return Err(CatalogError::NestedMoons(moon.name.clone()));
                }
                check_body(moon, &mut seen)?;
            }
        }

        Ok(Catalog { star, planets })
    }

    pub fn star(&self) -> &StarDescriptor {
        &self.star
    }

    pub fn planets(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.planets.iter()
    }

    /// All body names, central body and moons included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.star.name.as_str()).chain(self.planets.iter().flat_map(|p| {
            std::iter::once(p.name.as_str()).chain(p.moons.iter().map(|m| m.name.as_str()))
        }))
    }

    /// The built-in catalog: the four inner planets plus the Moon, scaled
    /// for screen viewing.
    pub fn solar_system() -> Result<Self, CatalogError> {
        let star = StarDescriptor {
            name: "Sun".to_owned(),
            radius: 10.0 * SCALE_FACTOR,
            rotation_period: 27.0,
            color: parse_color("FFD700"),
            texture: Some("sunmap.jpg".to_owned()),
        };

        let planets = vec![
            BodyDescriptor {
                name: "Mercury".to_owned(),
                radius: 0.38 * SCALE_FACTOR,
                distance: 38.7 * DISTANCE_SCALE,
                orbital_period: 0.24,
                rotation_period: 58.6,
                color: parse_color("8C7853"),
                texture: Some("mercurymap.jpg".to_owned()),
                bump_map: Some("mercurybump.jpg".to_owned()),
                moons: vec![],
            },
            BodyDescriptor {
                name: "Venus".to_owned(),
                radius: 0.95 * SCALE_FACTOR,
                distance: 72.3 * DISTANCE_SCALE,
                orbital_period: 0.62,
                rotation_period: -243.0, // retrograde
                color: parse_color("FFC649"),
                texture: Some("venusmap.jpg".to_owned()),
                bump_map: Some("venusbump.jpg".to_owned()),
                moons: vec![],
            },
            BodyDescriptor {
                name: "Earth".to_owned(),
                radius: 1.0 * SCALE_FACTOR,
                distance: 100.0 * DISTANCE_SCALE,
                orbital_period: 1.0,
                rotation_period: 1.0,
                color: parse_color("FFFFFF"),
                texture: Some("earthmap1k.jpg".to_owned()),
                bump_map: Some("earthbump1k.jpg".to_owned()),
                moons: vec![BodyDescriptor {
                    name: "Moon".to_owned(),
                    radius: 0.27 * SCALE_FACTOR,
                    distance: 3.0 * DISTANCE_SCALE,
                    orbital_period: 0.075, // ~27 days
                    rotation_period: 1.0,
                    color: parse_color("FFFFFF"),
                    texture: Some("moonmap1k.jpg".to_owned()),
                    bump_map: Some("moonbump1k.jpg".to_owned()),
                    moons: vec![],
                }],
            },
            BodyDescriptor {
                name: "Mars".to_owned(),
                radius: 0.53 * SCALE_FACTOR,
                distance: 152.1 * DISTANCE_SCALE,
                orbital_period: 1.88,
                rotation_period: 1.03,
                color: parse_color("CD5C5C"),
                texture: Some("marsmap1k.jpg".to_owned()),
                bump_map: Some("marsbump1k.jpg".to_owned()),
                moons: vec![],
            },
        ];

        Catalog::new(star, planets)
    }
}

fn check_name(name: &str, seen: &mut HashSet<String>) -> Result<(), CatalogError> {
    if name == OVERVIEW_NAME {
        return Err(CatalogError::ReservedName(name.to_owned()));
    }
    if !seen.insert(name.to_owned()) {
        return Err(CatalogError::DuplicateName(name.to_owned()));
    }
    Ok(())
}

fn check_positive(name: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value <= 0.0 {
        return Err(CatalogError::NonPositive {
            name: name.to_owned(),
            field,
        });
    }
    Ok(())
}

fn check_period(name: &str, rotation_period: f64) -> Result<(), CatalogError> {
    if rotation_period == 0.0 {
        return Err(CatalogError::ZeroRotationPeriod(name.to_owned()));
    }
    Ok(())
}

fn check_body(body: &BodyDescriptor, seen: &mut HashSet<String>) -> Result<(), CatalogError> {
    check_name(&body.name, seen)?;
    check_positive(&body.name, "radius", f64::from(body.radius))?;
    check_positive(&body.name, "distance", f64::from(body.distance))?;
    check_positive(&body.name, "orbital period", body.orbital_period)?;
    check_period(&body.name, body.rotation_period)
}

// Hex triplet, e.g. "CD5C5C" for Mars.
fn parse_color(s: &str) -> Point3<f32> {
    assert_eq!(s.len(), 6);
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).expect("bad hex color in catalog") as f32 / 255.0
    };
    Point3::new(channel(0..2), channel(2..4), channel(4..6))
}
