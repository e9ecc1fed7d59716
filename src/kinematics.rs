use std::collections::HashMap;
use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::catalog::{BodyDescriptor, Catalog};

/// Speeds up simulation time so orbital motion is visible on screen.
pub const TIME_SCALE: f64 = 0.01;

/// Angular rate for a body with the given period, in radians per
/// simulation second. A negative period (retrograde spin) gives a negative
/// rate, so the sign convention falls out of the division.
pub fn angular_rate(period: f64) -> f64 {
    2.0 * PI * TIME_SCALE / period
}

/// Point on a counter-clockwise circle of the given radius in the orbital
/// plane (y-up, matching the renderer's coordinate system).
pub fn circular_position(radius: f32, angle: f64) -> Vector3<f32> {
    Vector3::new(
        radius * angle.cos() as f32,
        0.0,
        -radius * angle.sin() as f32,
    )
}

/// Orbit and spin accumulators for one body.
///
/// Angles are advanced incrementally (`angle += rate * dt`) once per frame
/// rather than recomputed from absolute time. With a variable frame delta
/// the wall-clock period is therefore only approximate; that is a known
/// characteristic of the accumulation scheme, not drift to be corrected.
/// Angles grow without bound; only their cosine/sine are ever consumed, so
/// no wrapping is needed.
#[derive(Debug, Clone, Copy)]
pub struct BodyMotion {
    orbit_angle: f64,
    spin_angle: f64,
    orbit_rate: f64,
    spin_rate: f64,
}

impl BodyMotion {
    fn new(orbital_period: f64, rotation_period: f64) -> Self {
        BodyMotion {
            orbit_angle: 0.0,
            spin_angle: 0.0,
            orbit_rate: angular_rate(orbital_period),
            spin_rate: angular_rate(rotation_period),
        }
    }

    /// Spin-only motion for the central body.
    fn fixed(rotation_period: f64) -> Self {
        BodyMotion {
            orbit_angle: 0.0,
            spin_angle: 0.0,
            orbit_rate: 0.0,
            spin_rate: angular_rate(rotation_period),
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.orbit_angle += self.orbit_rate * dt;
        self.spin_angle += self.spin_rate * dt;
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn spin_angle(&self) -> f64 {
        self.spin_angle
    }
}

/// One accumulator per catalog body, keyed by name. The catalog has already
/// rejected zero periods, so rate construction can't divide by zero.
pub struct Kinematics {
    motions: HashMap<String, BodyMotion>,
}

impl Kinematics {
    pub fn new(catalog: &Catalog) -> Self {
        let mut motions = HashMap::new();

        let star = catalog.star();
        motions.insert(star.name.clone(), BodyMotion::fixed(star.rotation_period));

        for planet in catalog.planets() {
            insert_body(&mut motions, planet);
            for moon in &planet.moons {
                insert_body(&mut motions, moon);
            }
        }

        Kinematics { motions }
    }

    pub fn advance(&mut self, dt: f64) {
        for motion in self.motions.values_mut() {
            motion.advance(dt);
        }
    }

    pub fn motion(&self, name: &str) -> Option<&BodyMotion> {
        self.motions.get(name)
    }
}

fn insert_body(motions: &mut HashMap<String, BodyMotion>, body: &BodyDescriptor) {
    motions.insert(
        body.name.clone(),
        BodyMotion::new(body.orbital_period, body.rotation_period),
    );
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::Catalog;

    const FRAME_DT: f64 = 1.0 / 60.0;

    #[test]
    fn spin_accumulates_linearly() {
        let mut motion = BodyMotion::new(1.0, 58.6);
        for _ in 0..120 {
            motion.advance(FRAME_DT);
        }
        let expected = 120.0 * FRAME_DT * 2.0 * PI * TIME_SCALE / 58.6;
        assert_relative_eq!(motion.spin_angle(), expected, max_relative = 1e-12);
    }

    #[test]
    fn retrograde_spin_is_negative() {
        let mut motion = BodyMotion::new(0.62, -243.0);
        for _ in 0..60 {
            motion.advance(FRAME_DT);
        }
        let expected = -60.0 * FRAME_DT * 2.0 * PI * TIME_SCALE / 243.0;
        assert_relative_eq!(motion.spin_angle(), expected, max_relative = 1e-12);
        assert!(motion.spin_angle() < 0.0);
        // The orbit still runs counter-clockwise.
        assert!(motion.orbit_angle() > 0.0);
    }

    #[test]
    fn central_body_does_not_orbit() {
        let catalog = Catalog::solar_system().unwrap();
        let mut kinematics = Kinematics::new(&catalog);
        kinematics.advance(1.0);

        let sun = kinematics.motion("Sun").unwrap();
        assert_eq!(sun.orbit_angle(), 0.0);
        assert!(sun.spin_angle() > 0.0);
    }

    #[test]
    fn closer_planets_orbit_faster() {
        let catalog = Catalog::solar_system().unwrap();
        let mut kinematics = Kinematics::new(&catalog);
        kinematics.advance(1.0);

        let mercury = kinematics.motion("Mercury").unwrap().orbit_angle();
        let earth = kinematics.motion("Earth").unwrap().orbit_angle();
        let mars = kinematics.motion("Mars").unwrap().orbit_angle();
        assert!(mercury > earth);
        assert!(earth > mars);
    }

    #[test]
    fn circular_position_is_counter_clockwise() {
        let start = circular_position(2.0, 0.0);
        assert_relative_eq!(start.x, 2.0);
        assert_relative_eq!(start.z, 0.0);

        // A quarter turn later the body has swung toward -z.
        let quarter = circular_position(2.0, PI / 2.0);
        assert_relative_eq!(quarter.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(quarter.z, -2.0, epsilon = 1e-6);
    }
}
