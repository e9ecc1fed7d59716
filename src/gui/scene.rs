use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Point3, Translation3, UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::catalog::{BodyDescriptor, Catalog};
use crate::kinematics::{circular_position, Kinematics};

const RING_SEGMENTS: usize = 64;
const RING_COLOR: Point3<f32> = Point3 {
    coords: Vector3::new(0.4, 0.4, 0.4),
};
const STARFIELD_RADIUS: f32 = 1000.0;
const STARFIELD_SEED: u64 = 0x5741_u64;

struct BodyNodes {
    /// Pivot translated to the body's position; moons hang off their
    /// planet's pivot, so their translations are parent-relative.
    pivot: SceneNode,
    /// The sphere itself, spun about its local axis.
    sphere: SceneNode,
}

/// Owns the renderable scene: one sphere per catalog body, the orbit rings,
/// and the background starfield. Each frame it advances the kinematics and
/// pushes the resulting angles into node transforms, maintaining the
/// name-to-world-position table that camera tracking reads.
pub struct SceneComposer {
    catalog: Catalog,
    kinematics: Kinematics,
    star_sphere: SceneNode,
    bodies: HashMap<String, BodyNodes>,
    /// World positions as of the last update. Empty until the first frame
    /// has placed the nodes; lookups before that report "not yet placed".
    positions: HashMap<String, Point3<f32>>,
    stars: Vec<(Point3<f32>, Point3<f32>)>,
}

impl SceneComposer {
    pub fn new(window: &mut Window, catalog: Catalog, texture_dir: &Path, star_count: usize) -> Self {
        let mut star_sphere = window.add_sphere(catalog.star().radius);
        let color = &catalog.star().color;
        star_sphere.set_color(color.x, color.y, color.z);
        apply_texture(&mut star_sphere, texture_dir, catalog.star().texture.as_deref());

        let mut bodies = HashMap::new();
        for planet in catalog.planets() {
            let mut pivot = window.add_group();
            let sphere = make_sphere(&mut pivot, planet, texture_dir);
            bodies.insert(planet.name.clone(), BodyNodes { pivot: pivot.clone(), sphere });

            for moon in &planet.moons {
                let mut moon_pivot = pivot.add_group();
                let moon_sphere = make_sphere(&mut moon_pivot, moon, texture_dir);
                bodies.insert(
                    moon.name.clone(),
                    BodyNodes {
                        pivot: moon_pivot,
                        sphere: moon_sphere,
                    },
                );
            }
        }

        let kinematics = Kinematics::new(&catalog);

        SceneComposer {
            catalog,
            kinematics,
            star_sphere,
            bodies,
            positions: HashMap::new(),
            stars: scatter_stars(star_count),
        }
    }

    /// Advance all orbital/spin accumulators by `dt` and reposition every
    /// node accordingly.
    pub fn update(&mut self, dt: f64) {
        self.kinematics.advance(dt);

        let star = self.catalog.star();
        self.positions.insert(star.name.clone(), Point3::origin());
        if let Some(motion) = self.kinematics.motion(&star.name) {
            self.star_sphere.set_local_rotation(spin_rotation(motion.spin_angle()));
        }

        for planet in self.catalog.planets() {
            let motion = match self.kinematics.motion(&planet.name) {
                Some(m) => m,
                None => continue,
            };
            let planet_pos = circular_position(planet.distance, motion.orbit_angle());
            if let Some(nodes) = self.bodies.get_mut(&planet.name) {
                nodes.pivot.set_local_translation(Translation3::from(planet_pos));
                nodes.sphere.set_local_rotation(spin_rotation(motion.spin_angle()));
            }
            self.positions
                .insert(planet.name.clone(), Point3::from(planet_pos));

            for moon in &planet.moons {
                let moon_motion = match self.kinematics.motion(&moon.name) {
                    Some(m) => m,
                    None => continue,
                };
                // Measured from the planet's surface, as in the catalog.
                let offset = circular_position(
                    planet.radius + moon.distance,
                    moon_motion.orbit_angle(),
                );
                if let Some(nodes) = self.bodies.get_mut(&moon.name) {
                    nodes.pivot.set_local_translation(Translation3::from(offset));
                    nodes
                        .sphere
                        .set_local_rotation(spin_rotation(moon_motion.spin_angle()));
                }
                self.positions
                    .insert(moon.name.clone(), Point3::from(planet_pos + offset));
            }
        }
    }

    /// Live world position of a body, or `None` if its node has not been
    /// placed yet.
    pub fn world_position(&self, name: &str) -> Option<Point3<f32>> {
        self.positions.get(name).copied()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Immediate-mode decorations: orbit rings and the starfield.
    pub fn draw(&self, window: &mut Window) {
        for planet in self.catalog.planets() {
            draw_ring(window, planet.distance, &RING_COLOR);
        }

        window.set_point_size(2.0);
        for (pt, color) in &self.stars {
            window.draw_point(pt, color);
        }
    }
}

fn make_sphere(parent: &mut SceneNode, body: &BodyDescriptor, texture_dir: &Path) -> SceneNode {
    let mut sphere = parent.add_sphere(body.radius);
    sphere.set_color(body.color.x, body.color.y, body.color.z);
    apply_texture(&mut sphere, texture_dir, body.texture.as_deref());
    sphere
}

fn apply_texture(node: &mut SceneNode, dir: &Path, file: Option<&str>) {
    let file = match file {
        Some(f) => f,
        None => return,
    };
    let path: PathBuf = dir.join(file);
    if path.exists() {
        node.set_texture_from_file(&path, file);
    } else {
        warn!(texture = %path.display(), "texture not found, using flat color");
    }
}

fn spin_rotation(angle: f64) -> UnitQuaternion<f32> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angle as f32)
}

fn draw_ring(window: &mut Window, radius: f32, color: &Point3<f32>) {
    let mut prev: Option<Point3<f32>> = None;
    for i in 0..=RING_SEGMENTS {
        let theta = 2.0 * std::f64::consts::PI * (i as f64) / (RING_SEGMENTS as f64);
        let pt = Point3::from(circular_position(radius, theta));
        if let Some(prev) = prev {
            window.draw_line(&prev, &pt, color);
        }
        prev = Some(pt);
    }
}

// Fixed-seed scatter so the sky doesn't reshuffle between runs.
fn scatter_stars(count: usize) -> Vec<(Point3<f32>, Point3<f32>)> {
    let mut rng = StdRng::seed_from_u64(STARFIELD_SEED);
    let mut stars = Vec::with_capacity(count);
    while stars.len() < count {
        let v = Vector3::new(
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0f32..1.0),
            rng.gen_range(-1.0f32..1.0),
        );
        let norm = v.norm();
        if norm < 1e-3 || norm > 1.0 {
            continue; // rejection-sample the unit ball for an even sky
        }
        let pt = Point3::from(v / norm * STARFIELD_RADIUS);
        let brightness = rng.gen_range(0.4f32..1.0);
        stars.push((pt, Point3::new(brightness, brightness, brightness)));
    }
    stars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_color_is_a_neutral_grey() {
        assert_eq!(RING_COLOR, Point3::new(0.4, 0.4, 0.4));
    }

    #[test]
    fn starfield_is_deterministic_and_on_the_sphere() {
        let a = scatter_stars(50);
        let b = scatter_stars(50);
        assert_eq!(a.len(), 50);
        for ((pa, _), (pb, _)) in a.iter().zip(&b) {
            assert_eq!(pa, pb);
            let r = pa.coords.norm();
            assert!((r - STARFIELD_RADIUS).abs() < 1.0);
        }
    }
}
