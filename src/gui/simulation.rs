use std::path::Path;
use std::time::Instant;

use kiss3d::camera::Camera;
use kiss3d::event::{Action, Event, EventManager, Key, WindowEvent};
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};
use nalgebra::{Point2, Point3};
use tracing::warn;

use crate::camera::{CameraDirector, Pose, PoseSmoother, OVERVIEW_POSITION};
use crate::catalog::{Catalog, OVERVIEW_NAME};

use super::camera::ChaseCamera;
use super::overlay;
use super::scene::SceneComposer;

// The window is capped at 60 FPS and the integrator runs on that fixed
// delta, so simulation speed is tied to the frame cap.
const FRAME_DT: f64 = 1.0 / 60.0;

// Key config, all in one place
const KEY_OVERVIEW: Key = Key::Key0;
const KEY_MERCURY: Key = Key::Key1;
const KEY_VENUS: Key = Key::Key2;
const KEY_EARTH: Key = Key::Key3;
const KEY_MARS: Key = Key::Key4;

/// Maps a pressed key to the logical target identifier fed to the camera
/// state machine. Anything unmapped is ignored.
fn target_for_key(key: Key) -> Option<&'static str> {
    match key {
        KEY_OVERVIEW => Some(OVERVIEW_NAME),
        KEY_MERCURY => Some("Mercury"),
        KEY_VENUS => Some("Venus"),
        KEY_EARTH => Some("Earth"),
        KEY_MARS => Some("Mars"),
        _ => None,
    }
}

struct FpsCounter {
    last: Instant,
    smoothed: f64,
}

impl FpsCounter {
    fn new() -> Self {
        FpsCounter {
            last: Instant::now(),
            smoothed: 0.0,
        }
    }

    fn tick(&mut self) -> f64 {
        let dt = self.last.elapsed().as_secs_f64();
        self.last = Instant::now();
        if dt > 0.0 {
            let instantaneous = 1.0 / dt;
            self.smoothed = if self.smoothed == 0.0 {
                instantaneous
            } else {
                0.95 * self.smoothed + 0.05 * instantaneous
            };
        }
        self.smoothed
    }
}

/// The per-frame driver. Each step runs, in order: input, kinematics,
/// camera state machine, pose smoother, then drawing. There is no hidden
/// dispatch; this is the whole tick.
pub struct Simulation {
    scene: SceneComposer,
    director: CameraDirector,
    smoother: PoseSmoother,
    camera: ChaseCamera,
    fps_counter: FpsCounter,
}

impl Simulation {
    pub fn new(
        window: &mut Window,
        catalog: Catalog,
        texture_dir: &Path,
        star_count: usize,
    ) -> Self {
        window.set_framerate_limit(Some(60));

        let scene = SceneComposer::new(window, catalog, texture_dir, star_count);
        let director = CameraDirector::new(scene.catalog());

        // The camera starts already settled at the overview pose.
        let initial = Pose::new(OVERVIEW_POSITION, Point3::origin());
        let smoother = PoseSmoother::new(initial);
        let camera = ChaseCamera::new(&initial);

        Simulation {
            scene,
            director,
            smoother,
            camera,
            fps_counter: FpsCounter::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: Event) {
        if let WindowEvent::Key(key, Action::Press, _) = event.value {
            if let Some(target) = target_for_key(key) {
                if let Err(err) = self.director.select(target) {
                    warn!(%err, "rejected selection");
                }
            }
        }
    }

    fn update_camera(&mut self) {
        let scene = &self.scene;
        let desired = self
            .director
            .desired_pose(|name| scene.world_position(name));
        // No desired pose means the target isn't placed yet; hold the
        // previous smoothed pose and retry next frame.
        if let Some(desired) = desired {
            self.smoother.step_toward(&desired, self.director.alpha());
        }
        self.camera.set_pose(self.smoother.pose());
    }

    fn draw_overlay(&mut self, window: &mut Window) {
        let font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);

        window.draw_text(
            &overlay::hud_text(self.director.target_name()),
            &Point2::origin(),
            50.0,
            &font,
            &text_color,
        );

        if let Some(facts) = overlay::facts_text(self.director.target_name()) {
            window.draw_text(&facts, &Point2::new(0.0, 500.0), 40.0, &font, &text_color);
        }

        let fps = self.fps_counter.tick();
        window.draw_text(
            &overlay::fps_text(fps),
            // draw_text coordinates are physical pixels, hence the factor
            // of two on the logical width
            &Point2::new(window.width() as f32 * 2.0 - 200.0, 0.0),
            40.0,
            &font,
            &text_color,
        );
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.scene.update(FRAME_DT);
        self.update_camera();
        self.scene.draw(window);
        self.draw_overlay(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_map_to_targets() {
        assert_eq!(target_for_key(Key::Key0), Some("overview"));
        assert_eq!(target_for_key(Key::Key1), Some("Mercury"));
        assert_eq!(target_for_key(Key::Key2), Some("Venus"));
        assert_eq!(target_for_key(Key::Key3), Some("Earth"));
        assert_eq!(target_for_key(Key::Key4), Some("Mars"));
        assert_eq!(target_for_key(Key::Key5), None);
        assert_eq!(target_for_key(Key::Space), None);
    }
}
