use std::collections::HashSet;

use nalgebra::Point3;
use thiserror::Error;
use tracing::info;

use crate::catalog::{Catalog, OVERVIEW_NAME};

use super::{Pose, ALPHA_OVERVIEW, ALPHA_TRACKING, CHASE_OFFSET, OVERVIEW_POSITION};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("unknown camera target {0:?}")]
    UnknownTarget(String),
}

/// What the camera is pointed at: the fixed overview, or a live body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Overview,
    Body(String),
}

impl Target {
    pub fn name(&self) -> &str {
        match self {
            Target::Overview => OVERVIEW_NAME,
            Target::Body(name) => name,
        }
    }
}

/// The camera's tracking state machine.
///
/// Selection commands are validated here, at the boundary: an unknown name
/// is rejected before it can become a state, so the per-frame pose
/// computation is total over its inputs. The set of valid names is frozen
/// from the catalog at construction.
pub struct CameraDirector {
    target: Target,
    valid_names: HashSet<String>,
}

impl CameraDirector {
    pub fn new(catalog: &Catalog) -> Self {
        CameraDirector {
            target: Target::Overview,
            valid_names: catalog.names().map(str::to_owned).collect(),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The current target as a display string, for the overlay.
    pub fn target_name(&self) -> &str {
        self.target.name()
    }

    /// Switch targets. Rejects unknown names and leaves the current target
    /// unchanged in that case.
    pub fn select(&mut self, id: &str) -> Result<(), SelectError> {
        if id == OVERVIEW_NAME {
            self.target = Target::Overview;
        } else if self.valid_names.contains(id) {
            self.target = Target::Body(id.to_owned());
        } else {
            return Err(SelectError::UnknownTarget(id.to_owned()));
        }
        info!(name = id, "camera target switched");
        Ok(())
    }

    /// The pose the camera wants this frame.
    ///
    /// Overview never consults `world_position`. Tracking returns `None`
    /// while the body's node has not been placed yet (assets still
    /// loading); the caller holds the previous smoothed pose and retries
    /// next frame.
    pub fn desired_pose<F>(&self, world_position: F) -> Option<Pose>
    where
        F: Fn(&str) -> Option<Point3<f32>>,
    {
        match &self.target {
            Target::Overview => Some(Pose::new(OVERVIEW_POSITION, Point3::origin())),
            Target::Body(name) => {
                let body_pos = world_position(name)?;
                Some(Pose::new(body_pos + CHASE_OFFSET, body_pos))
            }
        }
    }

    /// Smoothing factor for the current mode.
    pub fn alpha(&self) -> f32 {
        match self.target {
            Target::Overview => ALPHA_OVERVIEW,
            Target::Body(_) => ALPHA_TRACKING,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::Catalog;

    fn director() -> CameraDirector {
        CameraDirector::new(&Catalog::solar_system().unwrap())
    }

    #[test]
    fn starts_at_overview() {
        let director = director();
        assert_eq!(*director.target(), Target::Overview);
        assert_eq!(director.target_name(), "overview");
    }

    #[test]
    fn rejects_unknown_target_without_changing_state() {
        let mut director = director();
        director.select("Earth").unwrap();

        let err = director.select("Pluto").unwrap_err();
        assert_eq!(err, SelectError::UnknownTarget("Pluto".to_owned()));
        assert_eq!(*director.target(), Target::Body("Earth".to_owned()));
    }

    #[test]
    fn overview_pose_never_queries_body_positions() {
        let director = director();
        // A lookup that panics proves the overview arm doesn't touch it.
        let pose = director
            .desired_pose(|_| panic!("overview should not resolve body positions"))
            .unwrap();
        assert_eq!(pose.position, OVERVIEW_POSITION);
        assert_eq!(pose.look_at, Point3::origin());
    }

    #[test]
    fn tracking_pose_is_offset_from_body() {
        let mut director = director();
        director.select("Mars").unwrap();

        let body = Point3::new(3.0, 0.0, -1.0);
        let pose = director.desired_pose(|name| {
            assert_eq!(name, "Mars");
            Some(body)
        });
        let pose = pose.unwrap();
        assert_relative_eq!(pose.position.y, body.y + CHASE_OFFSET.y);
        assert_relative_eq!(pose.position.z, body.z + CHASE_OFFSET.z);
        assert_eq!(pose.look_at, body);
    }

    #[test]
    fn tracking_pose_absent_until_body_is_placed() {
        let mut director = director();
        director.select("Venus").unwrap();
        assert!(director.desired_pose(|_| None).is_none());
    }

    #[test]
    fn moons_are_valid_targets() {
        let mut director = director();
        director.select("Moon").unwrap();
        assert_eq!(director.target_name(), "Moon");
    }

    #[test]
    fn tracking_converges_faster_than_overview() {
        let mut director = director();
        let overview_alpha = director.alpha();
        director.select("Earth").unwrap();
        assert!(director.alpha() > overview_alpha);
    }
}
