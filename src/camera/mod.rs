//! Camera tracking: the state machine that picks a desired pose each frame,
//! and the smoother that eases the actual pose toward it.

mod smoother;
mod tracking;

pub use smoother::{Pose, PoseSmoother};
pub use tracking::{CameraDirector, SelectError, Target};

use nalgebra::{Point3, Vector3};

/// Fixed overview pose: the whole system in frame, looking at the Sun.
// Built through `coords` because `Point3::new` is not const in this
// nalgebra version.
pub const OVERVIEW_POSITION: Point3<f32> = Point3 {
    coords: Vector3::new(0.0, 15.0, 25.0),
};

/// Chase offset behind and above a tracked body.
pub const CHASE_OFFSET: Vector3<f32> = Vector3::new(0.0, 2.0, 4.0);

/// Overview settles gently; tracking converges faster so a target switch
/// feels responsive.
pub const ALPHA_OVERVIEW: f32 = 0.05;
pub const ALPHA_TRACKING: f32 = 0.08;

#[cfg(test)]
mod tests {
    use super::*;

    // The pose constants are plain-old-data built in const context; pin
    // their components so a construction change can't silently alter them.
    #[test]
    fn pose_constants_have_the_expected_components() {
        assert_eq!(OVERVIEW_POSITION, Point3::new(0.0, 15.0, 25.0));
        assert_eq!(CHASE_OFFSET, Vector3::new(0.0, 2.0, 4.0));
    }
}
