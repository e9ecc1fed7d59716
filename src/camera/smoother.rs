use nalgebra::Point3;

/// A camera pose before projection: where the eye sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Point3<f32>,
    pub look_at: Point3<f32>,
}

impl Pose {
    pub fn new(position: Point3<f32>, look_at: Point3<f32>) -> Self {
        Pose { position, look_at }
    }
}

/// Exponential interpolation of the actual camera pose toward the desired
/// one: `smoothed += alpha * (desired - smoothed)` each frame.
///
/// Deliberately not a damped spring. Convergence is geometric (the residual
/// shrinks by `1 - alpha` per frame) and never exactly reaches the target,
/// which is fine; the success criterion is visual, not exact equality.
/// Frames with no desired pose (body not placed yet) simply hold the
/// previous pose; missed targets are never buffered.
#[derive(Debug, Clone, Copy)]
pub struct PoseSmoother {
    pose: Pose,
}

impl PoseSmoother {
    pub fn new(initial: Pose) -> Self {
        PoseSmoother { pose: initial }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn step_toward(&mut self, desired: &Pose, alpha: f32) {
        self.pose.position += (desired.position - self.pose.position) * alpha;
        self.pose.look_at += (desired.look_at - self.pose.look_at) * alpha;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{distance, Point3};

    use super::*;

    fn fixed_target() -> Pose {
        Pose::new(Point3::new(10.0, 4.0, -6.0), Point3::new(10.0, 0.0, -6.0))
    }

    #[test]
    fn converges_geometrically() {
        let desired = fixed_target();
        let mut smoother = PoseSmoother::new(Pose::new(Point3::origin(), Point3::origin()));

        let alpha = 0.08;
        let mut residual = distance(&smoother.pose().position, &desired.position);
        for _ in 0..50 {
            smoother.step_toward(&desired, alpha);
            let next = distance(&smoother.pose().position, &desired.position);
            assert_relative_eq!(next, residual * (1.0 - alpha), max_relative = 1e-4);
            residual = next;
        }
    }

    #[test]
    fn holding_leaves_pose_untouched() {
        let mut smoother = PoseSmoother::new(fixed_target());
        let before = *smoother.pose();
        // No step taken; nothing to assert beyond equality.
        assert_eq!(before, *smoother.pose());
    }

    #[test]
    fn look_at_tracks_independently_of_position() {
        let desired = Pose::new(Point3::new(0.0, 0.0, 0.0), Point3::new(8.0, 0.0, 0.0));
        let mut smoother = PoseSmoother::new(Pose::new(Point3::origin(), Point3::origin()));
        smoother.step_toward(&desired, 0.5);
        assert_relative_eq!(smoother.pose().look_at.x, 4.0);
        assert_relative_eq!(smoother.pose().position.x, 0.0);
    }
}
