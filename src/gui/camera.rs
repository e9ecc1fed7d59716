use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point3, Vector3};

use crate::camera::Pose;

const ZNEAR: f32 = 0.1;
const ZFAR: f32 = 2000.0;

// Unlike ArcBall, this camera takes no pointer input at all: every frame the
// tracking state machine hands it a smoothed eye/look-at pair, and that is
// the whole story. It only listens for framebuffer resizes to keep the
// projection's aspect ratio honest.
pub struct ChaseCamera {
    eye: Point3<f32>,
    at: Point3<f32>,
    width: u32,
    height: u32,
    fovy: f32,
}

impl ChaseCamera {
    pub fn new(initial: &Pose) -> Self {
        ChaseCamera {
            eye: initial.position,
            at: initial.look_at,
            width: 800,
            height: 600,
            fovy: PI / 4.0,
        }
    }

    pub fn set_pose(&mut self, pose: &Pose) {
        self.eye = pose.position;
        self.at = pose.look_at;
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            ZNEAR,
            ZFAR,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }
}

impl Camera for ChaseCamera {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.width = w;
            self.height = h;
        }
    }

    fn eye(&self) -> Point3<f32> {
        self.eye
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye, &self.at, &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        self.transformation().try_inverse().unwrap()
    }

    fn clip_planes(&self) -> (f32, f32) {
        (ZNEAR, ZFAR)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}
