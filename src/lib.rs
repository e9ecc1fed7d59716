pub mod camera;
pub mod catalog;
pub mod gui;
pub mod kinematics;
