mod camera;
mod overlay;
mod scene;
mod simulation;

pub use simulation::Simulation;
