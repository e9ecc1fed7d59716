use std::path::PathBuf;

use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solar_orrery::catalog::{Catalog, CatalogError};
use solar_orrery::gui::Simulation;

#[derive(Debug, Parser)]
struct Args {
    /// Directory holding the optional planet texture maps
    #[arg(long, default_value = "textures")]
    texture_dir: PathBuf,

    /// Number of background stars
    #[arg(long, default_value_t = 400)]
    stars: usize,
}

fn main() -> Result<(), CatalogError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // An invalid catalog must never reach the render loop.
    let catalog = Catalog::solar_system()?;
    info!(bodies = catalog.names().count(), "catalog loaded");

    let mut window = Window::new("Solar System Orrery");
    window.set_background_color(0.0, 0.0, 0.0);
    window.set_light(Light::StickToCamera);

    let simulation = Simulation::new(&mut window, catalog, &args.texture_dir, args.stars);
    window.render_loop(simulation);
    Ok(())
}
