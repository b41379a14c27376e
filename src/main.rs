use particle_engine::config::SimulationConfig;
use particle_engine::core::{Simulation, SimulationResult};
use std::path::PathBuf;

fn run() -> SimulationResult<()> {
    let (mut config, source) = match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            (SimulationConfig::from_file(&path)?, Some(path))
        }
        None => SimulationConfig::load_or_default(),
    };
    config.apply_env_overrides();

    Simulation::initialize_logging(&config.logging);
    match source {
        Some(path) => tracing::info!(target: "config", "Loaded config from {}", path.display()),
        None => tracing::info!(target: "config", "Using default configuration"),
    }

    if config.emitters.is_empty() {
        tracing::warn!(target: "simulation", "No emitters configured, using Fire preset");
        let mut fire = particle_engine::render::ParticlePreset::Fire.to_config();
        fire.x = 400.0;
        fire.y = 500.0;
        config.emitters.push(fire);
    }

    let mut simulation = Simulation::new(&config)?;
    simulation.run()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}
