use shared::SimulationConfig;

const SIMULATION_TOML: &str = include_str!("../simulation.toml");

/// Simulation timings and limits baked in at build time.
///
/// A broken file never stops the page; the simulations run on defaults.
pub fn load_simulation_config() -> SimulationConfig {
    match SimulationConfig::from_toml(SIMULATION_TOML) {
        Ok(config) => config,
        Err(error) => {
            zoon::eprintln!("[Config] {error}; using default simulation settings");
            SimulationConfig::default()
        }
    }
}
