//! Duck Race entry point
//!
//! Native builds run a headless race and print the podium. The browser
//! build is driven from JavaScript through `duck_race::wasm::DuckRace`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use duck_race::consts::{DUCK_NAMES, SIM_DT};
    use duck_race::sim::{Participant, RacePhysics, SimRng};
    use duck_race::{ConfigError, RaceConfig};

    #[derive(Debug, Parser)]
    #[command(
        name = "duck-race",
        about = "Run a headless duck race and print the podium"
    )]
    pub struct Cli {
        /// Racer names (defaults to the demo field)
        pub names: Vec<String>,

        #[arg(long, help = "Optional path to a JSON race config")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Fixed RNG seed for a reproducible race")]
        pub seed: Option<u64>,

        #[arg(long, default_value_t = 60.0, help = "Simulation frames per second")]
        pub fps: f32,

        #[arg(long, help = "Print the effective config as JSON and exit")]
        pub print_config: bool,
    }

    pub fn run(cli: Cli) -> Result<(), ConfigError> {
        let config = match &cli.config {
            Some(path) => RaceConfig::load_from_path(path)?,
            None => RaceConfig::default(),
        };

        if cli.print_config {
            println!("{}", config.to_json()?);
            return Ok(());
        }

        let roster: Vec<Participant> = if cli.names.is_empty() {
            DUCK_NAMES.iter().map(|&n| Participant::new(n)).collect()
        } else {
            cli.names.iter().map(|n| Participant::new(n.as_str())).collect()
        };

        let rng = cli.seed.map_or_else(SimRng::from_entropy, SimRng::new);
        log::info!("Race seed: {}", rng.seed());

        let dt = if cli.fps > 0.0 { 1.0 / cli.fps } else { SIM_DT };
        let mut engine = RacePhysics::with_rng(config, rng);
        engine.initialize(&roster);

        let mut elapsed = 0.0;
        let mut next_report = 1.0;
        while !engine.is_finished(elapsed) {
            elapsed += dt;
            engine.update(elapsed, dt);

            if elapsed >= next_report {
                if let Some(leader) = engine.leader() {
                    log::info!(
                        "{:>5.1}s leader: {} ({:.0})",
                        elapsed,
                        leader.name,
                        leader.position
                    );
                }
                next_report += 1.0;
            }
        }

        let podium = engine.determine_winners();
        if podium.is_empty() {
            println!("No racers.");
        }
        for f in podium.finishers() {
            println!(
                "{}. {:<12} {:>7.1}  ({} px/s)",
                f.place, f.name, f.position, f.avg_speed
            );
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Duck Race (native) starting...");

    if let Err(e) = native::run(native::Cli::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is duck_race::wasm::wasm_start, this is just to satisfy the compiler
}
