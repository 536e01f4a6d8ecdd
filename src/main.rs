use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use elevator_dispatch::dispatch::{
    DispatchParams, LookPolicy, DEFAULT_ALPHA, DEFAULT_BEHIND_PENALTY, DEFAULT_BETA,
    DEFAULT_GAMMA, DEFAULT_OPPOSITE_PENALTY,
};
use elevator_dispatch::simulation::{
    BuildingConfig, SimWorld, DEFAULT_CAPACITY, DEFAULT_ELEVATORS, DEFAULT_FLOORS,
    DEFAULT_SPAWN_RATE, DEFAULT_SPEED,
};

#[derive(Parser)]
#[command(name = "elevator_dispatch")]
#[command(about = "LOOK elevator dispatch running against a headless building")]
struct Cli {
    /// Number of ticks during which passengers are spawned
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Extra ticks allowed for delivering the remaining passengers
    #[arg(long, default_value = "2000")]
    drain_ticks: u64,

    /// Print a summary every this many ticks (0 disables)
    #[arg(long, default_value = "100")]
    report_every: u64,

    /// Wall-clock delay between reports in milliseconds
    #[arg(long, default_value = "0")]
    tick_delay_ms: u64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = DEFAULT_FLOORS)]
    floors: u32,

    #[arg(long, default_value_t = DEFAULT_ELEVATORS)]
    elevators: usize,

    /// Passengers per car
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Floors travelled per tick
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: f32,

    /// Probability of a new passenger each tick
    #[arg(long, default_value_t = DEFAULT_SPAWN_RATE)]
    spawn_rate: f64,

    /// Distance weight
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: f64,

    /// Load weight
    #[arg(long, default_value_t = DEFAULT_BETA)]
    beta: f64,

    /// Direction penalty weight
    #[arg(long, default_value_t = DEFAULT_GAMMA)]
    gamma: f64,

    /// Penalty for an elevator that already passed the caller
    #[arg(long, default_value_t = DEFAULT_BEHIND_PENALTY)]
    behind_penalty: f64,

    /// Penalty for an elevator heading the other way
    #[arg(long, default_value_t = DEFAULT_OPPOSITE_PENALTY)]
    opposite_penalty: f64,
}

impl Cli {
    fn building(&self) -> BuildingConfig {
        BuildingConfig {
            floors: self.floors,
            elevators: self.elevators,
            capacity: self.capacity,
            speed: self.speed,
            spawn_rate: self.spawn_rate,
        }
    }

    fn params(&self) -> DispatchParams {
        DispatchParams {
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
            behind_penalty: self.behind_penalty,
            opposite_penalty: self.opposite_penalty,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run_headless(&cli)
}

/// Run the dispatcher against the simulated building (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    let policy = LookPolicy::new(cli.params());
    let mut world = match cli.seed {
        Some(seed) => SimWorld::new_with_seed(cli.building(), policy, seed)?,
        None => SimWorld::new(cli.building(), policy)?,
    };

    info!(
        "Running {} ticks on {} floors with {} elevator(s)",
        cli.ticks,
        cli.floors,
        cli.elevators
    );

    println!("Initial state:");
    world.print_summary();
    world.draw_shafts();

    while world.tick < cli.ticks {
        world.tick();

        if cli.report_every > 0 && world.tick % cli.report_every == 0 {
            println!("--- After tick {} ---", world.tick);
            world.print_summary();
            world.draw_shafts();

            if cli.tick_delay_ms > 0 {
                std::thread::sleep(std::time::Duration::from_millis(cli.tick_delay_ms));
            }
        }
    }

    match world.run_until_drained(cli.drain_ticks) {
        Ok(extra) => info!("All passengers delivered {} tick(s) after spawning stopped", extra),
        Err(e) => warn!("{:#}", e),
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_shafts();

    world.stats.log_summary(world.tick);
    Ok(())
}
