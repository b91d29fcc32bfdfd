//! Headless wildfire scenario runner
//!
//! Generates a synthetic grid, ignites it and prints per-step progress plus
//! a final ASCII burn map. Useful for eyeballing model behaviour without a
//! rendering frontend.

use clap::{Parser, ValueEnum};
use wildfire_core::{
    AttributeProvider, Environmental, FirePhase, FuelDriven, Grid, GridConfig, GridPosition,
    PatchworkFuelProvider, SpreadRateModel, StepObserver, StepSnapshot, UniformProvider,
    WindDriven,
};

/// Which spread-rate model drives the run
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Model {
    /// Wind alignment only
    Wind,
    /// Fuel load only
    Fuel,
    /// Combined environmental (wind + slope + fuel + weather)
    Environmental,
}

/// Wildfire spread simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wildfire-demo")]
#[command(about = "Headless wildfire propagation demo", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 30)]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = 20)]
    height: u32,

    /// Real-world cell size in meters
    #[arg(long, default_value_t = 100.0)]
    cell_size: f64,

    /// Spread-rate model
    #[arg(short, long, value_enum, default_value = "wind")]
    model: Model,

    /// Wind speed in m/s
    #[arg(short, long, default_value_t = 10.0)]
    wind_speed: f64,

    /// Wind direction in degrees (90 = eastward spread)
    #[arg(long, default_value_t = 90.0)]
    wind_direction: f64,

    /// Temperature in °C
    #[arg(short, long, default_value_t = 35.0)]
    temperature: f64,

    /// Relative humidity in %
    #[arg(long, default_value_t = 30.0)]
    humidity: f64,

    /// Uniform fuel load in % (ignored with --patchwork)
    #[arg(short, long, default_value_t = 70.0)]
    fuel_load: f64,

    /// Use a seeded patchwork of random fuel regions instead of uniform fuel
    #[arg(long)]
    patchwork: bool,

    /// Patchwork region size in cells
    #[arg(long, default_value_t = 5)]
    region_size: u32,

    /// Patchwork RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Ignition x coordinate (defaults to the grid center)
    #[arg(long)]
    ignite_x: Option<u32>,

    /// Ignition y coordinate (defaults to the grid center)
    #[arg(long)]
    ignite_y: Option<u32>,

    /// Maximum iterations (0 = run to natural termination)
    #[arg(long, default_value_t = 2000)]
    max_iterations: u32,

    /// Print a progress line every N steps
    #[arg(short, long, default_value_t = 50)]
    report_interval: u32,
}

/// Prints one progress line every `interval` committed steps
struct ProgressReporter {
    interval: u32,
}

impl StepObserver for ProgressReporter {
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        if self.interval == 0 || snapshot.iteration % self.interval != 0 {
            return;
        }
        let burned = snapshot
            .states
            .iter()
            .filter(|state| state.is_burned())
            .count();
        let active = snapshot
            .states
            .iter()
            .filter(|state| {
                state.phase() > FirePhase::Unburned && state.phase() < FirePhase::Burned
            })
            .count();
        println!(
            "step {:>6}  t = {:>8.1} min  burned {:>5}  active {:>5}",
            snapshot.iteration, snapshot.elapsed_minutes, burned, active
        );
    }
}

fn phase_glyph(phase: FirePhase) -> char {
    match phase {
        FirePhase::Unburned => '.',
        FirePhase::Igniting => '+',
        FirePhase::Burning => '*',
        FirePhase::Cooling => 'o',
        FirePhase::Burned => '#',
    }
}

fn run_scenario<M, P>(args: &Args, provider: &P, model: M)
where
    M: SpreadRateModel,
    P: AttributeProvider,
{
    let config = GridConfig::new(args.width, args.height).cell_size_m(args.cell_size);
    let mut grid = match Grid::generate(config, provider, model) {
        Ok(grid) => grid,
        Err(error) => {
            eprintln!("grid generation failed: {error}");
            std::process::exit(1);
        }
    };

    let origin = GridPosition::new(
        args.ignite_x.unwrap_or(args.width / 2),
        args.ignite_y.unwrap_or(args.height / 2),
    );
    println!(
        "igniting {}x{} grid at {origin} (cap {})",
        args.width, args.height, args.max_iterations
    );

    let mut reporter = ProgressReporter {
        interval: args.report_interval,
    };
    match grid.ignite_observed(origin, args.max_iterations, &mut reporter) {
        Ok(iterations) => {
            println!(
                "finished after {iterations} iterations, {:.1} simulated minutes, {:.1}% burned",
                grid.elapsed_minutes(),
                grid.burned_fraction() * 100.0
            );
        }
        Err(error) => {
            eprintln!("ignition failed: {error}");
            std::process::exit(1);
        }
    }

    println!();
    for y in 0..args.height {
        let row: String = (0..args.width)
            .map(|x| {
                let position = GridPosition::new(x, y);
                let cell = grid.cell(position).expect("position is in bounds");
                if cell.combustible() {
                    phase_glyph(grid.state(position).expect("position is in bounds").phase())
                } else {
                    '~'
                }
            })
            .collect();
        println!("{row}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.patchwork {
        let provider = PatchworkFuelProvider::new(args.width, args.height, args.region_size, args.seed)
            .non_combustible_below(10.0);
        match args.model {
            Model::Wind => run_scenario(&args, &provider, WindDriven::new()),
            Model::Fuel => run_scenario(&args, &provider, FuelDriven::new()),
            Model::Environmental => run_scenario(&args, &provider, Environmental::new()),
        }
    } else {
        let provider = UniformProvider::new()
            .wind_speed(args.wind_speed)
            .wind_direction(args.wind_direction)
            .temperature(args.temperature)
            .humidity(args.humidity)
            .fuel_load(args.fuel_load);
        match args.model {
            Model::Wind => run_scenario(&args, &provider, WindDriven::new()),
            Model::Fuel => run_scenario(&args, &provider, FuelDriven::new()),
            Model::Environmental => run_scenario(&args, &provider, Environmental::new()),
        }
    }
}
