use clap::{Parser, Subcommand};
use nbody_core::params::{DEFAULT_TIME_STEP, DEFAULT_TOTAL_TIME};
use nbody_core::{
    format_parse_error, format_runtime_error, parse_universe, run_universe, NoopObserver, SimulationParams, StepObserver, StepSampler,
    Trajectory, Universe, UpdateScheme, GRAVITATIONAL_CONSTANT,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nbody")]
#[command(about = "Direct-summation N-body gravity simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a universe file and print the final positions
    Run {
        /// Path to the universe file
        file: PathBuf,
        /// Simulated time to cover, in seconds
        #[arg(env = "NBODY_TOTAL_TIME", default_value_t = DEFAULT_TOTAL_TIME)]
        total_time: f64,
        /// Step size, in seconds
        #[arg(env = "NBODY_TIME_STEP", default_value_t = DEFAULT_TIME_STEP)]
        time_step: f64,
        /// Body update order within a step: simultaneous or sequential
        #[arg(long, default_value_t = UpdateScheme::Simultaneous)]
        scheme: UpdateScheme,
        /// Gravitational constant
        #[arg(long = "g", default_value_t = GRAVITATIONAL_CONSTANT)]
        gravitational_constant: f64,
        /// Print a CSV row per body every K steps
        #[arg(long, value_name = "K")]
        snapshot_every: Option<usize>,
    },
    /// Parse and validate a universe file without simulating it
    Check {
        /// Path to the universe file
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            file,
            total_time,
            time_step,
            scheme,
            gravitational_constant,
            snapshot_every,
        } => {
            let params = SimulationParams::new(total_time, time_step)
                .with_scheme(scheme)
                .with_gravitational_constant(gravitational_constant);
            run_file(&file, &params, snapshot_every)
        }
        Commands::Check { file } => check_file(&file),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_universe(file: &Path) -> Result<Universe, Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    tracing::info!(file = %file.display(), "loaded universe file");
    parse_universe(&source).map_err(|e| format_parse_error(&e, &source).into())
}

/// Writes `step,elapsed,index,x,y` rows as the run progresses
struct CsvSnapshots<W: Write> {
    out: W,
    sampler: StepSampler,
    error: Option<io::Error>,
}

impl<W: Write> CsvSnapshots<W> {
    fn new(mut out: W, every: usize) -> io::Result<Self> {
        writeln!(out, "step,elapsed,index,x,y")?;
        Ok(Self {
            out,
            sampler: StepSampler::new(every),
            error: None,
        })
    }
}

impl<W: Write> StepObserver for CsvSnapshots<W> {
    fn on_step(&mut self, step: usize, elapsed: f64, universe: &Universe) {
        if self.error.is_some() || !self.sampler.is_due(step) {
            return;
        }
        for (index, body) in universe.bodies().iter().enumerate() {
            if let Err(e) = writeln!(
                self.out,
                "{},{},{},{:e},{:e}",
                step, elapsed, index, body.position.x, body.position.y
            ) {
                // Keep simulating; surfaced once the run ends
                self.error = Some(e);
                return;
            }
        }
    }
}

fn run_file(
    file: &Path,
    params: &SimulationParams,
    snapshot_every: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let universe = load_universe(file)?;
    let stdout = io::stdout();

    let trajectory = match snapshot_every {
        Some(every) => {
            let mut csv = CsvSnapshots::new(stdout.lock(), every)?;
            let trajectory = run_universe(universe, params, &mut csv).map_err(|e| format_runtime_error(&e))?;
            if let Some(e) = csv.error {
                return Err(e.into());
            }
            trajectory
        }
        None => run_universe(universe, params, &mut NoopObserver).map_err(|e| format_runtime_error(&e))?,
    };

    print!("{}", format_trajectory(&trajectory));
    Ok(())
}

fn check_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let universe = load_universe(file)?;

    println!("bodies: {}", universe.len());
    println!("radius: {:e}", universe.radius());
    for (i, body) in universe.bodies().iter().enumerate() {
        println!(
            "  {}: {} at ({:e}, {:e}) mass {:e}",
            i, body.image, body.position.x, body.position.y, body.mass
        );
    }
    Ok(())
}

fn format_values(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("{:e}", v)).collect();
    format!("[{}]", items.join(", "))
}

/// Final x positions on one line, y positions on the next
fn format_trajectory(trajectory: &Trajectory) -> String {
    format!(
        "{}\n{}\n",
        format_values(&trajectory.xs),
        format_values(&trajectory.ys)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_uses_reference_defaults() {
        let cli = Cli::try_parse_from(["nbody", "run", "planets.txt"]).unwrap();
        match cli.command {
            Commands::Run {
                total_time,
                time_step,
                scheme,
                snapshot_every,
                ..
            } => {
                assert_eq!(total_time, 1e8);
                assert_eq!(time_step, 25000.0);
                assert_eq!(scheme, UpdateScheme::Simultaneous);
                assert_eq!(snapshot_every, None);
            }
            Commands::Check { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn run_accepts_positional_times_and_flags() {
        let cli = Cli::try_parse_from([
            "nbody", "run", "binary.txt", "100", "0.5", "--scheme", "sequential", "--g", "1", "--snapshot-every", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                file,
                total_time,
                time_step,
                scheme,
                gravitational_constant,
                snapshot_every,
            } => {
                assert_eq!(file, PathBuf::from("binary.txt"));
                assert_eq!(total_time, 100.0);
                assert_eq!(time_step, 0.5);
                assert_eq!(scheme, UpdateScheme::Sequential);
                assert_eq!(gravitational_constant, 1.0);
                assert_eq!(snapshot_every, Some(10));
            }
            Commands::Check { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        assert!(Cli::try_parse_from(["nbody", "run", "a.txt", "--scheme", "rk4"]).is_err());
    }

    #[test]
    fn trajectory_prints_as_two_lists() {
        let trajectory = Trajectory {
            xs: vec![1.5e11, -2.0],
            ys: vec![0.0, 3.25],
            elapsed: 1.0,
            steps: 1,
        };
        assert_eq!(format_trajectory(&trajectory), "[1.5e11, -2e0]\n[0e0, 3.25e0]\n");
    }

    #[test]
    fn csv_snapshots_write_every_kth_step() {
        let universe = parse_universe("2 10 0 0 0 0 1 a.gif 1 2 0 0 1 b.gif").unwrap();
        let mut csv = CsvSnapshots::new(Vec::new(), 2).unwrap();
        csv.on_step(1, 0.5, &universe);
        csv.on_step(2, 1.0, &universe);

        let text = String::from_utf8(csv.out).unwrap();
        assert_eq!(text, "step,elapsed,index,x,y\n2,1,0,0e0,0e0\n2,1,1,1e0,2e0\n");
    }
}
