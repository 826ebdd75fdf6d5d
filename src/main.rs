//! Command-line interface for the aerodynamic coefficient table engine.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use aero_table::airfoils::{Naca2412, Naca4410};
use aero_table::csv_export::write_table_csv;
use aero_table::stopwatch::Stopwatch;
use aero_table::{
    compute_table, coverage_summary, AoaSweep, InputScriptGenerator, ReynoldsRange, TableConfig,
    XfoilRunner, DEFAULT_CANDIDATE_RADIUS, DEFAULT_CD_MAX,
};

#[derive(Parser)]
#[command(name = "aero-table")]
#[command(version = "0.1.0")]
#[command(about = "Aerodynamic coefficient table generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Airfoil {
    Naca2412,
    Naca4410,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a full coefficient table for one airfoil
    Compute {
        /// Airfoil to run
        #[arg(long, value_enum)]
        airfoil: Airfoil,

        /// Minimum Reynolds number
        #[arg(long, default_value = "40000")]
        re_min: f64,

        /// Maximum Reynolds number
        #[arg(long, default_value = "6000000")]
        re_max: f64,

        /// Reynolds points per decade
        #[arg(long, default_value = "10")]
        per_decade: u32,

        /// Minimum angle of attack (degrees)
        #[arg(long, default_value = "-20.0")]
        aoa_min: f64,

        /// Maximum angle of attack (degrees)
        #[arg(long, default_value = "50.0")]
        aoa_max: f64,

        /// Angle-of-attack step (degrees)
        #[arg(long, default_value = "0.5")]
        aoa_step: f64,

        /// Candidate radius K (2K perturbed runs per target)
        #[arg(long, default_value_t = DEFAULT_CANDIDATE_RADIUS)]
        radius: u32,

        /// Maximum drag coefficient for the Viterna model
        #[arg(long, default_value_t = DEFAULT_CD_MAX)]
        cd_max: f64,

        /// Solver command
        #[arg(long, default_value = "xfoil")]
        solver: String,

        /// Solver timeout per invocation (seconds)
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Output directory for the CSV and solver scratch files
        #[arg(short = 'o', long, default_value = "saved")]
        output_dir: PathBuf,

        /// Print the coverage summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the sampled Reynolds test points for a range
    Reynolds {
        /// Minimum Reynolds number
        #[arg(long)]
        re_min: f64,

        /// Maximum Reynolds number
        #[arg(long)]
        re_max: f64,

        /// Reynolds points per decade
        #[arg(long, default_value = "10")]
        per_decade: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            airfoil,
            re_min,
            re_max,
            per_decade,
            aoa_min,
            aoa_max,
            aoa_step,
            radius,
            cd_max,
            solver,
            timeout,
            output_dir,
            json,
        } => {
            let reynolds = ReynoldsRange {
                min: re_min,
                max: re_max,
                points_per_decade: per_decade,
            };
            let sweep = AoaSweep::new(aoa_min, aoa_max, aoa_step)?;
            let mut config = TableConfig::new(reynolds, sweep);
            config.candidate_radius = radius;
            config.cd_max = cd_max;

            let runner = XfoilRunner::new(solver, Duration::from_secs(timeout));

            match airfoil {
                Airfoil::Naca2412 => {
                    run_compute(&runner, &Naca2412, &config, &output_dir, json)?;
                }
                Airfoil::Naca4410 => {
                    run_compute(&runner, &Naca4410, &config, &output_dir, json)?;
                }
            }
        }

        Commands::Reynolds {
            re_min,
            re_max,
            per_decade,
        } => {
            let range = ReynoldsRange {
                min: re_min,
                max: re_max,
                points_per_decade: per_decade,
            };
            for value in range.values()? {
                println!("{value:.0}");
            }
        }
    }

    Ok(())
}

fn run_compute<G: InputScriptGenerator + Sync>(
    runner: &XfoilRunner,
    generator: &G,
    config: &TableConfig,
    output_dir: &Path,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let stopwatch = Stopwatch::start();

    let folder_name = generator.airfoil_name().to_lowercase().replace(' ', "");
    let work_dir = output_dir.join(&folder_name);
    // Each run starts from a clean scratch folder.
    fs::remove_dir_all(&work_dir).ok();
    fs::create_dir_all(&work_dir)?;

    let table = compute_table(runner, generator, config, &work_dir)?;

    let csv_path = work_dir.join(format!("{folder_name}_coefficients.csv"));
    write_table_csv(&csv_path, &table)?;
    info!(path = %csv_path.display(), "coefficient table written");

    let coverage = coverage_summary(&table);
    if json {
        println!("{}", serde_json::to_string_pretty(&coverage)?);
    } else {
        println!("Rows: {}", table.rows.len());
        println!("Grid points: {}", table.alphas.len());
        println!(
            "Coverage between stall boundaries: {}/{} present ({:.1}%)",
            coverage.present_points,
            coverage.total_points,
            coverage.present_fraction * 100.0
        );
    }

    info!(elapsed = %stopwatch.elapsed_display(), "computation finished");
    Ok(())
}
