use std::path::{Path, PathBuf};

use crate::error::SirdError;
use crate::log::{info, set_log_level, LevelFilter};
use crate::report::SimulationReportExt;
use crate::scenario::Scenario;
use crate::simulation::Simulation;
use clap::{Args, Command, FromArgMatches as _};

/// The name of the report written to `--output-dir`.
pub const REPORT_FILE_NAME: &str = "sird_report.csv";

/// Default cli arguments for sird runner
#[derive(Args, Debug, Default)]
pub struct BaseArgs {
    /// Optional path for a JSON scenario file. The two-group scenario is used if none is given
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Optional directory for the CSV report
    #[arg(short, long, default_value = "")]
    pub output_dir: String,

    /// Number of days to simulate, overriding the scenario
    #[arg(short, long)]
    pub days: Option<u64>,

    /// Enable logging at the given level (off, error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<LevelFilter>,
}

#[derive(Args)]
pub struct PlaceholderCustom {}

fn create_sird_cli() -> Command {
    let cli = Command::new("sird");
    BaseArgs::augment_args(cli)
}

/// Runs a simulation with custom cli arguments.
///
/// This function allows you to define custom arguments and a setup function
///
/// # Parameters
/// - `setup_fn`: A function that takes a mutable reference to a `Simulation`, a `BaseArgs` struct,
///   a Option<A> where A is the custom cli arguments struct. It runs after the scenario is built
///   and before any day is simulated, so it can add vaccination campaigns.
///
/// # Errors
/// Returns an error if argument parsing, scenario loading, the setup function or report writing
/// fails
pub fn run_with_custom_args<A, F>(setup_fn: F) -> Result<Simulation, Box<dyn std::error::Error>>
where
    A: Args,
    F: Fn(&mut Simulation, &BaseArgs, Option<A>) -> Result<(), SirdError>,
{
    let mut cli = create_sird_cli();
    cli = A::augment_args(cli);
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    let custom_matches = A::from_arg_matches(&matches)?;
    Ok(run_with_args_internal(
        base_args_matches,
        Some(custom_matches),
        setup_fn,
    )?)
}

/// Runs a simulation with default cli arguments
///
/// This function parses command line arguments allows you to define a setup function
///
/// # Parameters
/// - `setup_fn`: A function that takes a mutable reference to a `Simulation` and `BaseArgs` struct
///
/// # Errors
/// Returns an error if argument parsing, scenario loading, the setup function or report writing
/// fails
pub fn run_with_args<F>(setup_fn: F) -> Result<Simulation, Box<dyn std::error::Error>>
where
    F: Fn(&mut Simulation, &BaseArgs, Option<PlaceholderCustom>) -> Result<(), SirdError>,
{
    let cli = create_sird_cli();
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    Ok(run_with_args_internal(base_args_matches, None, setup_fn)?)
}

fn run_with_args_internal<A, F>(
    args: BaseArgs,
    custom_args: Option<A>,
    setup_fn: F,
) -> Result<Simulation, SirdError>
where
    F: Fn(&mut Simulation, &BaseArgs, Option<A>) -> Result<(), SirdError>,
{
    if let Some(level) = args.log_level {
        set_log_level(level);
    }

    // Optionally load the scenario from a file
    let scenario = if args.config.is_empty() {
        Scenario::default()
    } else {
        Scenario::from_json_file(Path::new(&args.config))?
    };
    let days = args.days.unwrap_or(scenario.days);
    let mut simulation = scenario.build()?;

    // Run the provided Fn
    setup_fn(&mut simulation, &args, custom_args)?;

    simulation.run(days)?;

    // Optionally write the report
    if !args.output_dir.is_empty() {
        let report_path = PathBuf::from(&args.output_dir).join(REPORT_FILE_NAME);
        simulation.write_report(&report_path)?;
        info!("Wrote report to {}", report_path.display());
    }
    Ok(simulation)
}
