use std::path::PathBuf;

use clap::Parser;
use vecdyn::economics::Economics;
use vecdyn::log::{info, set_log_level, LevelFilter};
use vecdyn::parameters::Parameters;
use vecdyn::report::write_scenario;
use vecdyn::scenario::run_scenario;
use vecdyn::VecdynError;

/// Compare treated and untreated spray strategies for one season of
/// vector-borne pathogen spread.
#[derive(Parser, Debug)]
#[command(name = "vecdyn")]
struct Args {
    /// Optional path to a JSON parameters file; reference defaults are
    /// used otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Optional directory for trajectory CSV output
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Market value of a full-yield crop, dollars per unit area
    #[arg(long, default_value_t = 500.0)]
    crop_value: f64,

    /// Cost of one spray application, dollars per unit area
    #[arg(long, default_value_t = 12.0)]
    spray_cost: f64,

    /// Season overhead independent of treatment, dollars per unit area
    #[arg(long, default_value_t = 50.0)]
    fixed_cost: f64,
}

fn run(args: &Args) -> Result<(), VecdynError> {
    let parameters = match &args.config {
        Some(path) => Parameters::from_json_file(path)?,
        None => Parameters::default(),
    };
    parameters.validate()?;
    info!("{parameters:?}");

    let outcome = run_scenario(&parameters)?;

    let economics = Economics {
        crop_value: args.crop_value,
        spray_cost: args.spray_cost,
        fixed_cost: args.fixed_cost,
    };
    let n_sprays = parameters.spray_days.len();
    println!("treated yield:   {:.6}", outcome.yield_treated());
    println!("untreated yield: {:.6}", outcome.yield_untreated());
    println!(
        "treated margin:   {:8.2}",
        economics.gross_margin(outcome.yield_treated(), n_sprays)
    );
    println!(
        "untreated margin: {:8.2}",
        economics.gross_margin(outcome.yield_untreated(), 0)
    );
    println!(
        "net benefit of treatment: {:.2}",
        economics.net_benefit(&outcome, n_sprays)
    );

    if let Some(directory) = &args.output_dir {
        write_scenario(&outcome, directory)?;
        info!("trajectories written to {}", directory.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    set_log_level(args.log_level);
    if let Err(error) = run(&args) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
