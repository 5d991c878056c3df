//! Sweep monthly withdrawals for one plan and write the outcome of each
//!
//! Outputs one CSV row per withdrawal amount: how long the money lasts,
//! what is left and what was withdrawn in total.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use swp_calculator::params::{parse_percentage, SwpParams};
use swp_calculator::SwpError;
use swp_calculator::scenario::{ScenarioOutcome, ScenarioRunner};

#[derive(Parser)]
#[command(name = "sweep", about = "Project a plan across a range of monthly withdrawals")]
struct SweepArgs {
    #[arg(long, default_value_t = SwpParams::default().principal)]
    principal: f64,

    #[arg(long = "return-pct", value_parser = parse_return, default_value_t = SwpParams::default().annual_return_pct)]
    return_pct: f64,

    #[arg(long, default_value_t = SwpParams::default().duration_years)]
    years: u32,

    #[arg(long, value_parser = parse_inflation, default_value_t = SwpParams::default().inflation_pct)]
    inflation: f64,

    /// First monthly withdrawal
    #[arg(long, default_value_t = 5_000.0)]
    from: f64,

    /// Last monthly withdrawal (inclusive)
    #[arg(long, default_value_t = 100_000.0)]
    to: f64,

    #[arg(long, default_value_t = 5_000.0)]
    step: f64,

    #[arg(long, short, default_value = "withdrawal_sweep.csv")]
    output: PathBuf,
}

fn parse_return(text: &str) -> std::result::Result<f64, SwpError> {
    parse_percentage("annual return", text)
}

fn parse_inflation(text: &str) -> std::result::Result<f64, SwpError> {
    parse_percentage("inflation", text)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = SweepArgs::parse();

    let base = SwpParams::new(args.principal, args.from, args.return_pct, args.years, args.inflation);
    base.validate()?;

    let start = Instant::now();
    let runner = ScenarioRunner::default();
    let projections = runner.withdrawal_sweep(&base, args.from, args.to, args.step);
    info!("Projected {} withdrawal amounts in {:?}", projections.len(), start.elapsed());

    let mut wtr = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for projection in &projections {
        let name = format!("{:.0}", projection.params.monthly_withdrawal);
        wtr.serialize(ScenarioOutcome::from_projection(name, projection))?;
    }
    wtr.flush()?;

    let lasting = projections.iter().filter(|p| !p.is_depleted()).count();
    println!(
        "{} withdrawal amounts written to {} ({} last the full {} years)",
        projections.len(),
        args.output.display(),
        lasting,
        args.years
    );
    Ok(())
}
