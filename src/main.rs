//! SWP Calculator CLI
//!
//! Command-line interface for running withdrawal plan projections

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info};

use swp_calculator::params::{load_scenarios, parse_percentage, ParamBounds, SwpParams};
use swp_calculator::SwpError;
use swp_calculator::projection::{max_sustainable_withdrawal, Projection, ProjectionConfig, ProjectionEngine};
use swp_calculator::report::{self, format_rupee, Report};
use swp_calculator::ScenarioRunner;

/// Systematic withdrawal plan projections
#[derive(Parser)]
#[command(name = "swp", version, about = "Systematic withdrawal plan projections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project one plan and print or export the result
    Project(ProjectArgs),
    /// Run every scenario in a CSV file and write a summary CSV
    Batch(BatchArgs),
    /// Find the largest monthly withdrawal that lasts the full duration
    Solve(PlanArgs),
}

#[derive(Args, Debug, Clone)]
struct PlanArgs {
    /// Initial investment
    #[arg(long, default_value_t = SwpParams::default().principal)]
    principal: f64,

    /// Monthly withdrawal in the first year
    #[arg(long, default_value_t = SwpParams::default().monthly_withdrawal)]
    withdrawal: f64,

    /// Expected annual return in percent
    #[arg(long = "return-pct", value_parser = parse_return, default_value_t = SwpParams::default().annual_return_pct)]
    return_pct: f64,

    /// Investment duration in years
    #[arg(long, default_value_t = SwpParams::default().duration_years)]
    years: u32,

    /// Annual inflation in percent
    #[arg(long, value_parser = parse_inflation, default_value_t = SwpParams::default().inflation_pct)]
    inflation: f64,

    /// Clamp inputs into the calculator's slider ranges instead of rejecting them
    #[arg(long)]
    clamp: bool,
}

impl PlanArgs {
    fn to_params(&self) -> Result<SwpParams> {
        let params = SwpParams::new(self.principal, self.withdrawal, self.return_pct, self.years, self.inflation);
        let params = if self.clamp {
            params.clamped(&ParamBounds::default())
        } else {
            params
        };
        params.validate()?;
        Ok(params)
    }
}

fn parse_return(text: &str) -> std::result::Result<f64, SwpError> {
    parse_percentage("annual return", text)
}

fn parse_inflation(text: &str) -> std::result::Result<f64, SwpError> {
    parse_percentage("inflation", text)
}

#[derive(Args)]
struct ProjectArgs {
    #[command(flatten)]
    plan: PlanArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Include month-by-month rows (JSON output)
    #[arg(long)]
    monthly: bool,

    /// Emit a partial-year record when the balance runs out mid-year
    #[arg(long)]
    depletion_record: bool,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct BatchArgs {
    /// Scenario CSV (Name,Principal,MonthlyWithdrawal,AnnualReturn,Duration,Inflation)
    #[arg(long, short)]
    input: PathBuf,

    /// Summary CSV to write
    #[arg(long, short, default_value = "swp_batch_output.csv")]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Project(args) => run_project(args),
        Commands::Batch(args) => run_batch(args),
        Commands::Solve(args) => run_solve(args),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("error: {:#}", e);
        eprintln!("Nothing was written; check the inputs and try again.");
        process::exit(1);
    }
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            file.write_all(bytes)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Render the projection fully in memory so a failure leaves no partial output
fn render_projection(projection: &Projection, format: OutputFormat) -> Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Table => Report::today(projection)
            .render()
            .context("generating report")?
            .into_bytes(),
        OutputFormat::Json => {
            let mut json = report::to_json(projection)?;
            json.push('\n');
            json.into_bytes()
        }
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            report::write_yearly_csv(projection, &mut buf).context("writing CSV")?;
            buf
        }
    })
}

fn run_project(args: ProjectArgs) -> Result<()> {
    let params = args.plan.to_params()?;
    let engine = ProjectionEngine::new(ProjectionConfig {
        record_monthly: args.monthly,
        emit_depletion_record: args.depletion_record,
    });

    let projection = engine.project(&params);
    info!(
        "Projected {} years: final balance {:.2}, total withdrawals {:.2}",
        params.duration_years, projection.final_balance, projection.total_withdrawals
    );

    let bytes = render_projection(&projection, args.format)?;
    write_output(args.output.as_ref(), &bytes)?;

    if let Some(path) = &args.output {
        println!("Results written to: {}", path.display());
    }
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("loading scenarios from {}", args.input.display()))?;

    let runner = ScenarioRunner::default();
    let outcomes = runner.run_scenarios(&scenarios);

    let mut wtr = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for outcome in &outcomes {
        wtr.serialize(outcome)?;
    }
    wtr.flush()?;

    println!("{} scenarios written to {}", outcomes.len(), args.output.display());
    Ok(())
}

fn run_solve(args: PlanArgs) -> Result<()> {
    let params = args.to_params()?;
    match max_sustainable_withdrawal(&params) {
        Some(withdrawal) => println!(
            "Maximum monthly withdrawal lasting {} years: {} ({:.2})",
            params.duration_years,
            format_rupee(withdrawal),
            withdrawal
        ),
        None => println!("No withdrawal lasts {} years with these inputs", params.duration_years),
    }
    Ok(())
}
