//! Scenario runner for batch projections
//!
//! Runs many parameter sets through one engine configuration. Batches are
//! projected in parallel and returned in input order.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::ResultsInsights;
use crate::params::{ParamUpdate, Scenario, SwpParams};
use crate::projection::{Projection, ProjectionConfig, ProjectionEngine};

/// Runner holding a shared engine configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::default();
/// let results = runner.withdrawal_sweep(&SwpParams::default(), 10_000.0, 50_000.0, 5_000.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

/// One line of a batch summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Principal")]
    pub principal: f64,
    #[serde(rename = "MonthlyWithdrawal")]
    pub monthly_withdrawal: f64,
    #[serde(rename = "AnnualReturn")]
    pub annual_return_pct: f64,
    #[serde(rename = "Duration")]
    pub duration_years: u32,
    #[serde(rename = "Inflation")]
    pub inflation_pct: f64,
    #[serde(rename = "FinalBalance")]
    pub final_balance: f64,
    #[serde(rename = "TotalWithdrawals")]
    pub total_withdrawals: f64,
    #[serde(rename = "WithdrawalYears")]
    pub withdrawal_years: f64,
    #[serde(rename = "Returns")]
    pub returns: f64,
    #[serde(rename = "WithdrawalRatePct")]
    pub withdrawal_rate_pct: f64,
    #[serde(rename = "Sustainable")]
    pub sustainable: bool,
    #[serde(rename = "Depleted")]
    pub depleted: bool,
}

impl ScenarioOutcome {
    pub fn from_projection(name: impl Into<String>, projection: &Projection) -> Self {
        let params = &projection.params;
        let insights = ResultsInsights::from_projection(projection);

        Self {
            name: name.into(),
            principal: params.principal,
            monthly_withdrawal: params.monthly_withdrawal,
            annual_return_pct: params.annual_return_pct,
            duration_years: params.duration_years,
            inflation_pct: params.inflation_pct,
            final_balance: projection.final_balance,
            total_withdrawals: projection.total_withdrawals,
            withdrawal_years: projection.withdrawal_years,
            returns: projection.final_summary.returns,
            withdrawal_rate_pct: insights.withdrawal_rate_pct,
            sustainable: insights.is_withdrawal_rate_sustainable,
            depleted: insights.fund_depletion,
        }
    }
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, params: &SwpParams) -> Projection {
        self.engine.project(params)
    }

    /// Run projections for many parameter sets in parallel
    pub fn run_batch(&self, params: &[SwpParams]) -> Vec<Projection> {
        params.par_iter().map(|p| self.engine.project(p)).collect()
    }

    /// Run named scenarios and summarise each one
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<_> = scenarios
            .par_iter()
            .map(|s| ScenarioOutcome::from_projection(s.name.clone(), &self.engine.project(&s.params)))
            .collect();

        let depleted = outcomes.iter().filter(|o| o.depleted).count();
        info!("Ran {} scenarios, {} depleted", outcomes.len(), depleted);
        outcomes
    }

    /// Project `base` once per monthly withdrawal from `from` to `to`
    /// (inclusive) in increments of `step`
    pub fn withdrawal_sweep(&self, base: &SwpParams, from: f64, to: f64, step: f64) -> Vec<Projection> {
        self.run_batch(&sweep_params(base, from, to, step))
    }
}

/// Parameter sets for a withdrawal sweep; empty for a non-positive step
/// or an inverted range
pub fn sweep_params(base: &SwpParams, from: f64, to: f64, step: f64) -> Vec<SwpParams> {
    if step.is_nan() || step <= 0.0 || !from.is_finite() || !to.is_finite() || from > to {
        return Vec::new();
    }

    // Index-based so the steps do not accumulate rounding error
    let count = ((to - from) / step + 1e-9).floor() as usize + 1;
    (0..count)
        .map(|i| base.apply(ParamUpdate::MonthlyWithdrawal(from + step * i as f64)))
        .collect()
}
