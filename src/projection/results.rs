//! Output structures for withdrawal projections

use serde::{Deserialize, Serialize};

use crate::params::SwpParams;

/// One row of the year-by-year projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRecord {
    /// Plan year, starting at 1
    pub year: u32,

    /// Balance at the end of the year, floored at 0
    pub balance: f64,

    /// Annual withdrawal figure reported for the year
    pub withdrawal: f64,

    /// All withdrawals from month 1 through this year
    pub cumulative_withdrawal: f64,

    /// Original annual withdrawal grown by inflation for `year - 1` years.
    /// Independent of the simulated path.
    pub inflation_adjusted_withdrawal: f64,
}

/// One simulated month, kept only when monthly detail is requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow {
    pub month: u64,
    pub opening_balance: f64,
    pub interest: f64,
    pub withdrawal: f64,
    pub closing_balance: f64,
}

/// Totals shown alongside the charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalSummary {
    pub initial_investment: f64,
    pub total_withdrawals: f64,
    pub final_balance: f64,
    /// Withdrawals plus final balance, net of principal
    pub returns: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    /// The inputs this projection was computed from
    #[serde(flatten)]
    pub params: SwpParams,

    pub final_balance: f64,
    pub total_withdrawals: f64,

    /// Months elapsed before termination, in years
    pub withdrawal_years: f64,

    pub yearly_data: Vec<YearlyRecord>,
    pub final_summary: FinalSummary,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monthly: Vec<MonthlyRow>,
}

impl Projection {
    /// Assemble a projection from the engine's terminal values
    pub(crate) fn new(
        params: SwpParams,
        final_balance: f64,
        total_withdrawals: f64,
        months_elapsed: u64,
        yearly_data: Vec<YearlyRecord>,
        monthly: Vec<MonthlyRow>,
    ) -> Self {
        let final_summary = FinalSummary {
            initial_investment: params.principal,
            total_withdrawals,
            final_balance,
            returns: total_withdrawals + final_balance - params.principal,
        };

        Self {
            params,
            final_balance,
            total_withdrawals,
            withdrawal_years: months_elapsed as f64 / 12.0,
            yearly_data,
            final_summary,
            monthly,
        }
    }

    /// Whether the balance ran out
    pub fn is_depleted(&self) -> bool {
        self.final_balance <= 0.0
    }

    /// Whole months simulated before termination
    pub fn months_elapsed(&self) -> u64 {
        (self.withdrawal_years * 12.0).round() as u64
    }
}
