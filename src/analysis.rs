//! Derived figures for presenting a projection
//!
//! Everything here is computed from a finished [`Projection`]; nothing feeds
//! back into the engine.

use serde::Serialize;

use crate::projection::Projection;

/// Display-ready interpretation of a projection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsInsights {
    /// Annual withdrawal as a percentage of the initial investment
    pub withdrawal_rate_pct: f64,

    /// Withdrawal rate does not exceed the expected return
    pub is_withdrawal_rate_sustainable: bool,

    /// Balance ran out before or at the end of the horizon
    pub fund_depletion: bool,

    /// E.g. "18.7 years (Funds depleted)" or "20 years (Full duration)"
    pub withdrawal_period: String,
}

impl ResultsInsights {
    pub fn from_projection(projection: &Projection) -> Self {
        let params = &projection.params;
        let withdrawal_rate_pct = params.withdrawal_rate_pct();
        let fund_depletion = projection.final_balance <= 0.0;

        let withdrawal_period = if fund_depletion {
            format!("{:.1} years (Funds depleted)", projection.withdrawal_years)
        } else {
            format!("{} years (Full duration)", params.duration_years)
        };

        Self {
            withdrawal_rate_pct,
            is_withdrawal_rate_sustainable: withdrawal_rate_pct <= params.annual_return_pct,
            fund_depletion,
            withdrawal_period,
        }
    }

    pub fn sustainability_label(&self) -> &'static str {
        if self.is_withdrawal_rate_sustainable {
            "Sustainable"
        } else {
            "Unsustainable"
        }
    }

    /// Warnings to show next to the results, most severe first
    pub fn warnings(&self, projection: &Projection) -> Vec<String> {
        let params = &projection.params;
        let mut warnings = Vec::new();

        if self.fund_depletion {
            warnings.push(format!(
                "Your funds will be depleted in {:.1} years, before your target duration of {} years. \
                 Consider reducing your withdrawal amount or increasing your initial investment.",
                projection.withdrawal_years, params.duration_years
            ));
        }

        // A depletion warning already covers an unsustainable rate
        if !self.fund_depletion && !self.is_withdrawal_rate_sustainable {
            warnings.push(format!(
                "Your annual withdrawal rate ({:.1}%) is higher than your expected return ({}%). \
                 This might deplete your corpus in the long run beyond your specified duration.",
                self.withdrawal_rate_pct, params.annual_return_pct
            ));
        }

        warnings
    }
}
