//! Input parameters for a withdrawal plan projection

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwpError};

/// The five inputs of a systematic withdrawal plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwpParams {
    /// Lump-sum principal invested at month 0
    #[serde(rename = "initialInvestment")]
    pub principal: f64,

    /// Withdrawal taken at the end of each month in year 1
    pub monthly_withdrawal: f64,

    /// Expected annual return in percent (8.0 = 8%)
    #[serde(rename = "expectedReturn")]
    pub annual_return_pct: f64,

    /// Investment horizon in whole years
    #[serde(rename = "investmentDuration")]
    pub duration_years: u32,

    /// Annual inflation in percent, applied to the withdrawal once a year
    #[serde(rename = "inflationRate")]
    pub inflation_pct: f64,
}

impl Default for SwpParams {
    fn default() -> Self {
        Self {
            principal: 5_000_000.0,
            monthly_withdrawal: 30_000.0,
            annual_return_pct: 8.0,
            duration_years: 20,
            inflation_pct: 5.0,
        }
    }
}

/// A single-field change to a parameter set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamUpdate {
    Principal(f64),
    MonthlyWithdrawal(f64),
    AnnualReturn(f64),
    Duration(u32),
    Inflation(f64),
}

impl SwpParams {
    pub fn new(
        principal: f64,
        monthly_withdrawal: f64,
        annual_return_pct: f64,
        duration_years: u32,
        inflation_pct: f64,
    ) -> Self {
        Self {
            principal,
            monthly_withdrawal,
            annual_return_pct,
            duration_years,
            inflation_pct,
        }
    }

    /// Return a copy with one field replaced
    pub fn apply(self, update: ParamUpdate) -> Self {
        match update {
            ParamUpdate::Principal(v) => Self { principal: v, ..self },
            ParamUpdate::MonthlyWithdrawal(v) => Self { monthly_withdrawal: v, ..self },
            ParamUpdate::AnnualReturn(v) => Self { annual_return_pct: v, ..self },
            ParamUpdate::Duration(v) => Self { duration_years: v, ..self },
            ParamUpdate::Inflation(v) => Self { inflation_pct: v, ..self },
        }
    }

    /// Number of simulated months over the full horizon
    pub fn total_months(&self) -> u64 {
        u64::from(self.duration_years) * 12
    }

    /// Annualized withdrawal as a percentage of principal
    pub fn withdrawal_rate_pct(&self) -> f64 {
        self.monthly_withdrawal * 12.0 / self.principal * 100.0
    }

    /// Reject inputs the engine should never see.
    ///
    /// The engine itself will run on anything finite; this is the caller-side
    /// gate for principal, withdrawal, duration and inflation.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("principal", self.principal),
            ("monthly withdrawal", self.monthly_withdrawal),
            ("annual return", self.annual_return_pct),
            ("inflation", self.inflation_pct),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SwpError::invalid(field, format!("{} is not a finite number", value)));
            }
        }

        if self.principal <= 0.0 {
            return Err(SwpError::invalid("principal", "must be greater than zero"));
        }
        if self.monthly_withdrawal <= 0.0 {
            return Err(SwpError::invalid("monthly withdrawal", "must be greater than zero"));
        }
        if self.duration_years == 0 {
            return Err(SwpError::invalid("duration", "must be at least one year"));
        }
        if self.inflation_pct < 0.0 {
            return Err(SwpError::invalid("inflation", "must not be negative"));
        }

        Ok(())
    }

    /// Clamp every field into the given bounds.
    ///
    /// Principal is clamped first so the withdrawal ceiling follows the
    /// clamped principal.
    pub fn clamped(&self, bounds: &ParamBounds) -> Self {
        let principal = self.principal.clamp(bounds.principal.0, bounds.principal.1);
        let max_withdrawal = (principal / bounds.withdrawal_ceiling_divisor).max(bounds.min_withdrawal);

        Self {
            principal,
            monthly_withdrawal: self.monthly_withdrawal.clamp(bounds.min_withdrawal, max_withdrawal),
            annual_return_pct: self.annual_return_pct.clamp(bounds.annual_return_pct.0, bounds.annual_return_pct.1),
            duration_years: self.duration_years.clamp(bounds.duration_years.0, bounds.duration_years.1),
            inflation_pct: self.inflation_pct.clamp(bounds.inflation_pct.0, bounds.inflation_pct.1),
        }
    }
}

/// Accepted input ranges for interactive entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    pub principal: (f64, f64),
    pub min_withdrawal: f64,
    /// Maximum monthly withdrawal is principal divided by this
    pub withdrawal_ceiling_divisor: f64,
    pub annual_return_pct: (f64, f64),
    pub duration_years: (u32, u32),
    pub inflation_pct: (f64, f64),
}

impl Default for ParamBounds {
    fn default() -> Self {
        Self {
            principal: (100_000.0, 10_000_000.0),
            min_withdrawal: 1_000.0,
            withdrawal_ceiling_divisor: 60.0,
            annual_return_pct: (1.0, 15.0),
            duration_years: (1, 30),
            inflation_pct: (0.0, 10.0),
        }
    }
}

/// Parse a percentage typed as text, e.g. "8.5" or "8.5%"
pub fn parse_percentage(field: &'static str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SwpError::invalid(field, format!("'{}' is not a percentage", text)))
}
