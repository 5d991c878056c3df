//! Running account state during a projection

use crate::params::SwpParams;

/// State of the account at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (1-indexed, 0 before the first month)
    pub month: u64,

    /// Account balance; may dip below zero in the depleting month before clamping
    pub balance: f64,

    /// Sum of all withdrawals made so far
    pub total_withdrawn: f64,

    /// Withdrawal applied each month, escalated at year boundaries
    pub current_withdrawal: f64,

    /// Withdrawals made since the start of the current plan year
    pub ytd_withdrawn: f64,
}

impl ProjectionState {
    /// Initialize state at month 0
    pub fn from_params(params: &SwpParams) -> Self {
        Self {
            month: 0,
            balance: params.principal,
            total_withdrawn: 0.0,
            current_withdrawal: params.monthly_withdrawal,
            ytd_withdrawn: 0.0,
        }
    }

    /// Advance to the given month, resetting year-to-date totals on a new year
    pub fn advance_month(&mut self, month: u64) {
        self.month = month;
        if self.month_in_year() == 1 {
            self.ytd_withdrawn = 0.0;
        }
    }

    /// Credit one month of growth on the pre-withdrawal balance
    pub fn accrue_interest(&mut self, monthly_rate: f64) -> f64 {
        let interest = self.balance * monthly_rate;
        self.balance += interest;
        interest
    }

    /// Take this month's withdrawal and return the amount taken
    pub fn withdraw(&mut self) -> f64 {
        let amount = self.current_withdrawal;
        self.balance -= amount;
        self.total_withdrawn += amount;
        self.ytd_withdrawn += amount;
        amount
    }

    /// Apply a year of inflation to the monthly withdrawal
    pub fn escalate(&mut self, factor: f64) {
        self.current_withdrawal *= factor;
    }

    /// Month within the plan year (1-12)
    pub fn month_in_year(&self) -> u32 {
        match self.month % 12 {
            0 => 12,
            m => m as u32,
        }
    }

    /// Plan year containing the current month (1-indexed)
    pub fn year(&self) -> u32 {
        // Months never exceed 12 * u32::MAX, so the year always fits
        u32::try_from(self.month.div_ceil(12)).unwrap_or(u32::MAX)
    }

    pub fn is_year_end(&self) -> bool {
        self.month % 12 == 0
    }

    pub fn is_depleted(&self) -> bool {
        self.balance <= 0.0
    }
}
