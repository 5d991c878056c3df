//! Core projection engine for monthly withdrawal simulations

use log::{debug, trace};

use crate::params::SwpParams;
use super::state::ProjectionState;
use super::results::{MonthlyRow, Projection, YearlyRecord};

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Keep a row for every simulated month
    pub record_monthly: bool,

    /// Emit a partial-year record when the balance runs out in a month that
    /// is neither a year end nor the last month of the horizon.
    /// Off by default: such a year gets no record.
    pub emit_depletion_record: bool,
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the month-by-month simulation for one parameter set
    pub fn project(&self, params: &SwpParams) -> Projection {
        let monthly_rate = params.annual_return_pct / 100.0 / 12.0;
        let monthly_inflation = params.inflation_pct / 100.0 / 12.0;
        // One year of monthly-compounded inflation
        let escalation = (1.0 + monthly_inflation).powf(12.0);
        let total_months = params.total_months();

        let mut state = ProjectionState::from_params(params);
        let mut yearly_data = Vec::new();
        let mut monthly = Vec::new();

        for month in 1..=total_months {
            state.advance_month(month);

            let opening_balance = state.balance;
            let interest = state.accrue_interest(monthly_rate);
            let withdrawal = state.withdraw();

            // Escalation takes effect next month; never after the last year
            if state.is_year_end() && month < total_months {
                state.escalate(escalation);
            }

            let record_due = state.is_year_end() || month == total_months;
            if record_due {
                let record = self.yearly_record(params, &state, escalation);
                trace!(
                    "year {}: balance={:.2} withdrawal={:.2}",
                    record.year, record.balance, record.withdrawal
                );
                yearly_data.push(record);
            }

            if self.config.record_monthly {
                monthly.push(MonthlyRow {
                    month,
                    opening_balance,
                    interest,
                    withdrawal,
                    closing_balance: state.balance.max(0.0),
                });
            }

            if state.is_depleted() {
                state.balance = 0.0;
                if !record_due && self.config.emit_depletion_record {
                    yearly_data.push(self.depletion_record(params, &state));
                }
                debug!(
                    "balance depleted in month {} (year {}) after withdrawing {:.2}",
                    month,
                    state.year(),
                    state.total_withdrawn
                );
                break;
            }
        }

        Projection::new(
            *params,
            state.balance.max(0.0),
            state.total_withdrawn,
            state.month,
            yearly_data,
            monthly,
        )
    }

    /// Record for a year end or the final month of the horizon
    fn yearly_record(&self, params: &SwpParams, state: &ProjectionState, escalation: f64) -> YearlyRecord {
        let month_in_year = state.month % 12;

        // On a year end the withdrawal has already been escalated for the next
        // year. A short final year is blended with one further escalation.
        let withdrawal = if month_in_year == 0 {
            state.current_withdrawal * 12.0
        } else {
            state.current_withdrawal * month_in_year as f64
                + state.current_withdrawal * escalation * (12 - month_in_year) as f64
        };

        YearlyRecord {
            year: state.year(),
            balance: state.balance.max(0.0),
            withdrawal,
            cumulative_withdrawal: state.total_withdrawn,
            inflation_adjusted_withdrawal: inflation_adjusted_withdrawal(params, state.year()),
        }
    }

    /// Terminal record for a year cut short by depletion
    fn depletion_record(&self, params: &SwpParams, state: &ProjectionState) -> YearlyRecord {
        YearlyRecord {
            year: state.year(),
            balance: 0.0,
            withdrawal: state.ytd_withdrawn,
            cumulative_withdrawal: state.total_withdrawn,
            inflation_adjusted_withdrawal: inflation_adjusted_withdrawal(params, state.year()),
        }
    }
}

/// Original annual withdrawal grown by annual inflation for `year - 1` years
pub fn inflation_adjusted_withdrawal(params: &SwpParams, year: u32) -> f64 {
    let growth = 1.0 + params.inflation_pct / 100.0;
    params.monthly_withdrawal * 12.0 * growth.powf(f64::from(year.saturating_sub(1)))
}

/// Project with the default engine configuration
pub fn project(params: &SwpParams) -> Projection {
    ProjectionEngine::default().project(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn lean_plan() -> SwpParams {
        SwpParams::new(1_000_000.0, 10_000.0, 8.0, 10, 0.0)
    }

    /// Closed-form balance after `n` months with a level withdrawal
    fn annuity_balance(params: &SwpParams, n: i32) -> f64 {
        let r = params.annual_return_pct / 100.0 / 12.0;
        let growth = (1.0 + r).powi(n);
        params.principal * growth - params.monthly_withdrawal * (growth - 1.0) / r
    }

    #[test]
    fn test_golden_lean_plan() {
        let result = project(&lean_plan());

        assert_relative_eq!(result.final_balance, 390_179.882_727_635_6, max_relative = 1e-12);
        assert_eq!(result.total_withdrawals, 1_200_000.0);
        assert_eq!(result.withdrawal_years, 10.0);
        assert_eq!(result.yearly_data.len(), 10);

        let first = &result.yearly_data[0];
        assert_eq!(first.year, 1);
        assert_relative_eq!(first.balance, 958_500.246_596_244_5, max_relative = 1e-12);
        assert_eq!(first.withdrawal, 120_000.0);
        assert_eq!(first.cumulative_withdrawal, 120_000.0);
        assert_eq!(first.inflation_adjusted_withdrawal, 120_000.0);
    }

    #[test]
    fn test_matches_closed_form_without_inflation() {
        let params = lean_plan();
        let result = project(&params);

        for record in &result.yearly_data {
            let expected = annuity_balance(&params, record.year as i32 * 12);
            assert_relative_eq!(record.balance, expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_default_plan_depletes_mid_year_without_partial_record() {
        let result = project(&SwpParams::default());

        assert_eq!(result.final_balance, 0.0);
        assert!(result.is_depleted());
        // Runs out in month 224, inside year 19
        assert_eq!(result.months_elapsed(), 224);
        assert_relative_eq!(result.withdrawal_years, 224.0 / 12.0);
        assert_relative_eq!(result.total_withdrawals, 10_827_349.038_892_241, max_relative = 1e-14);

        // Year 19 never reaches a boundary, so no record for it
        assert_eq!(result.yearly_data.len(), 18);
        assert_eq!(result.yearly_data.last().unwrap().year, 18);
        assert_relative_eq!(
            result.yearly_data[17].balance,
            525_047.349_358_621_8,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_year_end_withdrawal_reports_escalated_rate() {
        let result = project(&SwpParams::default());

        let first = &result.yearly_data[0];
        // 30,000 escalated once, times 12
        let escalated = 30_000.0 * (1.0_f64 + 0.05 / 12.0).powf(12.0) * 12.0;
        assert_relative_eq!(first.withdrawal, escalated, max_relative = 1e-12);
        assert_eq!(first.cumulative_withdrawal, 360_000.0);
        assert_eq!(first.inflation_adjusted_withdrawal, 360_000.0);

        let second = &result.yearly_data[1];
        assert_relative_eq!(second.inflation_adjusted_withdrawal, 378_000.0, max_relative = 1e-12);
        assert_relative_eq!(second.cumulative_withdrawal, 360_000.0 + escalated, max_relative = 1e-12);
    }

    #[test]
    fn test_last_year_is_not_escalated() {
        let params = SwpParams::new(1_000_000.0, 5_000.0, 8.0, 2, 6.0);
        let result = project(&params);

        assert_eq!(result.yearly_data.len(), 2);
        let escalation = (1.0_f64 + 0.06 / 12.0).powf(12.0);
        // Year 1 end reports the escalated rate, year 2 end keeps it
        assert_relative_eq!(result.yearly_data[0].withdrawal, 5_000.0 * escalation * 12.0);
        assert_relative_eq!(result.yearly_data[1].withdrawal, 5_000.0 * escalation * 12.0);
        assert_relative_eq!(
            result.total_withdrawals,
            5_000.0 * 12.0 + 5_000.0 * escalation * 12.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_depletion_inside_boundary_year() {
        let result = project(&SwpParams::new(1_000_000.0, 20_000.0, 8.0, 10, 5.0));

        assert_eq!(result.final_balance, 0.0);
        assert_eq!(result.months_elapsed(), 55);
        assert!(result.withdrawal_years < 10.0);
        assert_eq!(result.yearly_data.len(), 4);
        assert_relative_eq!(result.total_withdrawals, 1_207_143.461_249_206_4, max_relative = 1e-9);
        assert_relative_eq!(
            result.yearly_data[3].balance,
            165_220.721_158_615_17,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_immediate_depletion() {
        let params = SwpParams::new(100_000.0, 250_000.0, 8.0, 5, 5.0);
        let result = project(&params);

        assert_eq!(result.final_balance, 0.0);
        assert_eq!(result.total_withdrawals, 250_000.0);
        assert_relative_eq!(result.withdrawal_years, 1.0 / 12.0);
        // Month 1 is neither a year end nor the final month
        assert!(result.yearly_data.is_empty());
        assert_relative_eq!(result.final_summary.returns, 150_000.0);
    }

    #[test]
    fn test_immediate_depletion_on_final_month_is_recorded() {
        // A one-month horizon is impossible with whole years, so use a
        // one-year plan that runs out exactly in month 12
        let params = SwpParams::new(120_000.0, 10_000.0, 0.0, 1, 0.0);
        let result = project(&params);

        assert_eq!(result.final_balance, 0.0);
        assert_eq!(result.months_elapsed(), 12);
        assert_eq!(result.yearly_data.len(), 1);
        assert_eq!(result.yearly_data[0].balance, 0.0);
        assert_eq!(result.withdrawal_years, 1.0);
    }

    #[test]
    fn test_depletion_record_option() {
        let config = ProjectionConfig {
            emit_depletion_record: true,
            ..Default::default()
        };
        let engine = ProjectionEngine::new(config);

        let result = engine.project(&SwpParams::new(100_000.0, 250_000.0, 8.0, 5, 5.0));
        assert_eq!(result.yearly_data.len(), 1);
        let record = &result.yearly_data[0];
        assert_eq!(record.year, 1);
        assert_eq!(record.balance, 0.0);
        assert_eq!(record.withdrawal, 250_000.0);
        assert_eq!(record.cumulative_withdrawal, 250_000.0);

        let result = engine.project(&SwpParams::default());
        assert_eq!(result.yearly_data.len(), 19);
        let last = result.yearly_data.last().unwrap();
        assert_eq!(last.year, 19);
        assert_eq!(last.balance, 0.0);
        assert_relative_eq!(last.cumulative_withdrawal, result.total_withdrawals);
    }

    #[test]
    fn test_very_long_horizon_depleting_at_once() {
        let params = SwpParams::new(1_000.0, 1_000_000.0, 8.0, 400_000_000, 0.0);
        let result = project(&params);

        assert_eq!(result.months_elapsed(), 1);
        assert_eq!(result.final_balance, 0.0);
        assert!(result.yearly_data.is_empty());

        let engine = ProjectionEngine::new(ProjectionConfig {
            emit_depletion_record: true,
            ..Default::default()
        });
        let result = engine.project(&SwpParams { duration_years: u32::MAX, ..params });
        assert_eq!(result.yearly_data.len(), 1);
        assert_eq!(result.yearly_data[0].year, 1);
    }

    #[test]
    fn test_inflation_reference_for_late_years() {
        let params = SwpParams::new(1_000_000.0, 10_000.0, 8.0, 10, 5.0);
        assert_eq!(inflation_adjusted_withdrawal(&params, 1), 120_000.0);
        assert_relative_eq!(
            inflation_adjusted_withdrawal(&params, 11),
            120_000.0 * 1.05_f64.powi(10),
            max_relative = 1e-12
        );
        // Far past i32::MAX the growth is simply unbounded, never a panic
        assert!(inflation_adjusted_withdrawal(&params, u32::MAX).is_infinite());
    }

    #[test]
    fn test_zero_duration() {
        let params = SwpParams::new(500_000.0, 5_000.0, 8.0, 0, 5.0);
        let result = project(&params);

        assert!(result.yearly_data.is_empty());
        assert_eq!(result.final_balance, 500_000.0);
        assert_eq!(result.total_withdrawals, 0.0);
        assert_eq!(result.withdrawal_years, 0.0);
        assert_eq!(result.final_summary.returns, 0.0);
    }

    #[test]
    fn test_single_year_inflation_reference() {
        let params = SwpParams::new(1_000_000.0, 10_000.0, 8.0, 1, 5.0);
        let result = project(&params);

        assert_eq!(result.yearly_data.len(), 1);
        assert_eq!(result.yearly_data[0].inflation_adjusted_withdrawal, 120_000.0);
        assert_relative_eq!(result.yearly_data[0].balance, 958_500.246_596_244_5, max_relative = 1e-12);
    }

    #[test]
    fn test_growth_outpaces_small_withdrawal() {
        let params = SwpParams::new(1_000_000.0, 1_000.0, 12.0, 15, 3.0);
        let result = project(&params);

        assert_eq!(result.yearly_data.len(), 15);
        assert_eq!(result.withdrawal_years, 15.0);
        assert!(result.yearly_data.last().unwrap().balance > params.principal);
        assert!(result.final_balance > params.principal);
    }

    #[test]
    fn test_years_strictly_increase() {
        let result = project(&SwpParams::new(2_000_000.0, 8_000.0, 9.0, 25, 4.0));

        assert_eq!(result.yearly_data.len(), 25);
        for (i, record) in result.yearly_data.iter().enumerate() {
            assert_eq!(record.year, i as u32 + 1);
        }
        for pair in result.yearly_data.windows(2) {
            assert!(pair[1].cumulative_withdrawal > pair[0].cumulative_withdrawal);
        }
    }

    #[test]
    fn test_output_invariants_across_inputs() {
        for &principal in &[100_000.0, 1_000_000.0, 7_500_000.0] {
            for &withdrawal in &[1_000.0, 15_000.0, 90_000.0] {
                for &rate in &[1.0, 6.5, 15.0] {
                    for &years in &[1, 7, 30] {
                        let params = SwpParams::new(principal, withdrawal, rate, years, 5.0);
                        let result = project(&params);

                        assert!(result.final_balance >= 0.0);
                        assert!(result.yearly_data.iter().all(|r| r.balance >= 0.0));
                        assert!(result.yearly_data.len() <= years as usize);
                        assert_eq!(result.final_summary.total_withdrawals, result.total_withdrawals);
                        assert_eq!(result.final_summary.final_balance, result.final_balance);
                        assert_eq!(
                            result.final_summary.returns,
                            result.total_withdrawals + result.final_balance - principal
                        );
                        if result.is_depleted() && result.months_elapsed() < params.total_months() {
                            assert!(result.withdrawal_years < years as f64);
                            assert!(result.yearly_data.len() < years as usize);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_total_is_sum_of_monthly_withdrawals() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            record_monthly: true,
            ..Default::default()
        });
        let result = engine.project(&SwpParams::default());

        assert_eq!(result.monthly.len(), result.months_elapsed() as usize);
        let sum: f64 = result.monthly.iter().map(|m| m.withdrawal).sum();
        assert_eq!(sum, result.total_withdrawals);

        let first = &result.monthly[0];
        assert_eq!(first.opening_balance, 5_000_000.0);
        assert_relative_eq!(first.interest, 5_000_000.0 * 0.08 / 12.0, max_relative = 1e-12);
        assert_eq!(first.withdrawal, 30_000.0);

        // Month 13 is the first escalated withdrawal
        assert_eq!(result.monthly[11].withdrawal, 30_000.0);
        assert!(result.monthly[12].withdrawal > 30_000.0);
        assert_eq!(result.monthly.last().unwrap().closing_balance, 0.0);
    }

    #[test]
    fn test_idempotent() {
        let params = SwpParams::default();
        let a = project(&params);
        let b = project(&params);

        assert_eq!(a, b);
        assert_eq!(a.final_balance.to_bits(), b.final_balance.to_bits());
        assert_eq!(
            a.total_withdrawals.to_bits(),
            b.total_withdrawals.to_bits()
        );
    }
}
