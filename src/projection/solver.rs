//! Maximum sustainable withdrawal search
//!
//! Finds the largest level monthly withdrawal that survives the full horizon

use log::debug;

use crate::params::{ParamUpdate, SwpParams};
use super::engine::ProjectionEngine;

/// Stop once the bracket is narrower than this (currency units)
const TOLERANCE: f64 = 0.01;
const MAX_ITERATIONS: u32 = 200;

/// Largest starting monthly withdrawal that does not deplete the account
/// within `duration_years`, using the plan's return and inflation.
///
/// Uses bisection between zero and an amount that empties the account in
/// the first month. The `monthly_withdrawal` of `params` is ignored.
///
/// # Returns
/// * `Option<f64>` - the withdrawal, or None for a non-positive principal,
///   zero duration or non-finite rates
pub fn max_sustainable_withdrawal(params: &SwpParams) -> Option<f64> {
    if !params.principal.is_finite()
        || params.principal <= 0.0
        || params.duration_years == 0
        || !params.annual_return_pct.is_finite()
        || !params.inflation_pct.is_finite()
    {
        return None;
    }

    let engine = ProjectionEngine::default();
    let survives = |withdrawal: f64| !engine.project(&params.apply(ParamUpdate::MonthlyWithdrawal(withdrawal))).is_depleted();

    let monthly_rate = params.annual_return_pct / 100.0 / 12.0;
    let mut low = 0.0_f64;
    // Twice the first month's grown balance always depletes in month 1
    let mut high = params.principal * (1.0 + monthly_rate.max(0.0)) * 2.0;

    if !survives(low) {
        // Principal shrinks to nothing even without withdrawals
        return None;
    }

    for iteration in 0..MAX_ITERATIONS {
        if high - low < TOLERANCE {
            debug!("withdrawal search converged after {} iterations", iteration);
            return Some(low);
        }

        let mid = (low + high) / 2.0;
        if survives(mid) {
            low = mid;
        } else {
            high = mid;
        }
    }

    Some(low)
}
