//! Export layer: text report, CSV and JSON renderings of a projection

mod format;

pub use format::{format_percent, format_rupee};

use std::fmt::Write as _;
use std::io::Write;

use chrono::NaiveDate;
use log::debug;

use crate::analysis::ResultsInsights;
use crate::error::{Result, SwpError};
use crate::projection::Projection;

pub const REPORT_TITLE: &str = "SWP Calculator Results";

/// Closing notes printed under every report
pub const REPORT_NOTES: [&str; 5] = [
    "This projection assumes a constant rate of return throughout the investment period.",
    "Market volatility and sequence of returns risk may significantly impact actual results.",
    "Tax implications are not considered in these calculations.",
    "Inflation adjustment is applied annually to show the reduced purchasing power over time.",
    "Consult a financial advisor before making investment decisions based on this projection.",
];

/// A printable report for one projection
#[derive(Debug, Clone)]
pub struct Report<'a> {
    projection: &'a Projection,
    insights: ResultsInsights,
    generated_on: NaiveDate,
}

impl<'a> Report<'a> {
    pub fn new(projection: &'a Projection, generated_on: NaiveDate) -> Self {
        Self {
            projection,
            insights: ResultsInsights::from_projection(projection),
            generated_on,
        }
    }

    /// Report dated today (local time)
    pub fn today(projection: &'a Projection) -> Self {
        Self::new(projection, chrono::Local::now().date_naive())
    }

    /// Input parameters as (label, value) pairs
    pub fn input_rows(&self) -> Vec<(&'static str, String)> {
        let params = &self.projection.params;
        vec![
            ("Initial Investment", format_rupee(params.principal)),
            ("Monthly Withdrawal", format_rupee(params.monthly_withdrawal)),
            ("Expected Annual Return", format_percent(params.annual_return_pct, 1)),
            ("Investment Duration", format!("{} years", params.duration_years)),
            ("Inflation Rate", format_percent(params.inflation_pct, 1)),
        ]
    }

    /// Results summary as (label, value) pairs
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let projection = self.projection;
        let final_balance = if self.insights.fund_depletion {
            format!("{} (Depleted)", format_rupee(0.0))
        } else {
            format_rupee(projection.final_balance)
        };

        vec![
            ("Total Withdrawals", format_rupee(projection.total_withdrawals)),
            ("Final Balance", final_balance),
            ("Withdrawal Period", self.insights.withdrawal_period.clone()),
            (
                "Annual Withdrawal Rate",
                format!(
                    "{} ({})",
                    format_percent(self.insights.withdrawal_rate_pct, 2),
                    self.insights.sustainability_label()
                ),
            ),
            ("Investment Returns", format_rupee(projection.final_summary.returns)),
        ]
    }

    /// Render the full plain-text report
    pub fn render(&self) -> Result<String> {
        self.check_renderable()?;

        let mut out = String::new();
        self.write_text(&mut out)
            .map_err(|e| SwpError::Report(e.to_string()))?;
        Ok(out)
    }

    /// Render and write the report to any writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let text = self.render()?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        debug!("report written ({} bytes)", text.len());
        Ok(())
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "{}", REPORT_TITLE)?;
        writeln!(out, "Generated on {}", self.generated_on.format("%d/%m/%Y"))?;
        writeln!(out, "{}", "=".repeat(72))?;

        writeln!(out, "\nInput Parameters")?;
        write_pairs(out, ("Parameter", "Value"), &self.input_rows())?;

        writeln!(out, "\nResults Summary")?;
        write_pairs(out, ("Metric", "Value"), &self.summary_rows())?;

        let warnings = self.insights.warnings(self.projection);
        if !warnings.is_empty() {
            writeln!(out, "\nWarnings:")?;
            for warning in &warnings {
                writeln!(out, "  - {}", warning)?;
            }
        }

        writeln!(out, "\nYearly Projection")?;
        writeln!(
            out,
            "{:>4}  {:>16}  {:>17}  {:>16}  {:>18}",
            "Year", "Balance", "Annual Withdrawal", "Cumulative", "Inflation Adjusted"
        )?;
        writeln!(out, "{}", "-".repeat(79))?;
        for record in &self.projection.yearly_data {
            writeln!(
                out,
                "{:>4}  {:>16}  {:>17}  {:>16}  {:>18}",
                record.year,
                format_rupee(record.balance),
                format_rupee(record.withdrawal),
                format_rupee(record.cumulative_withdrawal),
                format_rupee(record.inflation_adjusted_withdrawal),
            )?;
        }

        writeln!(out, "\nNotes:")?;
        for note in REPORT_NOTES {
            writeln!(out, "  • {}", note)?;
        }

        Ok(())
    }

    /// Non-finite figures cannot be formatted as currency
    fn check_renderable(&self) -> Result<()> {
        let projection = self.projection;
        let headline = [
            projection.final_balance,
            projection.total_withdrawals,
            projection.final_summary.returns,
        ];
        let yearly = projection.yearly_data.iter().flat_map(|r| {
            [r.balance, r.withdrawal, r.cumulative_withdrawal, r.inflation_adjusted_withdrawal]
        });

        if headline.into_iter().chain(yearly).all(f64::is_finite) {
            Ok(())
        } else {
            Err(SwpError::Report("projection contains non-finite values".to_string()))
        }
    }
}

fn write_pairs(out: &mut String, header: (&str, &str), rows: &[(&str, String)]) -> std::fmt::Result {
    writeln!(out, "{:<24} {}", header.0, header.1)?;
    writeln!(out, "{}", "-".repeat(60))?;
    for (label, value) in rows {
        writeln!(out, "{:<24} {}", label, value)?;
    }
    Ok(())
}

/// Column names of the yearly CSV export
pub const YEARLY_CSV_HEADERS: [&str; 5] = [
    "year",
    "balance",
    "withdrawal",
    "cumulativeWithdrawal",
    "inflationAdjustedWithdrawal",
];

/// Write the yearly projection as CSV with raw (unrounded) figures.
/// The header row is written even when there are no yearly records.
pub fn write_yearly_csv<W: Write>(projection: &Projection, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(YEARLY_CSV_HEADERS)?;
    for record in &projection.yearly_data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Pretty JSON of the whole projection
pub fn to_json(projection: &Projection) -> Result<String> {
    Ok(serde_json::to_string_pretty(projection)?)
}
