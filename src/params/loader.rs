//! Load named scenarios from CSV

use super::SwpParams;
use crate::error::Result;
use csv::Reader;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "MonthlyWithdrawal")]
    monthly_withdrawal: f64,
    #[serde(rename = "AnnualReturn")]
    annual_return: f64,
    #[serde(rename = "Duration")]
    duration: u32,
    #[serde(rename = "Inflation")]
    inflation: f64,
}

impl CsvRow {
    fn into_scenario(self) -> Result<Scenario> {
        let params = SwpParams::new(
            self.principal,
            self.monthly_withdrawal,
            self.annual_return,
            self.duration,
            self.inflation,
        );
        params.validate()?;

        Ok(Scenario { name: self.name, params })
    }
}

/// A parameter set with a label, as read from a scenario file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub params: SwpParams,
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let reader = Reader::from_path(path.as_ref())?;
    let scenarios = collect_scenarios(reader)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.as_ref().display());
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Scenario>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SwpError;

    const SCENARIOS: &str = "\
Name,Principal,MonthlyWithdrawal,AnnualReturn,Duration,Inflation
base,5000000,30000,8.0,20,5.0
lean,1000000,10000,8.0,10,0.0
";

    #[test]
    fn test_load_scenarios_from_reader() {
        let scenarios = load_scenarios_from_reader(SCENARIOS.as_bytes()).expect("valid csv");
        assert_eq!(scenarios.len(), 2);

        assert_eq!(scenarios[0].name, "base");
        assert_eq!(scenarios[0].params, SwpParams::default());

        assert_eq!(scenarios[1].name, "lean");
        assert_eq!(scenarios[1].params.duration_years, 10);
        assert_eq!(scenarios[1].params.inflation_pct, 0.0);
    }

    #[test]
    fn test_load_sample_file() {
        let scenarios = load_scenarios("data/scenarios.csv").expect("Failed to load scenarios");
        assert_eq!(scenarios.len(), 4);
        assert_eq!(scenarios[0].name, "calculator_default");
        assert_eq!(scenarios[0].params, SwpParams::default());
    }

    #[test]
    fn test_invalid_row_is_rejected() {
        let csv = "\
Name,Principal,MonthlyWithdrawal,AnnualReturn,Duration,Inflation
broken,0,30000,8.0,20,5.0
";
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SwpError::InvalidInput { field: "principal", .. }));
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let csv = "\
Name,Principal,MonthlyWithdrawal,AnnualReturn,Duration,Inflation
broken,lots,30000,8.0,20,5.0
";
        let err = load_scenarios_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SwpError::Csv(_)));
    }
}
