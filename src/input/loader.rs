//! Load projection inputs from JSON and promotion schedules from CSV

use super::{ProjectionInput, PromotionEvent};
use crate::error::LoadError;
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw CSV row of a promotion schedule
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "HikePercent")]
    hike_percent: f64,
}

impl CsvRow {
    fn to_promotion(self) -> PromotionEvent {
        PromotionEvent::from_percent(self.year, self.month, self.hike_percent)
    }
}

/// Load and validate a complete projection input from a JSON file
pub fn load_input<P: AsRef<Path>>(path: P) -> Result<ProjectionInput, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_input_from_reader(BufReader::new(file))
}

/// Load and validate a projection input from any reader
pub fn load_input_from_reader<R: std::io::Read>(reader: R) -> Result<ProjectionInput, LoadError> {
    let input: ProjectionInput = serde_json::from_reader(reader)?;
    input.validate()?;
    log::debug!(
        "loaded input: dob={}, basic={:.2}, da={:.2}, {} promotions",
        input.date_of_birth,
        input.current_basic,
        input.current_da,
        input.promotions.len()
    );
    Ok(input)
}

/// Load a promotion schedule (columns Year, Month, HikePercent) from a CSV file
pub fn load_promotions<P: AsRef<Path>>(path: P) -> Result<Vec<PromotionEvent>, LoadError> {
    let mut reader = Reader::from_path(path)?;
    read_promotions(&mut reader)
}

/// Load a promotion schedule from any reader
pub fn load_promotions_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PromotionEvent>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    read_promotions(&mut csv_reader)
}

fn read_promotions<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<PromotionEvent>, LoadError> {
    let mut promotions = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        promotions.push(row.to_promotion());
    }

    Ok(promotions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    #[test]
    fn test_load_promotions_from_reader() {
        let data = "Year,Month,HikePercent\n2028,3,10\n2035,7,7.5\n";
        let promotions = load_promotions_from_reader(data.as_bytes()).unwrap();

        assert_eq!(promotions.len(), 2);
        assert_eq!(promotions[0].year, 2028);
        assert_eq!(promotions[0].month, 3);
        assert!((promotions[0].hike_factor - 1.10).abs() < 1e-12);
        assert!((promotions[1].hike_factor - 1.075).abs() < 1e-12);
    }

    #[test]
    fn test_load_input_from_reader() {
        let json = r#"{
            "date_of_birth": "1985-06-15",
            "current_basic": 60000,
            "current_da": 20000,
            "own_balance": 500000,
            "employer_balance": 400000,
            "increment_month": 7,
            "own_contribution_pct": 12,
            "employer_contribution_pct": 12,
            "annual_interest_rate": 8.25,
            "pc_2030_factor": 1.86,
            "pc_2040_factor": 1.4,
            "promotions": [{ "year": 2029, "month": 4, "hike_factor": 1.1 }],
            "pension": { "date_of_joining": "2008-07-01", "highest_pf_pay_aug2014": 25000 }
        }"#;

        let input = load_input_from_reader(json.as_bytes()).unwrap();
        assert_eq!(input.outflow_balance, 0.0);
        assert_eq!(input.promotions.len(), 1);
        let pension = input.pension.unwrap();
        assert_eq!(pension.highest_pf_pay_aug2014, 25_000.0);
    }

    #[test]
    fn test_load_input_rejects_invalid_values() {
        let json = r#"{
            "date_of_birth": "1985-06-15",
            "current_basic": 60000,
            "current_da": 20000,
            "own_balance": 500000,
            "employer_balance": 400000,
            "increment_month": 0,
            "own_contribution_pct": 12,
            "employer_contribution_pct": 12,
            "annual_interest_rate": 8.25,
            "pc_2030_factor": 1.86,
            "pc_2040_factor": 1.4
        }"#;

        let err = load_input_from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Input(InputError::InvalidMonth { field: "increment_month", month: 0 })
        ));
    }
}
