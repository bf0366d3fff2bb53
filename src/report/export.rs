//! Spreadsheet-style CSV export of the monthly ledger

use crate::error::ExportError;
use crate::projection::MonthRecord;
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Round up to the next multiple of 10 (13201 -> 13210, 13200 -> 13200)
pub fn round_up_to_10(value: f64) -> f64 {
    (value / 10.0).ceil() * 10.0
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", value))
}

/// One exported ledger row (column names match the spreadsheet layout)
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Month_Year")]
    month_year: &'a str,

    #[serde(rename = "Basic", serialize_with = "two_decimals")]
    basic: f64,
    #[serde(rename = "DA", serialize_with = "two_decimals")]
    da: f64,
    #[serde(rename = "PF_Pay", serialize_with = "two_decimals")]
    pf_pay: f64,

    #[serde(rename = "Own_Contribution", serialize_with = "two_decimals")]
    own_contribution: f64,
    #[serde(rename = "Company_Contribution", serialize_with = "two_decimals")]
    employer_contribution: f64,
    #[serde(rename = "EPFO_Outflow_Contribution", serialize_with = "two_decimals")]
    outflow_contribution: f64,

    #[serde(rename = "Own_Opening_Balance", serialize_with = "two_decimals")]
    own_opening: f64,
    #[serde(rename = "Own_Monthly_Interest", serialize_with = "two_decimals")]
    own_interest: f64,
    #[serde(rename = "Own_Closing_Balance", serialize_with = "two_decimals")]
    own_closing: f64,

    #[serde(rename = "Company_Opening_Balance", serialize_with = "two_decimals")]
    employer_opening: f64,
    #[serde(rename = "Company_Monthly_Interest", serialize_with = "two_decimals")]
    employer_interest: f64,
    #[serde(rename = "Company_Closing_Balance", serialize_with = "two_decimals")]
    employer_closing: f64,

    #[serde(rename = "EPFO_Opening_Balance", serialize_with = "two_decimals")]
    outflow_opening: f64,
    #[serde(rename = "EPFO_Monthly_Interest", serialize_with = "two_decimals")]
    outflow_interest: f64,
    #[serde(rename = "EPFO_Closing_Balance", serialize_with = "two_decimals")]
    outflow_closing: f64,

    #[serde(rename = "Total_Corpus", serialize_with = "two_decimals")]
    total_corpus: f64,
    #[serde(rename = "Event")]
    event: String,
    #[serde(rename = "Financial_Year")]
    financial_year: &'a str,
}

impl<'a> ExportRow<'a> {
    fn from_record(record: &'a MonthRecord, round_up: bool) -> Self {
        let pay = |v: f64| if round_up { round_up_to_10(v) } else { v };

        Self {
            month_year: &record.month_label,
            basic: pay(record.basic),
            da: pay(record.da),
            pf_pay: pay(record.pf_pay),
            own_contribution: pay(record.own_contribution),
            employer_contribution: pay(record.employer_contribution),
            outflow_contribution: pay(record.outflow_contribution),
            own_opening: record.own.opening,
            own_interest: record.own.interest,
            own_closing: record.own.closing,
            employer_opening: record.employer.opening,
            employer_interest: record.employer.interest,
            employer_closing: record.employer.closing,
            outflow_opening: record.outflow.opening,
            outflow_interest: record.outflow.interest,
            outflow_closing: record.outflow.closing,
            total_corpus: record.total_corpus,
            event: record.event_label(),
            financial_year: &record.fiscal_year,
        }
    }
}

/// Write records as CSV; with `round_up` the pay and contribution columns are
/// rounded up to the next multiple of 10
pub fn write_ledger_csv<W: Write, R: AsRef<MonthRecord>>(
    writer: W,
    records: &[R],
    round_up: bool,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(ExportRow::from_record(record.as_ref(), round_up))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write records to a CSV file at `path`
pub fn export_ledger<R: AsRef<MonthRecord>>(
    path: &Path,
    records: &[R],
    round_up: bool,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.display().to_string(),
        source,
    })?;
    write_ledger_csv(file, records, round_up)?;
    log::info!("wrote {} ledger rows to {}", records.len(), path.display());
    Ok(())
}

impl AsRef<MonthRecord> for MonthRecord {
    fn as_ref(&self) -> &MonthRecord {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ProjectionInput;
    use crate::projection::compute_projection;
    use crate::report::LedgerFilter;
    use chrono::NaiveDate;

    fn records() -> Vec<MonthRecord> {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        compute_projection(&ProjectionInput::default(), as_of)
            .unwrap()
            .into_records()
    }

    fn export(records: &[MonthRecord], round_up: bool) -> Vec<csv::StringRecord> {
        let mut buffer = Vec::new();
        write_ledger_csv(&mut buffer, &records[..1], round_up).unwrap();
        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        assert_eq!(reader.headers().unwrap().len(), 19);
        reader.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_round_up_to_10() {
        assert_eq!(round_up_to_10(13_200.0), 13_200.0);
        assert_eq!(round_up_to_10(13_200.01), 13_210.0);
        assert_eq!(round_up_to_10(9_015.0), 9_020.0);
        assert_eq!(round_up_to_10(0.0), 0.0);
    }

    #[test]
    fn test_export_without_rounding() {
        let rows = export(&records(), false);
        let first = &rows[0];

        assert_eq!(&first[0], "Oct-2026");
        assert_eq!(&first[3], "110000.00");
        assert_eq!(&first[6], "9015.00");
        assert_eq!(&first[7], "2148242.00");
        assert_eq!(&first[17], "");
        assert_eq!(&first[18], "2026-27");
    }

    #[test]
    fn test_financial_year_is_last_column() {
        let mut buffer = Vec::new();
        write_ledger_csv(&mut buffer, &records()[..1], false).unwrap();
        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();

        assert_eq!(headers.first().map(String::as_str), Some("Month_Year"));
        assert_eq!(headers[1], "Basic");
        assert_eq!(headers[16], "Total_Corpus");
        assert_eq!(headers[17], "Event");
        assert_eq!(headers.last().map(String::as_str), Some("Financial_Year"));
    }

    #[test]
    fn test_export_with_rounding_leaves_balances() {
        let rows = export(&records(), true);
        let first = &rows[0];

        assert_eq!(&first[4], "13200.00");
        assert_eq!(&first[6], "9020.00");
        assert_eq!(&first[7], "2148242.00");
    }

    #[test]
    fn test_export_filtered_view() {
        let records = records();
        let selected = LedgerFilter::new().events_only().years(2030, 2030).apply(&records);

        let mut buffer = Vec::new();
        write_ledger_csv(&mut buffer, &selected, false).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text.lines().count(), 1 + selected.len());
        assert!(text.contains("Pay Commission 2030, DA Reset"));
    }
}
