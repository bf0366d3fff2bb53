//! Record selection for tabular views and exports

use crate::projection::MonthRecord;

/// Selects ledger months by fiscal year, calendar-year range and event presence
///
/// All criteria are optional and combine with AND; the default filter keeps
/// every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerFilter {
    /// Fiscal-year label such as `2027-28`
    pub fiscal_year: Option<String>,

    /// Inclusive calendar-year range
    pub year_range: Option<(i32, i32)>,

    /// Keep only months with a non-empty event label
    pub events_only: bool,
}

impl LedgerFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fiscal_year(mut self, label: impl Into<String>) -> Self {
        self.fiscal_year = Some(label.into());
        self
    }

    pub fn years(mut self, from: i32, to: i32) -> Self {
        self.year_range = Some((from, to));
        self
    }

    pub fn events_only(mut self) -> Self {
        self.events_only = true;
        self
    }

    pub fn matches(&self, record: &MonthRecord) -> bool {
        if let Some(label) = &self.fiscal_year {
            if &record.fiscal_year != label {
                return false;
            }
        }
        if let Some((from, to)) = self.year_range {
            if record.year() < from || record.year() > to {
                return false;
            }
        }
        !self.events_only || record.has_event()
    }

    pub fn apply<'a>(&self, records: &'a [MonthRecord]) -> Vec<&'a MonthRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Distinct fiscal-year labels in ledger order
pub fn fiscal_years(records: &[MonthRecord]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for record in records {
        if labels.last() != Some(&record.fiscal_year) {
            labels.push(record.fiscal_year.clone());
        }
    }
    labels
}
