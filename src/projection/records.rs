//! Monthly ledger records produced by the projection

use super::contributions::Contributions;
use super::events::{event_label, EventTag};
use super::ledger::{LedgerEntry, LedgerMonth};
use super::pay::PayState;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Round a monetary amount to 2 decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Financial-year label `YYYY-YY`, keyed on the calendar year of `month`
pub fn fiscal_year_label(month: NaiveDate) -> String {
    let year = month.year();
    format!("{}-{:02}", year, (year + 1).rem_euclid(100))
}

impl LedgerEntry {
    fn rounded(&self) -> Self {
        Self {
            opening: round2(self.opening),
            interest: round2(self.interest),
            closing: round2(self.closing),
        }
    }
}

/// One month of the projection; monetary fields are rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// First day of the month
    pub month: NaiveDate,

    /// Display label, e.g. `Oct-2026`
    pub month_label: String,

    pub fiscal_year: String,

    // Pay
    pub basic: f64,
    pub da: f64,
    pub pf_pay: f64,

    // Contributions
    pub own_contribution: f64,
    pub employer_contribution: f64,
    pub outflow_contribution: f64,

    // Ledgers
    pub own: LedgerEntry,
    pub employer: LedgerEntry,
    pub outflow: LedgerEntry,

    /// Own + employer closing balances
    pub total_corpus: f64,

    /// Tags in firing order
    pub events: Vec<EventTag>,
}

impl MonthRecord {
    /// Build a record from full-precision month results
    pub fn new(
        month: NaiveDate,
        pay: &PayState,
        contributions: &Contributions,
        ledgers: &LedgerMonth,
        events: Vec<EventTag>,
    ) -> Self {
        Self {
            month,
            month_label: month.format("%b-%Y").to_string(),
            fiscal_year: fiscal_year_label(month),
            basic: round2(pay.basic),
            da: round2(pay.da),
            pf_pay: round2(pay.pf_pay()),
            own_contribution: round2(contributions.own),
            employer_contribution: round2(contributions.employer),
            outflow_contribution: round2(contributions.outflow),
            own: ledgers.own.rounded(),
            employer: ledgers.employer.rounded(),
            outflow: ledgers.outflow.rounded(),
            total_corpus: round2(ledgers.own.closing + ledgers.employer.closing),
            events,
        }
    }

    pub fn year(&self) -> i32 {
        self.month.year()
    }

    pub fn calendar_month(&self) -> u32 {
        self.month.month()
    }

    /// Ledger event text
    pub fn event_label(&self) -> String {
        event_label(&self.events)
    }

    pub fn has_event(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Completed projection: one record per month from the current month to retirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    retirement_date: NaiveDate,
    records: Vec<MonthRecord>,
}

impl Projection {
    pub(crate) fn new(retirement_date: NaiveDate, records: Vec<MonthRecord>) -> Self {
        Self { retirement_date, records }
    }

    pub fn retirement_date(&self) -> NaiveDate {
        self.retirement_date
    }

    pub fn records(&self) -> &[MonthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&MonthRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&MonthRecord> {
        self.records.last()
    }

    /// Record for the month containing `date`
    pub fn record_for(&self, date: NaiveDate) -> Option<&MonthRecord> {
        self.records
            .iter()
            .find(|r| r.month.year() == date.year() && r.month.month() == date.month())
    }

    pub fn into_records(self) -> Vec<MonthRecord> {
        self.records
    }
}
