//! Aggregates over a completed projection

use crate::projection::{EventTag, MonthRecord, Projection};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Totals and final balances of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub retirement_date: NaiveDate,

    pub final_own_balance: f64,
    pub final_employer_balance: f64,
    pub final_outflow_balance: f64,
    pub total_corpus: f64,

    pub total_own_contribution: f64,
    pub total_employer_contribution: f64,
    pub total_outflow_contribution: f64,
    pub total_own_interest: f64,
    pub total_employer_interest: f64,

    /// Interest earned per unit contributed; None when nothing was contributed
    pub own_interest_ratio: Option<f64>,
    pub employer_interest_ratio: Option<f64>,
}

/// One calendar year of the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: i32,

    /// PF pay of the last month in the year
    pub pf_pay: f64,

    pub own_contribution: f64,
    pub employer_contribution: f64,
    pub own_interest: f64,
    pub employer_interest: f64,

    // Balances at the last month in the year
    pub own_closing: f64,
    pub employer_closing: f64,
    pub total_corpus: f64,
}

/// A month whose event label is non-empty, with the pay change it caused
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub month: NaiveDate,
    pub month_label: String,
    pub event: String,

    /// Previous month's figures; None for the first ledger month
    pub previous_pf_pay: Option<f64>,
    pub previous_basic: Option<f64>,
    pub previous_contribution: Option<f64>,

    pub pf_pay: f64,
    pub basic: f64,

    /// Own plus employer contribution for the month
    pub contribution: f64,
}

impl Milestone {
    pub fn is_pay_commission(&self) -> bool {
        self.event.contains("Pay Commission")
    }
}

fn member_contribution(record: &MonthRecord) -> f64 {
    record.own_contribution + record.employer_contribution
}

fn ratio(interest: f64, contribution: f64) -> Option<f64> {
    (contribution > 0.0).then(|| interest / contribution)
}

impl Projection {
    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let records = self.records();

        let total_own_contribution: f64 = records.iter().map(|r| r.own_contribution).sum();
        let total_employer_contribution: f64 = records.iter().map(|r| r.employer_contribution).sum();
        let total_outflow_contribution: f64 = records.iter().map(|r| r.outflow_contribution).sum();
        let total_own_interest: f64 = records.iter().map(|r| r.own.interest).sum();
        let total_employer_interest: f64 = records.iter().map(|r| r.employer.interest).sum();

        let last = records.last();

        ProjectionSummary {
            total_months: records.len() as u32,
            retirement_date: self.retirement_date(),
            final_own_balance: last.map(|r| r.own.closing).unwrap_or(0.0),
            final_employer_balance: last.map(|r| r.employer.closing).unwrap_or(0.0),
            final_outflow_balance: last.map(|r| r.outflow.closing).unwrap_or(0.0),
            total_corpus: last.map(|r| r.total_corpus).unwrap_or(0.0),
            total_own_contribution,
            total_employer_contribution,
            total_outflow_contribution,
            total_own_interest,
            total_employer_interest,
            own_interest_ratio: ratio(total_own_interest, total_own_contribution),
            employer_interest_ratio: ratio(total_employer_interest, total_employer_contribution),
        }
    }

    /// Per-calendar-year sums of flows and year-end balances
    pub fn yearly_summary(&self) -> Vec<YearlySummary> {
        let mut years: Vec<YearlySummary> = Vec::new();

        for record in self.records() {
            match years.last_mut() {
                Some(year) if year.year == record.year() => accumulate(year, record),
                _ => {
                    let mut year = YearlySummary {
                        year: record.year(),
                        pf_pay: 0.0,
                        own_contribution: 0.0,
                        employer_contribution: 0.0,
                        own_interest: 0.0,
                        employer_interest: 0.0,
                        own_closing: 0.0,
                        employer_closing: 0.0,
                        total_corpus: 0.0,
                    };
                    accumulate(&mut year, record);
                    years.push(year);
                }
            }
        }

        years
    }

    /// Months with a non-empty event label, in ledger order
    pub fn milestones(&self) -> Vec<Milestone> {
        let records = self.records();

        records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.has_event())
            .map(|(i, r)| {
                let previous = i.checked_sub(1).map(|p| &records[p]);
                Milestone {
                    month: r.month,
                    month_label: r.month_label.clone(),
                    event: r.event_label(),
                    previous_pf_pay: previous.map(|p| p.pf_pay),
                    previous_basic: previous.map(|p| p.basic),
                    previous_contribution: previous.map(member_contribution),
                    pf_pay: r.pf_pay,
                    basic: r.basic,
                    contribution: member_contribution(r),
                }
            })
            .collect()
    }

    /// Months in which a given kind of pay revision fired
    pub fn months_with(&self, predicate: impl Fn(&EventTag) -> bool) -> Vec<&MonthRecord> {
        self.records()
            .iter()
            .filter(|r| r.events.iter().any(&predicate))
            .collect()
    }
}

fn accumulate(year: &mut YearlySummary, record: &MonthRecord) {
    year.own_contribution += record.own_contribution;
    year.employer_contribution += record.employer_contribution;
    year.own_interest += record.own.interest;
    year.employer_interest += record.employer.interest;

    year.pf_pay = record.pf_pay;
    year.own_closing = record.own.closing;
    year.employer_closing = record.employer.closing;
    year.total_corpus = record.total_corpus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ProjectionInput;
    use crate::projection::compute_projection;
    use approx::assert_abs_diff_eq;

    fn projection() -> Projection {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        compute_projection(&ProjectionInput::default(), as_of).unwrap()
    }

    #[test]
    fn test_summary_matches_last_record() {
        let projection = projection();
        let summary = projection.summary();
        let last = projection.last().unwrap();

        assert_eq!(summary.total_months, 160);
        assert_eq!(summary.final_own_balance, last.own.closing);
        assert_eq!(summary.final_outflow_balance, last.outflow.closing);
        assert_eq!(summary.total_corpus, last.total_corpus);
        assert!(summary.total_own_contribution > 0.0);

        let ratio = summary.own_interest_ratio.unwrap();
        assert_abs_diff_eq!(
            ratio,
            summary.total_own_interest / summary.total_own_contribution,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_contribution_ratio_is_none() {
        let input = ProjectionInput {
            own_contribution_pct: 0.0,
            ..ProjectionInput::default()
        };
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let summary = compute_projection(&input, as_of).unwrap().summary();

        assert_eq!(summary.own_interest_ratio, None);
        assert!(summary.employer_interest_ratio.is_some());
    }

    #[test]
    fn test_yearly_summary_partitions_records() {
        let projection = projection();
        let years = projection.yearly_summary();

        assert_eq!(years.len(), 15);
        assert_eq!(years[0].year, 2026);
        assert_eq!(years.last().unwrap().year, 2040);

        let first_year_contribution: f64 = projection
            .records()
            .iter()
            .filter(|r| r.year() == 2026)
            .map(|r| r.own_contribution)
            .sum();
        assert_abs_diff_eq!(years[0].own_contribution, first_year_contribution, epsilon = 1e-6);
        assert_abs_diff_eq!(years[0].own_contribution, 3.0 * 13_200.0, epsilon = 1e-6);

        let dec_2030 = projection.record_for(NaiveDate::from_ymd_opt(2030, 12, 1).unwrap()).unwrap();
        let y2030 = years.iter().find(|y| y.year == 2030).unwrap();
        assert_eq!(y2030.total_corpus, dec_2030.total_corpus);
        assert_eq!(y2030.pf_pay, dec_2030.pf_pay);
    }

    #[test]
    fn test_milestones() {
        let projection = projection();
        let milestones = projection.milestones();

        assert!(milestones.iter().all(|m| !m.event.is_empty()));
        let commissions: Vec<&Milestone> = milestones.iter().filter(|m| m.is_pay_commission()).collect();
        assert_eq!(commissions.len(), 2);
        assert!(commissions[0].pf_pay > commissions[0].previous_pf_pay.unwrap());
        assert!(commissions[0].basic > commissions[0].previous_basic.unwrap());

        for commission in &commissions {
            let record = projection.record_for(commission.month).unwrap();
            assert_abs_diff_eq!(
                commission.contribution,
                record.own_contribution + record.employer_contribution,
                epsilon = 1e-9
            );
            assert!(commission.contribution > commission.previous_contribution.unwrap());
        }

        let resets = projection.months_with(|t| matches!(t, EventTag::PayCommissionReset { .. }));
        assert_eq!(resets.len(), 2);
        assert_eq!(resets[1].year(), 2040);
    }
}
