//! Higher pension estimate from pre-cutoff service and the trailing PF pay average
//!
//! ```text
//! pension = ((service days to cutoff + bonus days) * highest pre-cutoff pay
//!           + days after cutoff * average PF pay of the last 60 months to age 58)
//!           / (70 * 365)
//! ```
//!
//! Pensionable service ends on the last day of the month in which the member
//! turns 58. The trailing average is taken from the projected ledger, so the
//! projection must reach that month.

use crate::error::PensionError;
use crate::input::PensionProfile;
use crate::projection::{end_of_month, MonthRecord};
use crate::rules::PensionRules;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Pension figure together with every intermediate quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PensionEstimate {
    /// Last day of the month of the 58th birthday
    pub age_58_date: NaiveDate,

    /// Start of the trailing averaging window
    pub window_start: NaiveDate,

    /// Days from joining to `age_58_date`
    pub total_service_days: i64,
    pub total_service_years: f64,
    pub bonus_applied: bool,
    pub bonus_days: i64,

    // Component 1: service up to the cutoff
    pub service_days_till_cutoff: i64,
    pub adjusted_service_days: i64,
    pub highest_pf_pay_aug2014: f64,
    pub component1: f64,

    // Component 2: service after the cutoff
    pub days_after_cutoff: i64,
    pub avg_pf_pay_last_60_months: f64,
    pub component2: f64,

    pub monthly_pension: f64,
}

/// Estimator for the higher pension
#[derive(Debug, Clone, Default)]
pub struct PensionEstimator {
    rules: PensionRules,
}

impl PensionEstimator {
    pub fn new(rules: PensionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PensionRules {
        &self.rules
    }

    /// Last day of the month in which the member turns the pension age
    pub fn age_58_date(&self, date_of_birth: NaiveDate) -> Option<NaiveDate> {
        date_of_birth
            .checked_add_months(Months::new(self.rules.pension_age_years * 12))
            .and_then(end_of_month)
    }

    /// Estimate the monthly pension from a completed projection's records
    pub fn estimate(
        &self,
        date_of_birth: NaiveDate,
        date_of_joining: NaiveDate,
        highest_pf_pay_aug2014: f64,
        records: &[MonthRecord],
    ) -> Result<PensionEstimate, PensionError> {
        let rules = &self.rules;

        if !highest_pf_pay_aug2014.is_finite() || highest_pf_pay_aug2014 < 0.0 {
            return Err(PensionError::InvalidPay(highest_pf_pay_aug2014));
        }
        if date_of_joining > rules.service_cutoff {
            return Err(PensionError::JoinedAfterCutoff {
                date_of_joining,
                cutoff: rules.service_cutoff,
            });
        }

        let age_58_date = self
            .age_58_date(date_of_birth)
            .ok_or(PensionError::DateOutOfRange(date_of_birth))?;
        let window_start = age_58_date
            .checked_sub_months(Months::new(rules.averaging_months))
            .ok_or(PensionError::DateOutOfRange(date_of_birth))?;

        let total_service_days = (age_58_date - date_of_joining).num_days();
        let total_service_years = total_service_days as f64 / rules.days_per_year;
        let bonus_applied = total_service_years > rules.bonus_threshold_years;
        let bonus_days = if bonus_applied { rules.bonus_days } else { 0 };

        let service_days_till_cutoff = (rules.service_cutoff - date_of_joining).num_days();
        let adjusted_service_days = service_days_till_cutoff + bonus_days;
        let component1 = adjusted_service_days as f64 * highest_pf_pay_aug2014;

        let window: Vec<f64> = records
            .iter()
            .filter(|r| r.month >= window_start && r.month <= age_58_date)
            .map(|r| r.pf_pay)
            .collect();

        let required = rules.averaging_months as usize;
        if window.len() < required {
            log::warn!(
                "missing {} months of data for the {}-month average (need records until {})",
                required - window.len(),
                required,
                age_58_date.format("%d-%b-%Y")
            );
            return Err(PensionError::InsufficientHistory {
                required,
                available: window.len(),
                missing_months: required - window.len(),
                window_start,
                window_end: age_58_date,
            });
        }

        let avg_pf_pay_last_60_months = window.iter().sum::<f64>() / window.len() as f64;
        let days_after_cutoff = (age_58_date - rules.averaging_from).num_days();
        let component2 = days_after_cutoff as f64 * avg_pf_pay_last_60_months;

        let monthly_pension = (component1 + component2) / rules.divisor;

        log::debug!(
            "pension estimate: service {:.2} years, bonus {} days, average pay {:.2}, pension {:.2}",
            total_service_years,
            bonus_days,
            avg_pf_pay_last_60_months,
            monthly_pension
        );

        Ok(PensionEstimate {
            age_58_date,
            window_start,
            total_service_days,
            total_service_years,
            bonus_applied,
            bonus_days,
            service_days_till_cutoff,
            adjusted_service_days,
            highest_pf_pay_aug2014,
            component1,
            days_after_cutoff,
            avg_pf_pay_last_60_months,
            component2,
            monthly_pension,
        })
    }

    /// Estimate using the pension part of a projection input
    pub fn estimate_for_profile(
        &self,
        date_of_birth: NaiveDate,
        profile: &PensionProfile,
        records: &[MonthRecord],
    ) -> Result<PensionEstimate, PensionError> {
        self.estimate(
            date_of_birth,
            profile.date_of_joining,
            profile.highest_pf_pay_aug2014,
            records,
        )
    }
}

/// Estimate with the default pension rules
pub fn estimate_pension(
    date_of_birth: NaiveDate,
    date_of_joining: NaiveDate,
    highest_pf_pay_aug2014: f64,
    records: &[MonthRecord],
) -> Result<PensionEstimate, PensionError> {
    PensionEstimator::default().estimate(date_of_birth, date_of_joining, highest_pf_pay_aug2014, records)
}
