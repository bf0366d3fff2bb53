//! Scheme rules: pay revision schedule, statutory outflow formula and pension constants
//!
//! The defaults reproduce the policy constants the projection has always used.
//! A JSON file may override any subset of them.

mod schedule;
mod pension;

pub use schedule::{DaSchedule, JanuaryRevision, OutflowRule, FIRST_PAY_COMMISSION_YEAR, SECOND_PAY_COMMISSION_YEAR};
pub use pension::PensionRules;

use crate::error::LoadError;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Container for all pay and contribution rules applied by the projection engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeRules {
    /// Statutory retirement age in whole years
    pub retirement_age_years: u32,

    /// Youngest member age accepted on the projection date
    pub minimum_age_years: u32,

    /// Earliest accepted date of birth
    pub earliest_date_of_birth: NaiveDate,

    /// Annual increment applied to basic pay (0.03 = 3%)
    pub annual_increment_rate: f64,

    /// DA bump granted with the increment in the first calendar year of the horizon,
    /// as a fraction of the pre-increment basic
    pub first_year_da_bump: f64,

    /// January DA revisions and pay commission resets
    pub da_schedule: DaSchedule,

    /// Statutory pension-fund outflow formula
    pub outflow: OutflowRule,

    /// Higher pension formula constants
    pub pension: PensionRules,
}

impl Default for SchemeRules {
    fn default() -> Self {
        Self {
            retirement_age_years: 60,
            minimum_age_years: 18,
            earliest_date_of_birth: NaiveDate::from_ymd_opt(1950, 1, 1).expect("valid calendar date"),
            annual_increment_rate: 0.03,
            first_year_da_bump: 0.04,
            da_schedule: DaSchedule::default(),
            outflow: OutflowRule::default(),
            pension: PensionRules::default(),
        }
    }
}

impl SchemeRules {
    /// Horizon length in calendar months from birth to retirement
    pub fn retirement_age_months(&self) -> u32 {
        self.retirement_age_years * 12
    }

    /// Latest date of birth accepted for a projection made on `as_of`
    pub fn latest_date_of_birth(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        as_of.checked_sub_months(Months::new(self.minimum_age_years * 12))
    }

    /// Multiplier applied to basic by one annual increment
    pub fn increment_factor(&self) -> f64 {
        1.0 + self.annual_increment_rate
    }

    /// Load rules from a JSON file; missing keys keep their default values
    pub fn from_json_path(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rules = serde_json::from_reader(BufReader::new(file))?;
        Ok(rules)
    }
}
