//! Constants of the higher pension formula

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters of the higher pension estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PensionRules {
    /// Last day of service counted at the pre-cutoff pay (31 Aug 2014)
    pub service_cutoff: NaiveDate,

    /// First day of service averaged over the trailing window (1 Sep 2014)
    pub averaging_from: NaiveDate,

    /// Age at which pensionable service ends
    pub pension_age_years: u32,

    /// Length of the trailing PF pay average
    pub averaging_months: u32,

    /// Weightage days added when total service exceeds the threshold
    pub bonus_days: i64,

    /// Total service (in years) above which bonus days are granted
    pub bonus_threshold_years: f64,

    /// Days per year used to convert service days into years
    pub days_per_year: f64,

    /// Pensionable service divisor (70 * 365)
    pub divisor: f64,
}

impl Default for PensionRules {
    fn default() -> Self {
        Self {
            service_cutoff: NaiveDate::from_ymd_opt(2014, 8, 31).expect("valid calendar date"),
            averaging_from: NaiveDate::from_ymd_opt(2014, 9, 1).expect("valid calendar date"),
            pension_age_years: 58,
            averaging_months: 60,
            bonus_days: 730,
            bonus_threshold_years: 20.0,
            days_per_year: 365.25,
            divisor: 70.0 * 365.0,
        }
    }
}
