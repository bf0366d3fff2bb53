//! Projection input: salary, balances, contribution terms and promotion plan

use crate::error::InputError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Most promotions a single projection may carry
pub const MAX_PROMOTIONS: usize = 10;

/// Smallest promotion hike factor accepted (5%)
pub const MIN_HIKE_FACTOR: f64 = 1.05;

/// Largest promotion hike factor accepted (30%)
pub const MAX_HIKE_FACTOR: f64 = 1.30;

/// Tolerance for hike factors built from decimal percentages
const HIKE_EPSILON: f64 = 1e-9;

/// A one-time promotion raising basic pay in a given month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromotionEvent {
    pub year: i32,

    /// Calendar month (1-12)
    pub month: u32,

    /// Multiplier applied to basic (1 + percent/100)
    pub hike_factor: f64,
}

impl PromotionEvent {
    pub fn new(year: i32, month: u32, hike_factor: f64) -> Self {
        Self { year, month, hike_factor }
    }

    /// Build from a hike expressed in percent (10.0 = +10%)
    pub fn from_percent(year: i32, month: u32, hike_percent: f64) -> Self {
        Self::new(year, month, hike_percent / 100.0 + 1.0)
    }

    /// Whole-percent hike shown in event labels (truncated; 1.15 reads as 15)
    pub fn label_percent(&self) -> i64 {
        ((self.hike_factor - 1.0) * 100.0 + HIKE_EPSILON * 100.0).trunc() as i64
    }

    /// Whether this promotion falls in the given month
    pub fn matches(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}

/// Historical inputs needed only for the higher pension estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PensionProfile {
    pub date_of_joining: NaiveDate,

    /// Highest monthly PF pay drawn up to August 2014
    pub highest_pf_pay_aug2014: f64,
}

impl PensionProfile {
    /// Build a profile from optional form fields
    ///
    /// Returns `None` unless both fields are given and the pay is positive;
    /// a zero pay means the member skipped the pension section.
    pub fn from_form(date_of_joining: Option<NaiveDate>, highest_pf_pay_aug2014: Option<f64>) -> Option<Self> {
        match (date_of_joining, highest_pf_pay_aug2014) {
            (Some(date_of_joining), Some(pay)) if pay > 0.0 => Some(Self {
                date_of_joining,
                highest_pf_pay_aug2014: pay,
            }),
            _ => None,
        }
    }
}

/// Everything the projection engine needs, supplied once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub date_of_birth: NaiveDate,

    /// Current monthly basic pay
    pub current_basic: f64,

    /// Current monthly dearness allowance
    pub current_da: f64,

    /// Current own-side PF balance
    pub own_balance: f64,

    /// Current employer-side PF balance
    pub employer_balance: f64,

    /// Current statutory outflow ledger balance
    #[serde(default)]
    pub outflow_balance: f64,

    /// Month of the annual increment (1-12)
    pub increment_month: u32,

    /// Own contribution, percent of PF pay
    pub own_contribution_pct: f64,

    /// Employer contribution, percent of PF pay
    pub employer_contribution_pct: f64,

    /// Annual PF interest rate in percent per year (8.25 = 8.25%)
    pub annual_interest_rate: f64,

    /// Pay commission multiplying factor applied in January 2030
    pub pc_2030_factor: f64,

    /// Pay commission multiplying factor applied in January 2040
    pub pc_2040_factor: f64,

    /// Promotions in input order; the first match for a month wins
    #[serde(default)]
    pub promotions: Vec<PromotionEvent>,

    /// Joining date and pre-2014 pay for the pension estimate
    #[serde(default)]
    pub pension: Option<PensionProfile>,
}

impl Default for ProjectionInput {
    fn default() -> Self {
        Self {
            date_of_birth: NaiveDate::from_ymd_opt(1980, 1, 1).expect("valid calendar date"),
            current_basic: 80_000.0,
            current_da: 30_000.0,
            own_balance: 2_148_242.0,
            employer_balance: 1_637_688.0,
            outflow_balance: 0.0,
            increment_month: 7,
            own_contribution_pct: 12.0,
            employer_contribution_pct: 12.0,
            annual_interest_rate: 8.25,
            pc_2030_factor: 1.86,
            pc_2040_factor: 1.4,
            promotions: Vec::new(),
            pension: None,
        }
    }
}

impl ProjectionInput {
    /// Monthly interest rate applied to every ledger
    pub fn monthly_interest_rate(&self) -> f64 {
        self.annual_interest_rate / 1200.0
    }

    /// DA as a ratio of basic at the start of the horizon
    pub fn initial_da_ratio(&self) -> f64 {
        if self.current_basic > 0.0 {
            self.current_da / self.current_basic
        } else {
            0.0
        }
    }

    /// Check the input against the ranges the projection is defined for
    pub fn validate(&self) -> Result<(), InputError> {
        let amounts = [
            ("current_basic", self.current_basic),
            ("current_da", self.current_da),
            ("own_balance", self.own_balance),
            ("employer_balance", self.employer_balance),
            ("outflow_balance", self.outflow_balance),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(InputError::InvalidAmount { field, value });
            }
        }

        if !(1..=12).contains(&self.increment_month) {
            return Err(InputError::InvalidMonth {
                field: "increment_month",
                month: self.increment_month,
            });
        }

        let ranges = [
            ("own_contribution_pct", self.own_contribution_pct, 0.0, 100.0),
            ("employer_contribution_pct", self.employer_contribution_pct, 0.0, 100.0),
            ("annual_interest_rate", self.annual_interest_rate, 0.0, 100.0),
        ];
        for (field, value, min, max) in ranges {
            check_range(field, value, min, max)?;
        }

        for (field, value) in [("pc_2030_factor", self.pc_2030_factor), ("pc_2040_factor", self.pc_2040_factor)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InputError::OutOfRange { field, value, min: f64::MIN_POSITIVE, max: f64::MAX });
            }
        }

        if self.promotions.len() > MAX_PROMOTIONS {
            return Err(InputError::TooManyPromotions {
                count: self.promotions.len(),
                max: MAX_PROMOTIONS,
            });
        }
        for promo in &self.promotions {
            if !(1..=12).contains(&promo.month) {
                return Err(InputError::InvalidMonth { field: "promotion", month: promo.month });
            }
            if !promo.hike_factor.is_finite()
                || promo.hike_factor < MIN_HIKE_FACTOR - HIKE_EPSILON
                || promo.hike_factor > MAX_HIKE_FACTOR + HIKE_EPSILON
            {
                return Err(InputError::OutOfRange {
                    field: "promotion hike_factor",
                    value: promo.hike_factor,
                    min: MIN_HIKE_FACTOR,
                    max: MAX_HIKE_FACTOR,
                });
            }
        }

        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(InputError::OutOfRange { field, value, min, max })
    }
}
