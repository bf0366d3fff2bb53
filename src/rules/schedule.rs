//! DA revision bands and the statutory outflow formula

use serde::{Deserialize, Serialize};

/// Year of the first modelled pay commission
pub const FIRST_PAY_COMMISSION_YEAR: i32 = 2030;

/// Year of the second modelled pay commission
pub const SECOND_PAY_COMMISSION_YEAR: i32 = 2040;

/// What the January revision does in a given year
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JanuaryRevision {
    /// Add `step` to the DA ratio and recompute DA
    DaStep { step: f64 },
    /// Reset DA to zero and scale basic by the commission factor and catch-up increments
    PayCommission { year: i32 },
}

/// DA step sizes per band, and the catch-up applied at a pay commission reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaSchedule {
    /// DA ratio step before the first pay commission
    pub step_before_first_commission: f64,

    /// DA ratio step between the two pay commissions
    pub step_between_commissions: f64,

    /// DA ratio step after the second pay commission
    pub step_after_second_commission: f64,

    /// Increments folded into basic at each reset (basic *= factor * 1.03^n)
    pub catch_up_increments: i32,
}

impl Default for DaSchedule {
    fn default() -> Self {
        Self {
            step_before_first_commission: 0.04,
            step_between_commissions: 0.02,
            step_after_second_commission: 0.01,
            catch_up_increments: 3,
        }
    }
}

impl DaSchedule {
    /// The January revision for `year`; exactly one band applies
    pub fn january_revision(&self, year: i32) -> JanuaryRevision {
        if year < FIRST_PAY_COMMISSION_YEAR {
            JanuaryRevision::DaStep { step: self.step_before_first_commission }
        } else if year == FIRST_PAY_COMMISSION_YEAR || year == SECOND_PAY_COMMISSION_YEAR {
            JanuaryRevision::PayCommission { year }
        } else if year < SECOND_PAY_COMMISSION_YEAR {
            JanuaryRevision::DaStep { step: self.step_between_commissions }
        } else {
            JanuaryRevision::DaStep { step: self.step_after_second_commission }
        }
    }
}

/// Monthly diversion to the statutory pension fund
///
/// `pay * rate` up to the ceiling; above it
/// `pay * rate + (pay - ceiling) * excess_rate - flat_deduction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutflowRule {
    pub wage_ceiling: f64,
    pub pension_rate: f64,
    pub excess_rate: f64,
    pub flat_deduction: f64,
}

impl Default for OutflowRule {
    fn default() -> Self {
        Self {
            wage_ceiling: 15_000.0,
            pension_rate: 0.0833,
            excess_rate: 0.0116,
            flat_deduction: 1_250.0,
        }
    }
}
