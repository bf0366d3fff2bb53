//! Pay engine: applies the month's revisions to basic, DA and the DA ratio
//!
//! `PayEngine::step` is a pure function of the carried `PayState` and the month's
//! revisions; the driver threads the returned state into the next month.

use super::calendar::MonthRevisions;
use super::events::{whole_percent, EventTag};
use crate::rules::{JanuaryRevision, SchemeRules, FIRST_PAY_COMMISSION_YEAR};
use serde::{Deserialize, Serialize};

/// Pay components carried from month to month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayState {
    pub basic: f64,
    pub da: f64,

    /// DA as a ratio of basic, mutated by DA revisions and first-year increments
    pub da_ratio: f64,
}

impl PayState {
    pub fn new(basic: f64, da: f64, da_ratio: f64) -> Self {
        Self { basic, da, da_ratio }
    }

    /// Basic + DA, the base for all contributions
    pub fn pf_pay(&self) -> f64 {
        self.basic + self.da
    }
}

/// Revision parameters fixed for one projection run
#[derive(Debug, Clone)]
pub struct PayEngine {
    /// Calendar year of the first projected month
    first_year: i32,
    increment_factor: f64,
    increment_percent: i64,
    first_year_da_bump: f64,
    pc_2030_factor: f64,
    pc_2040_factor: f64,
    catch_up_factor: f64,
}

impl PayEngine {
    pub fn new(rules: &SchemeRules, first_year: i32, pc_2030_factor: f64, pc_2040_factor: f64) -> Self {
        Self {
            first_year,
            increment_factor: rules.increment_factor(),
            increment_percent: whole_percent(rules.annual_increment_rate),
            first_year_da_bump: rules.first_year_da_bump,
            pc_2030_factor,
            pc_2040_factor,
            catch_up_factor: rules
                .increment_factor()
                .powi(rules.da_schedule.catch_up_increments),
        }
    }

    /// Apply this month's revisions, returning the new state and the tags that fired
    pub fn step(&self, state: PayState, year: i32, revisions: &MonthRevisions) -> (PayState, Vec<EventTag>) {
        let mut next = state;
        let mut tags = Vec::new();

        if let Some(promo) = revisions.promotion {
            next.basic *= promo.hike_factor;
            next.da = next.basic * next.da_ratio;
            tags.push(EventTag::Promotion { percent: promo.label_percent() });
        } else if revisions.increment {
            let previous_basic = next.basic;
            next.basic = previous_basic * self.increment_factor;

            if year == self.first_year {
                next.da += previous_basic * self.first_year_da_bump;
                next.da_ratio = if next.basic > 0.0 { next.da / next.basic } else { 0.0 };
            } else {
                next.da = next.basic * next.da_ratio;
            }
            tags.push(EventTag::AnnualIncrement { percent: self.increment_percent });
        }

        match revisions.january {
            Some(JanuaryRevision::DaStep { step }) => {
                next.da_ratio += step;
                next.da = next.basic * next.da_ratio;
                tags.push(EventTag::DaRevision { step_percent: whole_percent(step) });
            }
            Some(JanuaryRevision::PayCommission { year: commission_year }) => {
                let factor = if commission_year == FIRST_PAY_COMMISSION_YEAR {
                    self.pc_2030_factor
                } else {
                    self.pc_2040_factor
                };
                next.da_ratio = 0.0;
                next.da = 0.0;
                next.basic *= factor * self.catch_up_factor;
                tags.push(EventTag::PayCommissionReset { year: commission_year });
            }
            None => {}
        }

        (next, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PromotionEvent;
    use approx::assert_relative_eq;

    fn engine(first_year: i32) -> PayEngine {
        PayEngine::new(&SchemeRules::default(), first_year, 1.86, 1.4)
    }

    fn quiet() -> MonthRevisions {
        MonthRevisions { promotion: None, increment: false, january: None }
    }

    #[test]
    fn test_quiet_month_carries_state() {
        let state = PayState::new(80_000.0, 30_000.0, 0.375);
        let (next, tags) = engine(2026).step(state, 2027, &quiet());
        assert_eq!(next, state);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_first_year_increment_adds_flat_da() {
        let state = PayState::new(80_000.0, 30_000.0, 0.375);
        let revisions = MonthRevisions { increment: true, ..quiet() };
        let (next, tags) = engine(2026).step(state, 2026, &revisions);

        assert_relative_eq!(next.basic, 82_400.0, epsilon = 1e-9);
        assert_relative_eq!(next.da, 33_200.0, epsilon = 1e-9);
        assert_relative_eq!(next.da_ratio, 33_200.0 / 82_400.0, epsilon = 1e-12);
        assert_eq!(tags, vec![EventTag::AnnualIncrement { percent: 3 }]);
    }

    #[test]
    fn test_later_increment_keeps_ratio() {
        let state = PayState::new(100_000.0, 50_000.0, 0.5);
        let revisions = MonthRevisions { increment: true, ..quiet() };
        let (next, _) = engine(2026).step(state, 2028, &revisions);

        assert_relative_eq!(next.basic, 103_000.0, epsilon = 1e-9);
        assert_relative_eq!(next.da, 51_500.0, epsilon = 1e-9);
        assert_eq!(next.da_ratio, 0.5);
    }

    #[test]
    fn test_promotion_keeps_ratio() {
        let state = PayState::new(100_000.0, 40_000.0, 0.4);
        let revisions = MonthRevisions {
            promotion: Some(PromotionEvent::from_percent(2028, 3, 10.0)),
            ..quiet()
        };
        let (next, tags) = engine(2026).step(state, 2028, &revisions);

        assert_relative_eq!(next.basic, 110_000.0, epsilon = 1e-9);
        assert_relative_eq!(next.da, 44_000.0, epsilon = 1e-9);
        assert_eq!(tags, vec![EventTag::Promotion { percent: 10 }]);
    }

    #[test]
    fn test_da_revision_bands() {
        let state = PayState::new(100_000.0, 40_000.0, 0.4);
        let revisions = MonthRevisions {
            january: Some(JanuaryRevision::DaStep { step: 0.02 }),
            ..quiet()
        };
        let (next, tags) = engine(2026).step(state, 2033, &revisions);

        assert_relative_eq!(next.da_ratio, 0.42, epsilon = 1e-12);
        assert_relative_eq!(next.da, 42_000.0, epsilon = 1e-9);
        assert_eq!(tags, vec![EventTag::DaRevision { step_percent: 2 }]);
    }

    #[test]
    fn test_pay_commission_reset() {
        let state = PayState::new(100_000.0, 70_000.0, 0.7);
        let revisions = MonthRevisions {
            january: Some(JanuaryRevision::PayCommission { year: 2030 }),
            ..quiet()
        };
        let (next, tags) = engine(2026).step(state, 2030, &revisions);

        assert_eq!(next.da, 0.0);
        assert_eq!(next.da_ratio, 0.0);
        assert_relative_eq!(next.basic, 100_000.0 * 1.86 * 1.03_f64.powi(3), epsilon = 1e-6);
        assert_eq!(tags, vec![EventTag::PayCommissionReset { year: 2030 }]);

        let revisions = MonthRevisions {
            january: Some(JanuaryRevision::PayCommission { year: 2040 }),
            ..quiet()
        };
        let (next, _) = engine(2026).step(state, 2040, &revisions);
        assert_relative_eq!(next.basic, 100_000.0 * 1.4 * 1.03_f64.powi(3), epsilon = 1e-6);
    }

    #[test]
    fn test_increment_and_january_both_fire() {
        let state = PayState::new(100_000.0, 40_000.0, 0.4);
        let revisions = MonthRevisions {
            increment: true,
            january: Some(JanuaryRevision::DaStep { step: 0.04 }),
            ..quiet()
        };
        let (next, tags) = engine(2026).step(state, 2027, &revisions);

        assert_relative_eq!(next.basic, 103_000.0, epsilon = 1e-9);
        assert_relative_eq!(next.da, 103_000.0 * 0.44, epsilon = 1e-6);
        assert_eq!(
            tags,
            vec![
                EventTag::AnnualIncrement { percent: 3 },
                EventTag::DaRevision { step_percent: 4 },
            ]
        );
    }
}
