//! Monthly contribution amounts derived from PF pay

use crate::rules::OutflowRule;
use serde::{Deserialize, Serialize};

/// The three contributions posted in a month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Contributions {
    pub own: f64,
    pub employer: f64,
    pub outflow: f64,
}

#[derive(Debug, Clone)]
pub struct ContributionCalculator {
    own_pct: f64,
    employer_pct: f64,
    outflow: OutflowRule,
}

impl ContributionCalculator {
    pub fn new(own_pct: f64, employer_pct: f64, outflow: OutflowRule) -> Self {
        Self { own_pct, employer_pct, outflow }
    }

    pub fn calculate(&self, pf_pay: f64) -> Contributions {
        Contributions {
            own: pf_pay * self.own_pct / 100.0,
            employer: pf_pay * self.employer_pct / 100.0,
            outflow: self.outflow.monthly_outflow(pf_pay),
        }
    }
}

impl OutflowRule {
    /// Two-band statutory outflow; the flat deduction applies only above the ceiling
    pub fn monthly_outflow(&self, pf_pay: f64) -> f64 {
        if pf_pay <= self.wage_ceiling {
            pf_pay * self.pension_rate
        } else {
            pf_pay * self.pension_rate + (pf_pay - self.wage_ceiling) * self.excess_rate
                - self.flat_deduction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_contributions() {
        let calc = ContributionCalculator::new(12.0, 12.0, OutflowRule::default());
        let c = calc.calculate(110_000.0);

        assert_abs_diff_eq!(c.own, 13_200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.employer, 13_200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.outflow, 9_015.0, epsilon = 1e-6);
    }

    #[test]
    fn test_outflow_bands() {
        let rule = OutflowRule::default();
        assert_abs_diff_eq!(rule.monthly_outflow(10_000.0), 833.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rule.monthly_outflow(15_000.0), 1_249.5, epsilon = 1e-9);
        // Just above the ceiling the flat deduction dominates
        assert_abs_diff_eq!(rule.monthly_outflow(15_001.0), 15_001.0 * 0.0833 + 0.0116 - 1_250.0, epsilon = 1e-9);
    }

    #[test]
    fn test_uneven_percentages() {
        let calc = ContributionCalculator::new(10.0, 12.0, OutflowRule::default());
        let c = calc.calculate(50_000.0);
        assert_abs_diff_eq!(c.own, 5_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.employer, 6_000.0, epsilon = 1e-9);
    }
}
