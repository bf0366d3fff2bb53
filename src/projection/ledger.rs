//! Interest-bearing balance ledgers with the fiscal-year-end interest deferral
//!
//! Every month: `opening = previous closing`, `interest = previous closing * rate`,
//! `closing = opening + contribution + interest`, except:
//! - March shows zero interest; the interest it earned is held back and added to
//!   April's opening balance.
//! - April closes at `opening + contribution`; its displayed interest is not added.
//! - The first projected month opens at the supplied balance and earns nothing.

use super::contributions::Contributions;
use serde::{Deserialize, Serialize};

/// Opening, interest and closing of one ledger for one month
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub opening: f64,
    pub interest: f64,
    pub closing: f64,
}

/// A single balance rolled forward month by month
#[derive(Debug, Clone)]
pub struct Ledger {
    /// Closing balance of the last rolled month (the supplied balance before the first)
    balance: f64,

    /// March interest waiting to be credited into the next opening balance
    deferred_interest: Option<f64>,

    started: bool,
}

impl Ledger {
    pub fn new(opening_balance: f64) -> Self {
        Self {
            balance: opening_balance,
            deferred_interest: None,
            started: false,
        }
    }

    /// Closing balance of the most recent month
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Roll one month forward; the flag reports whether deferred interest was credited
    pub fn roll_forward(&mut self, calendar_month: u32, contribution: f64, monthly_rate: f64) -> (LedgerEntry, bool) {
        if !self.started {
            self.started = true;
            let opening = self.balance;
            let closing = opening + contribution;
            self.balance = closing;
            return (LedgerEntry { opening, interest: 0.0, closing }, false);
        }

        let previous_closing = self.balance;
        let credited = self.deferred_interest.take();
        let opening = previous_closing + credited.unwrap_or(0.0);
        let accrued = previous_closing * monthly_rate;

        let (interest, closing) = match calendar_month {
            3 => {
                self.deferred_interest = Some(accrued);
                (0.0, opening + contribution)
            }
            4 => (accrued, opening + contribution),
            _ => (accrued, opening + contribution + accrued),
        };

        self.balance = closing;
        (LedgerEntry { opening, interest, closing }, credited.is_some())
    }
}

/// One month of all three ledgers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerMonth {
    pub own: LedgerEntry,
    pub employer: LedgerEntry,
    pub outflow: LedgerEntry,

    /// Deferred March interest was credited into this month's openings
    pub interest_credited: bool,
}

/// Own, employer and statutory outflow ledgers sharing one rate
#[derive(Debug, Clone)]
pub struct LedgerSet {
    own: Ledger,
    employer: Ledger,
    outflow: Ledger,
}

impl LedgerSet {
    pub fn new(own: f64, employer: f64, outflow: f64) -> Self {
        Self {
            own: Ledger::new(own),
            employer: Ledger::new(employer),
            outflow: Ledger::new(outflow),
        }
    }

    pub fn roll_forward(&mut self, calendar_month: u32, contributions: &Contributions, monthly_rate: f64) -> LedgerMonth {
        let (own, credited) = self.own.roll_forward(calendar_month, contributions.own, monthly_rate);
        let (employer, _) = self.employer.roll_forward(calendar_month, contributions.employer, monthly_rate);
        let (outflow, _) = self.outflow.roll_forward(calendar_month, contributions.outflow, monthly_rate);

        LedgerMonth {
            own,
            employer,
            outflow,
            interest_credited: credited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const RATE: f64 = 12.0 / 1200.0; // 1% a month keeps the arithmetic readable

    #[test]
    fn test_first_month_earns_nothing() {
        let mut ledger = Ledger::new(1_000.0);
        let (entry, credited) = ledger.roll_forward(7, 100.0, RATE);
        assert_eq!(entry, LedgerEntry { opening: 1_000.0, interest: 0.0, closing: 1_100.0 });
        assert!(!credited);
    }

    #[test]
    fn test_normal_month() {
        let mut ledger = Ledger::new(1_000.0);
        ledger.roll_forward(6, 100.0, RATE);
        let (entry, _) = ledger.roll_forward(7, 100.0, RATE);

        assert_abs_diff_eq!(entry.opening, 1_100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(entry.interest, 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(entry.closing, 1_211.0, epsilon = 1e-9);
    }

    #[test]
    fn test_march_interest_deferred_to_april() {
        let mut ledger = Ledger::new(1_000.0);
        ledger.roll_forward(1, 0.0, RATE); // Jan: first month, closes 1000
        let (feb, _) = ledger.roll_forward(2, 0.0, RATE);
        assert_abs_diff_eq!(feb.closing, 1_010.0, epsilon = 1e-9);

        let (march, credited) = ledger.roll_forward(3, 100.0, RATE);
        assert!(!credited);
        assert_eq!(march.interest, 0.0);
        assert_abs_diff_eq!(march.opening, 1_010.0, epsilon = 1e-9);
        assert_abs_diff_eq!(march.closing, 1_110.0, epsilon = 1e-9);

        let (april, credited) = ledger.roll_forward(4, 100.0, RATE);
        assert!(credited);
        // Opening carries February-based March interest of 10.10
        assert_abs_diff_eq!(april.opening, 1_120.1, epsilon = 1e-9);
        // Displayed interest is on March's closing and is not added
        assert_abs_diff_eq!(april.interest, 11.1, epsilon = 1e-9);
        assert_abs_diff_eq!(april.closing, 1_220.1, epsilon = 1e-9);

        let (may, credited) = ledger.roll_forward(5, 100.0, RATE);
        assert!(!credited);
        assert_abs_diff_eq!(may.opening, april.closing, epsilon = 1e-12);
        assert_abs_diff_eq!(may.closing, may.opening + 100.0 + may.interest, epsilon = 1e-9);
    }

    #[test]
    fn test_horizon_starting_in_march_defers_nothing() {
        let mut ledger = Ledger::new(1_000.0);
        let (march, _) = ledger.roll_forward(3, 100.0, RATE);
        assert_eq!(march.closing, 1_100.0);

        let (april, credited) = ledger.roll_forward(4, 100.0, RATE);
        assert!(!credited);
        assert_eq!(april.opening, 1_100.0);
        assert_abs_diff_eq!(april.closing, 1_200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ledger_set_flags_credit_once() {
        let mut set = LedgerSet::new(1_000.0, 800.0, 0.0);
        let contributions = Contributions { own: 10.0, employer: 10.0, outflow: 5.0 };

        let months: Vec<LedgerMonth> = [2, 3, 4, 5]
            .iter()
            .map(|&m| set.roll_forward(m, &contributions, RATE))
            .collect();

        let flags: Vec<bool> = months.iter().map(|m| m.interest_credited).collect();
        assert_eq!(flags, vec![false, false, true, false]);
        assert!(months[2].outflow.opening > months[1].outflow.closing);
    }
}
