//! State threaded from one projected month to the next

use super::ledger::LedgerSet;
use super::pay::PayState;
use crate::input::ProjectionInput;

/// Carried state of a projection between months
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Months already projected
    pub months_projected: u32,

    /// Basic, DA and the DA ratio after the last projected month
    pub pay: PayState,

    /// Balances after the last projected month
    pub ledgers: LedgerSet,
}

impl ProjectionState {
    /// Initialize state from the input at the start of the horizon
    pub fn from_input(input: &ProjectionInput) -> Self {
        Self {
            months_projected: 0,
            pay: PayState::new(input.current_basic, input.current_da, input.initial_da_ratio()),
            ledgers: LedgerSet::new(input.own_balance, input.employer_balance, input.outflow_balance),
        }
    }

    /// Record that a month was finalized with the given pay
    pub fn advance_month(&mut self, pay: PayState) {
        self.pay = pay;
        self.months_projected += 1;
    }
}
