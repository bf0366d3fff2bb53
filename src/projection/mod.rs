//! Monthly PF projection: calendar, pay revisions, contributions and ledgers

mod calendar;
mod contributions;
mod events;
mod ledger;
mod pay;
mod records;
mod state;
mod engine;
mod cache;

pub use calendar::{end_of_month, first_of_month, month_starts, EventCalendar, MonthRevisions};
pub use contributions::{ContributionCalculator, Contributions};
pub use events::{event_label, EventTag};
pub use ledger::{Ledger, LedgerEntry, LedgerMonth, LedgerSet};
pub use pay::{PayEngine, PayState};
pub use records::{fiscal_year_label, round2, MonthRecord, Projection};
pub use state::ProjectionState;
pub use engine::{compute_projection, ProjectionEngine};
pub use cache::{ProjectionCache, DEFAULT_CAPACITY as DEFAULT_CACHE_CAPACITY};
