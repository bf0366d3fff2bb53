//! Read-only views over a projection: filters, summaries, milestones and CSV export

mod filter;
mod summary;
mod export;

pub use filter::{fiscal_years, LedgerFilter};
pub use summary::{Milestone, ProjectionSummary, YearlySummary};
pub use export::{export_ledger, round_up_to_10, write_ledger_csv};
