//! PF Projection - month-by-month provident fund projection to retirement
//!
//! This library provides:
//! - Pay revision modelling (increments, promotions, DA revisions, pay commissions)
//! - Own, employer and statutory-outflow ledgers with fiscal-year interest crediting
//! - Higher pension estimation from the projected ledger
//! - Ledger filters, summaries and CSV export
//! - Parallel what-if scenarios

pub mod error;
pub mod rules;
pub mod input;
pub mod projection;
pub mod pension;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::{ExportError, InputError, LoadError, PensionError, ProjectionError};
pub use rules::SchemeRules;
pub use input::{PensionProfile, ProjectionInput, PromotionEvent};
pub use projection::{compute_projection, MonthRecord, Projection, ProjectionCache, ProjectionEngine};
pub use pension::{estimate_pension, PensionEstimate, PensionEstimator};
pub use report::{LedgerFilter, ProjectionSummary, YearlySummary};
pub use scenario::ScenarioRunner;
