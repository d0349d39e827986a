//! Service layer for cardsplit
//!
//! The service layer provides the run logic on top of the models and the
//! ledger storage: reading exports, reconciling them against the ledger and
//! prompting for allocations.

pub mod allocation;
pub mod import;
pub mod reconciliation;
pub mod statement;

pub use allocation::{AllocationPrompt, PromptOutcome};
pub use import::{ColumnMapping, ImportService};
pub use reconciliation::ReconciliationFilter;
pub use statement::{RunSummary, StatementRun};
