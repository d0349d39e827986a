//! Display formatting for terminal output

pub mod category;
pub mod summary;
pub mod transaction;

pub use category::{format_category_descriptions, format_category_list};
pub use summary::format_run_summary;
pub use transaction::format_transaction_details;
