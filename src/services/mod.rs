//! Business logic services.

pub mod execution;
pub mod notify;

pub use execution::{check_execution_allowed, resulting_case_status};
pub use notify::Notifier;
