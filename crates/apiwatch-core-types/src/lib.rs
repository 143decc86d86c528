//! Types shared by every apiwatch crate
//!
//! - **Correlation**: `RunId` tags every log event of one check invocation
//! - **Sensitive data**: `Sensitive<T>` keeps webhook secrets out of logs
//! - **Schema constants**: canonical structured-logging field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RunId;
pub use sensitive::Sensitive;
