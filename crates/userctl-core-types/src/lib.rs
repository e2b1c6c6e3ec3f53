//! Leaf types shared by every userctl crate
//!
//! - **Correlation**: `RequestId`, minted once per command invocation
//! - **Sensitive data**: `Sensitive<T>` keeps clear-text passwords out of logs and output
//! - **Schema constants**: canonical structured-logging field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use sensitive::Sensitive;
