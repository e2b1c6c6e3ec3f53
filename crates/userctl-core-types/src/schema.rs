//! Field keys and event names shared by the logging macros and the test
//! capture layer
//!
//! Log assertions match on these, so they must stay stable.

pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
