#![forbid(unsafe_code)]

pub mod access;
pub mod model;
pub mod time;

pub use access::{GuardDecision, View, guard_view};
pub use time::Clock;
