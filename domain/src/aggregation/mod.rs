//! Aggregation subdomain: per-provider outcomes, the merged result, and the
//! policies (summary, retry) that shape a run.

pub mod retry;
pub mod summary;
pub mod value_objects;
