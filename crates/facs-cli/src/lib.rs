//! CLI library components for the FMO planner.

pub mod logging;
pub mod pipeline;
