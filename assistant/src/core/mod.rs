//! Pure, deterministic logic: data model, heuristic planning, and result
//! aggregation. No I/O lives here, so everything is testable in isolation.

pub mod heuristics;
pub mod plan;
pub mod report;
