//! Agent stages: plan, execute, verify.
//!
//! Each stage accepts and returns only the shared data shapes from
//! [`crate::core::plan`]; no stage depends on another's internals.

pub mod executor;
pub mod planner;
pub mod verifier;
