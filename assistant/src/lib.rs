//! AI operations assistant: plan, execute, verify.
//!
//! Turns a free-text task into a sequence of tool invocations against GitHub
//! and OpenWeather, then a human-readable report. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (data model, heuristic planning,
//!   result aggregation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting collaborators (HTTP adapters, LLM client,
//!   configuration). Isolated behind traits to enable scripted fakes in tests.
//!
//! Agent modules ([`agents`]) coordinate core logic with I/O per pipeline
//! stage; [`run`] wires a whole task end to end.

pub mod agents;
pub mod core;
pub mod io;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
