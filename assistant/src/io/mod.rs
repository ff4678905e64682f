//! Side-effecting collaborators: HTTP adapters, the LLM client, prompt
//! rendering, and startup configuration. Isolated behind traits to enable
//! scripted fakes in tests.

pub mod config;
pub mod github;
pub mod llm;
pub mod prompt;
pub mod retry;
pub mod tools;
pub mod weather;
