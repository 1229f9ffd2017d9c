//! Generation-service integration for WisePick.
//!
//! Implements the [`wisepick_core::advisor::ShoppingAdvisor`] capability on
//! top of the OpenAI Chat Completions API, with the activity's prompt text
//! rendered from minijinja templates.

pub mod openai_api_agent;
pub mod prompts;

pub use openai_api_agent::OpenAiApiAgent;
