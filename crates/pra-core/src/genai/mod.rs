//! Generation capability integration
//!
//! The capability is optional at every call site: the interpreter and the
//! narrative stage each carry a documented deterministic fallback.

pub mod client;
pub mod narrative;
pub mod prompts;

pub use client::{
    strip_code_fences, CompletionRequest, GenAiError, GenerativeClient, HttpGenerativeClient,
};
pub use narrative::NarrativeEngine;
