//! Completion-API provider abstraction and the fixed prompt templates used
//! by the study endpoints.

pub mod error;
pub mod groq;
pub mod http;
#[cfg(feature = "mock")]
pub mod mock;
pub mod prompt;
pub mod provider;
mod retry;

pub use error::LlmError;
pub use provider::{ChatOptions, LlmProvider, Message, Role};
