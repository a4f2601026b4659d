//! Completion service integration

mod groq;
mod provider;

pub use groq::GroqProvider;
pub use provider::CompletionProvider;
