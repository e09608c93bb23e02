//! Concrete chat backends

pub mod openai;

pub use openai::{OpenAIConfig, OpenAIProvider};
