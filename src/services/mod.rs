//! External services: metadata providers and LLM-assisted suggestion.

pub mod llm;
pub mod metadata;
pub mod ollama;
pub mod tvmaze;
