//! Core parsing and resolution logic.

pub mod detector;
pub mod matcher;
pub mod parser;
pub mod patterns;
pub mod resolver;
pub mod scanner;
