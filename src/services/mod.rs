pub mod analysis;
pub mod sql_generation;
pub mod sql_safety;

use crate::llm::LlmError;
use std::error::Error;
use std::fmt;

/// Everything that can go wrong while producing SQL or an analysis.
#[derive(Debug)]
pub enum GenerationError {
    Llm(LlmError),
    Template(minijinja::Error),
    Encoding(serde_json::Error),
    UnsafeSql(sql_safety::UnsafeSql),
    /// The model answered, but nothing usable was left after cleanup.
    EmptyCompletion(&'static str),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Llm(e) => write!(f, "{}", e),
            GenerationError::Template(e) => write!(f, "Prompt template error: {}", e),
            GenerationError::Encoding(e) => write!(f, "Failed to encode filters: {}", e),
            GenerationError::UnsafeSql(e) => write!(f, "{}", e),
            GenerationError::EmptyCompletion(what) => write!(f, "LLM returned an empty {}", what),
        }
    }
}

impl Error for GenerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenerationError::Llm(e) => Some(e),
            GenerationError::Template(e) => Some(e),
            GenerationError::Encoding(e) => Some(e),
            GenerationError::UnsafeSql(e) => Some(e),
            GenerationError::EmptyCompletion(_) => None,
        }
    }
}

impl From<LlmError> for GenerationError {
    fn from(e: LlmError) -> Self {
        GenerationError::Llm(e)
    }
}

impl From<minijinja::Error> for GenerationError {
    fn from(e: minijinja::Error) -> Self {
        GenerationError::Template(e)
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(e: serde_json::Error) -> Self {
        GenerationError::Encoding(e)
    }
}

impl From<sql_safety::UnsafeSql> for GenerationError {
    fn from(e: sql_safety::UnsafeSql) -> Self {
        GenerationError::UnsafeSql(e)
    }
}
