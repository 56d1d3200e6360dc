//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed selection on line {line}: expected '<package>:<channel>', got '{content}'")]
    MalformedSelection { line: usize, content: String },
    #[error("channel '{channel}' of package '{package}' has no entries")]
    EmptyChannel { package: String, channel: String },
    #[error("{schema} '{name}' is missing required field '{field}'")]
    MissingField {
        schema: &'static str,
        name: String,
        field: &'static str,
    },
    #[error("catalog value #{index} is {kind}, expected an object")]
    NotAnObject { index: usize, kind: &'static str },
}
