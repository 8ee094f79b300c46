use thiserror::Error;

use crate::schema::SchemaError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column '{column}' does not support {predicate} predicates")]
    UnsupportedPredicate {
        column: String,
        predicate: &'static str,
    },

    #[error("Column '{0}' is not a feature column")]
    NotAFeature(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Player '{identity}' has {actual} of {expected} feature values")]
    DimensionMismatch {
        identity: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),
}

impl Error {
    /// True for errors caused by a bad column reference or predicate rather
    /// than by the data itself.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownColumn(_)
                | Error::UnsupportedPredicate { .. }
                | Error::NotAFeature(_)
                | Error::Schema(_)
        )
    }
}
