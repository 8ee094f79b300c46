use skout_core::SchemaError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Cannot read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Line {line}: invalid value '{value}' in column '{column}'")]
    Malformed {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Duplicate player '{name}' on lines {first_line} and {line}")]
    DuplicateIdentity {
        name: String,
        first_line: u64,
        line: u64,
    },

    #[error("Dataset exceeds {0} rows")]
    TooManyRows(u32),

    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),
}
