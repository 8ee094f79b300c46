//! # Skout Storage
//!
//! Loads the read-only player dataset once per session.
//!
//! The store reads a comma-separated file with a header row, checks that every
//! column the [`Schema`](skout_core::Schema) names is present, rejects
//! duplicate player names, and returns an immutable
//! [`Table`](skout_core::Table). Failures are returned as [`LoadError`]; an
//! unreadable dataset never turns into an empty table.

pub mod error;
pub mod loader;

pub use error::LoadError;
pub use loader::{load_from_reader, DatasetStore};
