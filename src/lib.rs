//! # Skout
//!
//! Explore a static dataset of football players: scout by attributes, compare
//! a handful of players, and find the players most similar to a chosen one.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! skout --data players.csv similar "Lionel Messi" --league "Ligue 1" --age 20:30
//! skout --data players.csv scout --position Forward --range Shooting=70:100
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use skout::prelude::*;
//!
//! let session = Session::open(&SessionConfig::default()).unwrap();
//!
//! // Scout
//! let young = session.scout(&[Predicate::range("age", 18.0, 23.0)]).unwrap();
//!
//! // Similar players, outside the query's own league
//! let report = session
//!     .similar("Lionel Messi", &[Predicate::exclusion("league", "Ligue 1")])
//!     .unwrap();
//! for result in &report.outcome.results {
//!     println!("{} {:.3}", result.name(), result.score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `skout-core` - Schema, players, immutable tables, feature vectors, filtering
//! - `skout-storage` - Dataset store (CSV load and validation)
//! - `skout-similarity` - Cosine ranking, explanations, attribute leaders

pub mod config;
pub mod session;

// Re-export core types
pub use skout_core::{
    filter, ColumnRef, Error, FeatureVector, Player, PlayerId, Predicate, Result, RowFilter,
    Schema, SchemaError, Table,
};

// Re-export storage
pub use skout_storage::{DatasetStore, LoadError};

// Re-export similarity
pub use skout_similarity::{
    attribute_leaders, compare, rank, AttributeLeader, Comparison, ExplainedResult,
    FeatureContribution, RankOutcome, RankedResult, Ranker, SimilarResponse, SimilarityStats,
};

pub use config::{ConfigError, SessionConfig, DEFAULT_TOP_K};
pub use session::{Session, SimilarReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DatasetStore, Error, FeatureVector, LoadError, Predicate, RankOutcome, Ranker, Result,
        Schema, Session, SessionConfig, SimilarReport, Table,
    };
}
