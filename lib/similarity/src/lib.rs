//! # Skout Similarity
//!
//! Finds the players most similar to a chosen one.
//!
//! ## Features
//!
//! - **Cosine ranking**: Top-K over a fixed, ordered list of skill attributes
//! - **Deterministic ties**: Equal scores keep the candidate table order
//! - **Skipped candidates**: Rows missing a skill value are reported, not dropped
//! - **Explainability**: Per-feature contribution breakdown of every score
//! - **Leaders**: Which player of a group is best at each attribute
//!
//! ## Example
//!
//! ```rust
//! use skout_core::{FeatureVector, Player, PlayerId, Schema, Table};
//! use skout_similarity::Ranker;
//!
//! let schema = Schema {
//!     version: 1,
//!     identity: "name".to_string(),
//!     image: None,
//!     features: vec!["shooting".to_string(), "vision".to_string()],
//!     categories: Vec::new(),
//!     ranges: Vec::new(),
//! };
//! let player = |id, name: &str, f: [f64; 2]| Player {
//!     id: PlayerId(id),
//!     name: name.to_string(),
//!     features: f.iter().copied().map(Some).collect(),
//!     categories: Vec::new(),
//!     ranges: Vec::new(),
//!     image_url: None,
//! };
//! let pool = Table::from_players(
//!     schema,
//!     vec![player(0, "Playmaker", [20.0, 90.0]), player(1, "Poacher", [95.0, 15.0])],
//! );
//!
//! let query = FeatureVector::new(vec![88.0, 20.0]);
//! let outcome = Ranker::for_schema(pool.schema()).rank(&query, &pool, 5).unwrap();
//! assert_eq!(outcome.results[0].name(), "Poacher");
//! ```
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Table     │────>│   filter    │────>│   Ranker    │
//! │ (loaded)    │     │ (predicates)│     │ (cosine)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │  Explained  │
//!                                         │   Results   │
//!                                         └─────────────┘
//! ```

pub mod explain;
pub mod leaders;
pub mod rank;

pub use explain::{ExplainedResult, FeatureContribution, SimilarResponse, SimilarityStats};
pub use leaders::{attribute_leaders, compare, AttributeLeader, Comparison};
pub use rank::{rank, RankOutcome, RankedResult, Ranker};
