//! # Skout Core
//!
//! Core library for the Skout player explorer.
//!
//! This crate provides the fundamental data structures and the filter engine:
//!
//! - [`Schema`] - Typed description of the dataset columns, validated once
//! - [`Player`] - One dataset row, aligned with the schema
//! - [`Table`] - Immutable, ordered set of players
//! - [`FeatureVector`] - Skill scores with cosine similarity
//! - [`filter()`] - Conjunctive, order-preserving predicate filtering
//!
//! ## Example
//!
//! ```rust
//! use skout_core::{filter, Player, PlayerId, Predicate, Schema, Table};
//!
//! let schema = Schema {
//!     version: 1,
//!     identity: "name".to_string(),
//!     image: None,
//!     features: vec!["shooting".to_string(), "vision".to_string()],
//!     categories: vec!["league".to_string()],
//!     ranges: vec!["age".to_string()],
//! };
//! let player = Player {
//!     id: PlayerId(0),
//!     name: "A. Striker".to_string(),
//!     features: vec![Some(81.0), Some(64.0)],
//!     categories: vec!["Serie A".to_string()],
//!     ranges: vec![23],
//!     image_url: None,
//! };
//! let table = Table::from_players(schema, vec![player]);
//!
//! let young = filter(&table, &[Predicate::range("age", 18.0, 25.0)]).unwrap();
//! assert_eq!(young.len(), 1);
//! ```

pub mod error;
pub mod filter;
pub mod player;
pub mod schema;
pub mod table;
pub mod vector;

pub use error::{Error, Result};
pub use filter::{filter, filter_with, Predicate, ResolvedPredicate, RowFilter};
pub use player::{Cell, Player, PlayerId};
pub use schema::{ColumnRef, Schema, SchemaError, DEFAULT_FEATURES};
pub use table::Table;
pub use vector::FeatureVector;
