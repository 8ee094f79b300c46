//! Similarity ranking
//!
//! Scores every candidate of a pre-filtered table by cosine similarity to a
//! query vector and keeps the top K. Candidates missing a feature value are
//! set aside with a [`Error::DimensionMismatch`] instead of aborting the run.

use ordered_float::OrderedFloat;
use skout_core::{Error, FeatureVector, Player, Result, Schema, Table};
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{debug, warn};

/// One scored candidate
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    /// The candidate row, shared with the source table
    pub player: Arc<Player>,
    /// Cosine similarity to the query, in [-1.0, 1.0]
    pub score: f64,
    /// Per-feature terms of the score, in feature-column order
    pub contributions: Vec<f64>,
}

impl RankedResult {
    pub fn name(&self) -> &str {
        &self.player.name
    }
}

/// Output of a ranking run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankOutcome {
    /// At most `k` results, best first
    pub results: Vec<RankedResult>,
    /// One `DimensionMismatch` per candidate that could not be scored
    pub skipped: Vec<Error>,
}

impl RankOutcome {
    /// Names of the candidates left out for missing features
    pub fn skipped_identities(&self) -> Vec<&str> {
        self.skipped
            .iter()
            .filter_map(|e| match e {
                Error::DimensionMismatch { identity, .. } => Some(identity.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Ranker over a fixed, ordered list of feature columns
#[derive(Debug, Clone)]
pub struct Ranker {
    feature_columns: Vec<String>,
}

impl Ranker {
    pub fn new<I, S>(feature_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            feature_columns: feature_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Ranker using every feature of the schema, in schema order
    pub fn for_schema(schema: &Schema) -> Self {
        Self::new(schema.features.iter().cloned())
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn dim(&self) -> usize {
        self.feature_columns.len()
    }

    /// Score `candidates` against `query` and keep the best `k`
    ///
    /// Ties keep the candidates' table order. `k == 0` gives no results but
    /// still reports skipped candidates.
    pub fn rank(&self, query: &FeatureVector, candidates: &Table, k: usize) -> Result<RankOutcome> {
        let indices = candidates.feature_indices(&self.feature_columns)?;
        if query.dim() != indices.len() {
            return Err(Error::InvalidDimension {
                expected: indices.len(),
                actual: query.dim(),
            });
        }

        debug!(
            "Ranking {} candidates over {} features, k={}",
            candidates.len(),
            indices.len(),
            k
        );

        let mut outcome = RankOutcome::default();
        for player in candidates {
            match player.feature_vector(&indices) {
                Ok(vector) => outcome.results.push(RankedResult {
                    player: Arc::clone(player),
                    score: query.cosine_similarity(&vector),
                    contributions: query.cosine_contributions(&vector),
                }),
                Err(actual) => {
                    warn!(
                        "Skipping {}: {} of {} feature values present",
                        player.name,
                        actual,
                        indices.len()
                    );
                    outcome.skipped.push(Error::DimensionMismatch {
                        identity: player.name.clone(),
                        expected: indices.len(),
                        actual,
                    });
                }
            }
        }

        // sort_by_key is stable: equal scores keep table order
        outcome
            .results
            .sort_by_key(|r| Reverse(OrderedFloat(r.score)));
        outcome.results.truncate(k);

        Ok(outcome)
    }
}

/// Rank `candidates` by cosine similarity to `query` over `feature_columns`
pub fn rank<S: AsRef<str>>(
    query: &FeatureVector,
    candidates: &Table,
    feature_columns: &[S],
    k: usize,
) -> Result<RankOutcome> {
    Ranker::new(feature_columns.iter().map(|c| c.as_ref().to_string())).rank(query, candidates, k)
}
