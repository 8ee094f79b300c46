//! Explainability for similarity results
//!
//! Serializable views of a ranking that show how each feature contributed to
//! a candidate's cosine score.

use crate::rank::{RankOutcome, RankedResult};
use serde::Serialize;
use serde_json::Value;
use skout_core::Table;

/// One feature's share of a cosine score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: String,
    pub contribution: f64,
}

/// A ranked player with per-feature score breakdown
#[derive(Debug, Clone, Serialize)]
pub struct ExplainedResult {
    /// 1-based position in the ranking
    pub rank: usize,
    pub name: String,
    pub score: f64,
    /// Full row, keyed by column name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<Value>,
    /// Per-feature terms of the score in feature-column order; they sum to
    /// `score`
    pub explain: Vec<FeatureContribution>,
}

impl ExplainedResult {
    pub fn from_ranked(
        rank: usize,
        ranked: &RankedResult,
        feature_columns: &[String],
        table: Option<&Table>,
    ) -> Self {
        Self {
            rank,
            name: ranked.player.name.clone(),
            score: ranked.score,
            row: table.map(|t| t.row_json(&ranked.player)),
            explain: feature_columns
                .iter()
                .zip(ranked.contributions.iter())
                .map(|(feature, &contribution)| FeatureContribution {
                    feature: feature.clone(),
                    contribution,
                })
                .collect(),
        }
    }
}

/// Response body of a similarity query
#[derive(Debug, Clone, Serialize)]
pub struct SimilarResponse {
    pub query: String,
    pub result: Vec<ExplainedResult>,
    /// Candidates left out for missing feature values
    pub skipped: Vec<String>,
    pub stats: SimilarityStats,
}

impl SimilarResponse {
    /// Build from an outcome; pass `table` to include full rows
    pub fn from_outcome(
        query: &str,
        outcome: &RankOutcome,
        feature_columns: &[String],
        candidates_count: usize,
        table: Option<&Table>,
    ) -> Self {
        Self {
            query: query.to_string(),
            result: outcome
                .results
                .iter()
                .enumerate()
                .map(|(i, r)| ExplainedResult::from_ranked(i + 1, r, feature_columns, table))
                .collect(),
            skipped: outcome
                .skipped_identities()
                .into_iter()
                .map(str::to_string)
                .collect(),
            stats: SimilarityStats::compute(outcome, feature_columns, candidates_count),
        }
    }
}

/// Summary statistics for a similarity query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    pub results_count: usize,
    pub skipped_count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    /// Feature that contributed most to the best result
    pub top_contributing_feature: Option<String>,
}

impl SimilarityStats {
    pub fn compute(outcome: &RankOutcome, feature_columns: &[String], candidates_count: usize) -> Self {
        let results = &outcome.results;
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                skipped_count: outcome.skipped.len(),
                avg_score: 0.0,
                best_score: 0.0,
                top_contributing_feature: None,
            };
        };

        let avg_score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;

        let top_contributing_feature = best
            .contributions
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0.0)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .and_then(|(i, _)| feature_columns.get(i).cloned());

        Self {
            candidates_count,
            results_count: results.len(),
            skipped_count: outcome.skipped.len(),
            avg_score,
            best_score: best.score,
            top_contributing_feature,
        }
    }
}
