//! Session facade tying the dataset store, filter engine and ranker together

use crate::config::SessionConfig;
use skout_core::{filter, Predicate, Result, Table};
use skout_similarity::{attribute_leaders, compare, AttributeLeader, Comparison, RankOutcome, Ranker};
use skout_storage::{DatasetStore, LoadError};
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a similar-players query
#[derive(Debug, Clone)]
pub struct SimilarReport {
    pub query: String,
    /// Size of the filtered pool the ranker scored
    pub candidates_count: usize,
    pub outcome: RankOutcome,
    /// Leaders among the query player and the returned players
    pub leaders: Vec<AttributeLeader>,
}

/// One exploration session over a loaded dataset
///
/// Owns the immutable table; every query works on derived views of it.
#[derive(Debug, Clone)]
pub struct Session {
    table: Table,
    ranker: Ranker,
    top_k: usize,
}

impl Session {
    pub fn new(table: Table, top_k: usize) -> Self {
        let ranker = Ranker::for_schema(table.schema());
        Self { table, ranker, top_k }
    }

    /// Load the configured dataset
    pub fn open(config: &SessionConfig) -> std::result::Result<Self, LoadError> {
        let store = DatasetStore::new(&config.dataset, config.schema.clone());
        let table = store.load()?;
        info!("Session ready: {} players, top_k={}", table.len(), config.top_k);
        Ok(Self::new(table, config.top_k))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Players matching every predicate
    pub fn scout(&self, predicates: &[Predicate]) -> Result<Table> {
        let found = filter(&self.table, predicates)?;
        debug!("Scout: {} predicates matched {} players", predicates.len(), found.len());
        Ok(found)
    }

    pub fn compare<S: AsRef<str>>(&self, names: &[S]) -> Result<Comparison> {
        compare(&self.table, names)
    }

    pub fn similar(&self, name: &str, predicates: &[Predicate]) -> Result<SimilarReport> {
        self.similar_with_k(name, predicates, self.top_k)
    }

    /// Players closest to `name` among those matching `predicates`
    ///
    /// The query player is always excluded from the pool.
    pub fn similar_with_k(&self, name: &str, predicates: &[Predicate], k: usize) -> Result<SimilarReport> {
        let schema = self.table.schema();
        let query = self.table.feature_vector(name, self.ranker.feature_columns())?;

        let mut pool_filter = Vec::with_capacity(predicates.len() + 1);
        pool_filter.push(Predicate::exclusion(schema.identity.clone(), name));
        pool_filter.extend_from_slice(predicates);
        let candidates = filter(&self.table, &pool_filter)?;

        let outcome = self.ranker.rank(&query, &candidates, k)?;
        debug!(
            "Similar to {}: {} candidates, {} results, {} skipped",
            name,
            candidates.len(),
            outcome.results.len(),
            outcome.skipped.len()
        );

        // query first, then results best-first: ties go to the query player
        let group_rows = self
            .table
            .get(name)
            .into_iter()
            .cloned()
            .chain(outcome.results.iter().map(|r| Arc::clone(&r.player)))
            .collect();
        let group = Table::new(self.table.shared_schema(), group_rows);
        let leaders = attribute_leaders(&group, self.ranker.feature_columns())?;

        Ok(SimilarReport {
            query: name.to_string(),
            candidates_count: candidates.len(),
            outcome,
            leaders,
        })
    }
}
