use crate::{ColumnRef, Error, FeatureVector, Player, Result, Schema};
use crate::player::Cell;
use ahash::AHashSet;
use serde_json::{Map, Value};
use std::sync::Arc;

/// An immutable, ordered set of players sharing one schema
///
/// Derived tables (filter results, comparisons) share the same `Arc<Player>`
/// rows as their source; nothing is ever mutated after load.
#[derive(Debug, Clone)]
pub struct Table {
    schema: Arc<Schema>,
    rows: Vec<Arc<Player>>,
}

impl Table {
    pub fn new(schema: Arc<Schema>, rows: Vec<Arc<Player>>) -> Self {
        Self { schema, rows }
    }

    pub fn from_players(schema: Schema, players: Vec<Player>) -> Self {
        Self::new(Arc::new(schema), players.into_iter().map(Arc::new).collect())
    }

    /// A table over the same schema holding a subset of rows
    pub(crate) fn derive(&self, rows: Vec<Arc<Player>>) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            rows,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn shared_schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Player>> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Arc<Player>] {
        &self.rows
    }

    /// Look a player up by name
    pub fn get(&self, name: &str) -> Option<&Arc<Player>> {
        self.rows.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|p| p.name.as_str()).collect()
    }

    /// Resolve a column name, failing on names the schema does not know
    pub fn resolve(&self, column: &str) -> Result<ColumnRef> {
        self.schema
            .column(column)
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))
    }

    /// Resolve an ordered list of feature column names to feature indices
    pub fn feature_indices<S: AsRef<str>>(&self, columns: &[S]) -> Result<Vec<usize>> {
        columns
            .iter()
            .map(|name| match self.resolve(name.as_ref())? {
                ColumnRef::Feature(i) => Ok(i),
                _ => Err(Error::NotAFeature(name.as_ref().to_string())),
            })
            .collect()
    }

    /// Feature vector of a named player, in the given column order
    pub fn feature_vector<S: AsRef<str>>(&self, name: &str, columns: &[S]) -> Result<FeatureVector> {
        let indices = self.feature_indices(columns)?;
        let player = self
            .get(name)
            .ok_or_else(|| Error::PlayerNotFound(name.to_string()))?;

        player
            .feature_vector(&indices)
            .map_err(|actual| Error::DimensionMismatch {
                identity: player.name.clone(),
                expected: indices.len(),
                actual,
            })
    }

    /// Smallest and largest value of a numeric column, ignoring missing cells
    ///
    /// `Ok(None)` when the table has no value for the column.
    pub fn range_bounds(&self, column: &str) -> Result<Option<(f64, f64)>> {
        let col = self.resolve(column)?;
        if !col.is_numeric() {
            return Err(Error::UnsupportedPredicate {
                column: column.to_string(),
                predicate: "range",
            });
        }

        Ok(self
            .rows
            .iter()
            .filter_map(|p| p.number(col))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            }))
    }

    /// Distinct values of a text column, in order of first appearance
    pub fn distinct(&self, column: &str) -> Result<Vec<String>> {
        let col = self.resolve(column)?;
        if !col.is_text() {
            return Err(Error::UnsupportedPredicate {
                column: column.to_string(),
                predicate: "membership",
            });
        }

        let mut seen = AHashSet::new();
        Ok(self
            .rows
            .iter()
            .filter_map(|p| p.text(col))
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect())
    }

    /// A JSON object of one row keyed by schema column names
    pub fn row_json(&self, player: &Player) -> Value {
        let mut row = Map::new();
        for name in self.schema.column_names() {
            let value = match self.schema.column(name).map(|c| player.cell(c)) {
                Some(Cell::Text(Some(s))) => Value::String(s.to_string()),
                Some(Cell::Number(Some(n))) => match self.schema.column(name) {
                    Some(ColumnRef::Range(_)) => Value::from(n as i64),
                    _ => Value::from(n),
                },
                _ => Value::Null,
            };
            row.insert(name.to_string(), value);
        }
        Value::Object(row)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Arc<Player>;
    type IntoIter = std::slice::Iter<'a, Arc<Player>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Two tables are equal when they hold the same rows in the same order
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
            && self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(other.rows.iter())
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::PlayerId;

    pub(crate) fn small_schema() -> Schema {
        Schema {
            version: 1,
            identity: "name".to_string(),
            image: Some("photo".to_string()),
            features: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            categories: vec!["league".to_string()],
            ranges: vec!["age".to_string()],
        }
    }

    pub(crate) fn player(id: u32, name: &str, features: [Option<f64>; 3], league: &str, age: i64) -> Player {
        Player {
            id: PlayerId(id),
            name: name.to_string(),
            features: features.to_vec(),
            categories: vec![league.to_string()],
            ranges: vec![age],
            image_url: None,
        }
    }

    pub(crate) fn create_test_table() -> Table {
        Table::from_players(
            small_schema(),
            vec![
                player(0, "Ada", [Some(1.0), Some(0.0), Some(0.0)], "Serie A", 19),
                player(1, "Bea", [Some(1.0), Some(0.0), Some(0.0)], "La Liga", 20),
                player(2, "Cy", [Some(0.0), Some(1.0), Some(0.0)], "Serie A", 25),
                player(3, "Dee", [Some(0.5), None, Some(2.0)], "Ligue 1", 30),
            ],
        )
    }

    #[test]
    fn test_lookup() {
        let table = create_test_table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("Cy").map(|p| p.id), Some(PlayerId(2)));
        assert!(!table.contains("Zed"));
        assert_eq!(table.names(), vec!["Ada", "Bea", "Cy", "Dee"]);
    }

    #[test]
    fn test_feature_vector_lookup() {
        let table = create_test_table();
        let v = table.feature_vector("Cy", &["b", "a"]).unwrap();
        assert_eq!(v.as_slice(), &[1.0, 0.0]);

        assert!(matches!(
            table.feature_vector("Zed", &["a"]),
            Err(Error::PlayerNotFound(_))
        ));
        assert!(matches!(
            table.feature_vector("Dee", &["a", "b", "c"]),
            Err(Error::DimensionMismatch { expected: 3, actual: 2, .. })
        ));
        assert_eq!(
            table.feature_vector("Ada", &["a", "age"]),
            Err(Error::NotAFeature("age".to_string()))
        );
    }

    #[test]
    fn test_range_bounds_skip_missing() {
        let table = create_test_table();
        assert_eq!(table.range_bounds("age").unwrap(), Some((19.0, 30.0)));
        assert_eq!(table.range_bounds("b").unwrap(), Some((0.0, 1.0)));
        assert!(table.range_bounds("league").is_err());
        assert!(matches!(table.range_bounds("nope"), Err(Error::UnknownColumn(_))));
    }

    #[test]
    fn test_distinct_first_appearance_order() {
        let table = create_test_table();
        assert_eq!(
            table.distinct("league").unwrap(),
            vec!["Serie A", "La Liga", "Ligue 1"]
        );
        assert!(table.distinct("age").is_err());
    }

    #[test]
    fn test_row_json() {
        let table = create_test_table();
        let dee = table.get("Dee").unwrap();
        let row = table.row_json(dee);
        assert_eq!(row["name"], "Dee");
        assert_eq!(row["age"], 30);
        assert_eq!(row["a"], 0.5);
        assert!(row["b"].is_null());
        assert!(row["photo"].is_null());
    }

    #[test]
    fn test_equality_compares_row_contents() {
        let table = create_test_table();
        assert_eq!(table, table.clone());
        assert_eq!(table, Table::new(table.shared_schema(), table.rows().to_vec()));

        let older = Table::from_players(
            small_schema(),
            vec![
                player(0, "Ada", [Some(1.0), Some(0.0), Some(0.0)], "Serie A", 19),
                player(1, "Bea", [Some(1.0), Some(0.0), Some(0.0)], "La Liga", 20),
                player(2, "Cy", [Some(0.0), Some(1.0), Some(0.0)], "Serie A", 25),
                player(3, "Dee", [Some(0.5), None, Some(2.0)], "Ligue 1", 31),
            ],
        );
        assert_ne!(table, older);
    }
}
