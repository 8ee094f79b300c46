use serde::{Deserialize, Serialize};

use crate::schema::ColumnRef;
use crate::vector::FeatureVector;

/// Zero-based position of a player's row in the source dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One row of the player dataset
///
/// Attribute vectors are aligned with the [`Schema`](crate::Schema) the row
/// was loaded with: `features[i]` is the value of `schema.features[i]`, and so
/// on for categories and ranges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    /// Full name, unique within a dataset
    pub name: String,
    /// Skill scores; `None` where the source cell was empty
    pub features: Vec<Option<f64>>,
    pub categories: Vec<String>,
    pub ranges: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A borrowed cell value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

impl Player {
    /// Read one cell by resolved column
    pub fn cell(&self, column: ColumnRef) -> Cell<'_> {
        match column {
            ColumnRef::Identity => Cell::Text(Some(self.name.as_str())),
            ColumnRef::Image => Cell::Text(self.image_url.as_deref()),
            ColumnRef::Feature(i) => Cell::Number(self.features.get(i).copied().flatten()),
            ColumnRef::Category(i) => Cell::Text(self.categories.get(i).map(String::as_str)),
            ColumnRef::Range(i) => Cell::Number(self.ranges.get(i).map(|v| *v as f64)),
        }
    }

    /// Numeric value of a feature or range column
    pub fn number(&self, column: ColumnRef) -> Option<f64> {
        match self.cell(column) {
            Cell::Number(v) => v,
            Cell::Text(_) => None,
        }
    }

    /// Text value of the identity, image or a categorical column
    pub fn text(&self, column: ColumnRef) -> Option<&str> {
        match self.cell(column) {
            Cell::Text(v) => v,
            Cell::Number(_) => None,
        }
    }

    /// Extract the vector for the given feature indices, in that order
    ///
    /// On failure returns how many of the requested components were present.
    pub fn feature_vector(&self, indices: &[usize]) -> Result<FeatureVector, usize> {
        let values: Vec<Option<f64>> = indices
            .iter()
            .map(|&i| self.features.get(i).copied().flatten())
            .collect();

        if values.iter().all(Option::is_some) {
            Ok(values.into_iter().flatten().collect())
        } else {
            Err(values.iter().filter(|v| v.is_some()).count())
        }
    }
}
