//! Player table schema
//!
//! A single typed definition of which dataset columns the core reads and in
//! which role. Column names are resolved once against the schema; filtering
//! and ranking work with the resulting [`ColumnRef`] indices.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Skill attributes compared by the similarity search, in vector order.
pub const DEFAULT_FEATURES: [&str; 9] = [
    "Shooting",
    "Vision",
    "Possession",
    "Crossing",
    "Dribbling",
    "Interceptions",
    "Tackling",
    "Aerials won",
    "pace",
];

/// Schema version 1
///
/// Describes the columns of a player dataset by role. Stored alongside every
/// [`Table`](crate::Table) so column names always resolve the same way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Column holding the player's unique name
    pub identity: String,

    /// Optional column holding a picture URL, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Real-valued skill columns forming the feature vector, in order
    pub features: Vec<String>,

    /// Text columns usable in membership and exclusion predicates
    #[serde(default)]
    pub categories: Vec<String>,

    /// Integer columns usable in range predicates
    #[serde(default)]
    pub ranges: Vec<String>,
}

fn default_version() -> u32 {
    1
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            version: 1,
            identity: "full_name".to_string(),
            image: Some("player_face_url".to_string()),
            features: DEFAULT_FEATURES.iter().map(|s| s.to_string()).collect(),
            categories: vec![
                "position".to_string(),
                "league".to_string(),
                "Current Club".to_string(),
            ],
            ranges: vec!["age".to_string(), "height_cm".to_string()],
        }
    }
}

/// Where a named column lives inside a [`Player`](crate::Player)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRef {
    Identity,
    Image,
    Feature(usize),
    Category(usize),
    Range(usize),
}

impl ColumnRef {
    /// True for columns holding numbers (features and integer ranges)
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnRef::Feature(_) | ColumnRef::Range(_))
    }

    /// True for columns holding text that can be matched exactly
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnRef::Identity | ColumnRef::Category(_))
    }
}

impl Schema {
    /// Validate the schema
    /// - Requires an identity column and at least one feature
    /// - Rejects a column name used twice, in any role
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.identity.trim().is_empty() {
            return Err(SchemaError::MissingIdentity);
        }
        if self.features.is_empty() {
            return Err(SchemaError::NoFeatures);
        }

        let mut seen = AHashSet::new();
        for name in self.column_names() {
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateColumn(name.to_string()));
            }
        }

        Ok(())
    }

    /// Number of components in a feature vector
    pub fn dim(&self) -> usize {
        self.features.len()
    }

    /// Resolve a column name to its role and position
    pub fn column(&self, name: &str) -> Option<ColumnRef> {
        if self.identity == name {
            return Some(ColumnRef::Identity);
        }
        if self.image.as_deref() == Some(name) {
            return Some(ColumnRef::Image);
        }
        if let Some(i) = self.features.iter().position(|c| c == name) {
            return Some(ColumnRef::Feature(i));
        }
        if let Some(i) = self.categories.iter().position(|c| c == name) {
            return Some(ColumnRef::Category(i));
        }
        self.ranges
            .iter()
            .position(|c| c == name)
            .map(ColumnRef::Range)
    }

    /// Name of a resolved column
    pub fn column_name(&self, column: ColumnRef) -> Option<&str> {
        match column {
            ColumnRef::Identity => Some(self.identity.as_str()),
            ColumnRef::Image => self.image.as_deref(),
            ColumnRef::Feature(i) => self.features.get(i).map(String::as_str),
            ColumnRef::Category(i) => self.categories.get(i).map(String::as_str),
            ColumnRef::Range(i) => self.ranges.get(i).map(String::as_str),
        }
    }

    /// Every column the schema reads, identity first
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.identity.as_str())
            .chain(self.image.as_deref())
            .chain(self.features.iter().map(String::as_str))
            .chain(self.categories.iter().map(String::as_str))
            .chain(self.ranges.iter().map(String::as_str))
    }
}

/// Errors that can occur during schema validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema needs an identity column")]
    MissingIdentity,

    #[error("Schema needs at least one feature column")]
    NoFeatures,

    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),
}
