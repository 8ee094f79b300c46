// Predicate filtering over player tables
use crate::{ColumnRef, Error, Player, Result, Table};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

pub trait RowFilter {
    fn matches(&self, player: &Player) -> bool;
}

/// A single filter condition on one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Inclusive numeric range; applies to feature and integer columns
    Range { column: String, min: f64, max: f64 },
    /// Value must be one of `allowed`; applies to text columns
    Membership { column: String, allowed: Vec<String> },
    /// Value must differ from `excluded`; applies to text columns
    Exclusion { column: String, excluded: String },
}

impl Predicate {
    pub fn range(column: impl Into<String>, min: f64, max: f64) -> Self {
        Predicate::Range { column: column.into(), min, max }
    }

    pub fn membership<I, S>(column: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::Membership {
            column: column.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exclusion(column: impl Into<String>, excluded: impl Into<String>) -> Self {
        Predicate::Exclusion { column: column.into(), excluded: excluded.into() }
    }

    pub fn column(&self) -> &str {
        match self {
            Predicate::Range { column, .. }
            | Predicate::Membership { column, .. }
            | Predicate::Exclusion { column, .. } => column,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Predicate::Range { .. } => "range",
            Predicate::Membership { .. } => "membership",
            Predicate::Exclusion { .. } => "exclusion",
        }
    }

    /// Check the predicate against a table's schema
    pub fn resolve(&self, table: &Table) -> Result<ResolvedPredicate<'_>> {
        let column = table.resolve(self.column())?;
        let supported = match self {
            Predicate::Range { .. } => column.is_numeric(),
            Predicate::Membership { .. } | Predicate::Exclusion { .. } => column.is_text(),
        };
        if !supported {
            return Err(Error::UnsupportedPredicate {
                column: self.column().to_string(),
                predicate: self.kind(),
            });
        }

        let condition = match self {
            Predicate::Range { min, max, .. } => Condition::Range { min: *min, max: *max },
            Predicate::Membership { allowed, .. } => {
                Condition::Membership(allowed.iter().map(String::as_str).collect())
            }
            Predicate::Exclusion { excluded, .. } => Condition::Exclusion(excluded.as_str()),
        };

        Ok(ResolvedPredicate { column, condition })
    }
}

/// A predicate bound to a schema column, ready to evaluate rows
#[derive(Debug, Clone)]
pub struct ResolvedPredicate<'a> {
    column: ColumnRef,
    condition: Condition<'a>,
}

#[derive(Debug, Clone)]
enum Condition<'a> {
    Range { min: f64, max: f64 },
    Membership(AHashSet<&'a str>),
    Exclusion(&'a str),
}

impl RowFilter for ResolvedPredicate<'_> {
    fn matches(&self, player: &Player) -> bool {
        match &self.condition {
            Condition::Range { min, max } => player
                .number(self.column)
                .map(|v| *min <= v && v <= *max)
                .unwrap_or(false),
            Condition::Membership(allowed) => player
                .text(self.column)
                .map(|v| allowed.contains(v))
                .unwrap_or(false),
            Condition::Exclusion(excluded) => player
                .text(self.column)
                .map(|v| v != *excluded)
                .unwrap_or(true),
        }
    }
}

impl<F: RowFilter> RowFilter for [F] {
    fn matches(&self, player: &Player) -> bool {
        self.iter().all(|f| f.matches(player))
    }
}

/// Keep the rows satisfying every predicate, in their original order
///
/// All predicates are resolved before any row is examined, so an unknown
/// column fails the call even when the table is empty.
pub fn filter(table: &Table, predicates: &[Predicate]) -> Result<Table> {
    let resolved = predicates
        .iter()
        .map(|p| p.resolve(table))
        .collect::<Result<Vec<_>>>()?;

    Ok(filter_with(table, resolved.as_slice()))
}

/// Keep the rows accepted by an arbitrary row filter
pub fn filter_with<F: RowFilter + ?Sized>(table: &Table, row_filter: &F) -> Table {
    let rows = table
        .iter()
        .filter(|p| row_filter.matches(p))
        .cloned()
        .collect();
    table.derive(rows)
}
