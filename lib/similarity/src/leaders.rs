//! Per-attribute leaders and player comparison

use serde::Serialize;
use skout_core::{filter, Error, Predicate, Result, Table};

/// The player with the best value of one attribute within a group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeLeader {
    pub attribute: String,
    pub player: String,
    pub value: f64,
}

/// Find, for each feature column, the player of `players` with the highest
/// value
///
/// The first player in table order wins a tie. Missing values are ignored; an
/// attribute nobody has a value for is left out.
pub fn attribute_leaders<S: AsRef<str>>(players: &Table, feature_columns: &[S]) -> Result<Vec<AttributeLeader>> {
    let indices = players.feature_indices(feature_columns)?;

    Ok(feature_columns
        .iter()
        .zip(indices)
        .filter_map(|(attribute, i)| {
            players
                .iter()
                .filter_map(|p| p.features.get(i).copied().flatten().map(|v| (p, v)))
                .fold(None, |best, (p, v)| match best {
                    Some((_, top)) if v <= top => best,
                    _ => Some((p, v)),
                })
                .map(|(p, value)| AttributeLeader {
                    attribute: attribute.as_ref().to_string(),
                    player: p.name.clone(),
                    value,
                })
        })
        .collect())
}

/// A set of players picked by name, with their attribute leaders
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Selected players in table order
    pub players: Table,
    pub leaders: Vec<AttributeLeader>,
}

/// Select players by name and find who leads each feature
///
/// Every name must exist in `table`.
pub fn compare<S: AsRef<str>>(table: &Table, names: &[S]) -> Result<Comparison> {
    if let Some(missing) = names.iter().find(|n| !table.contains(n.as_ref())) {
        return Err(Error::PlayerNotFound(missing.as_ref().to_string()));
    }

    let schema = table.schema();
    let players = filter(
        table,
        &[Predicate::membership(
            schema.identity.clone(),
            names.iter().map(|n| n.as_ref().to_string()),
        )],
    )?;
    let leaders = attribute_leaders(&players, &schema.features)?;

    Ok(Comparison { players, leaders })
}
