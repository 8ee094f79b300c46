use crate::LoadError;
use ahash::AHashMap;
use skout_core::{Player, PlayerId, Schema, Table};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Handle to the backing CSV of a session
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
    schema: Schema,
}

impl DatasetStore {
    pub fn new<P: AsRef<Path>>(path: P, schema: Schema) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            schema,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Read and validate the whole dataset
    pub fn load(&self) -> Result<Table, LoadError> {
        debug!("Opening dataset {:?}", self.path);
        let file = File::open(&self.path).map_err(|source| LoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        let table = load_from_reader(file, self.schema.clone())?;
        info!("Loaded {} players from {:?}", table.len(), self.path);
        Ok(table)
    }
}

/// Header positions of every schema column
struct Layout {
    identity: usize,
    image: Option<usize>,
    features: Vec<usize>,
    categories: Vec<usize>,
    ranges: Vec<usize>,
}

impl Layout {
    fn from_headers(schema: &Schema, headers: &csv::StringRecord) -> Result<Self, LoadError> {
        // a repeated header name resolves to its first column
        let mut index: AHashMap<&str, usize> = AHashMap::new();
        for (i, h) in headers.iter().enumerate() {
            index.entry(h).or_insert(i);
        }

        let missing: Vec<String> = schema
            .column_names()
            .filter(|name| !index.contains_key(name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let position = |name: &String| index[name.as_str()];
        Ok(Self {
            identity: index[schema.identity.as_str()],
            image: schema.image.as_ref().map(position),
            features: schema.features.iter().map(position).collect(),
            categories: schema.categories.iter().map(position).collect(),
            ranges: schema.ranges.iter().map(position).collect(),
        })
    }
}

/// Parse a dataset from any reader
///
/// Expects a header row. Cells are trimmed. Empty or `NaN` skill cells load
/// as missing; range columns must hold whole numbers.
pub fn load_from_reader<R: Read>(reader: R, schema: Schema) -> Result<Table, LoadError> {
    schema.validate()?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let layout = Layout::from_headers(&schema, &headers)?;

    let mut players = Vec::new();
    let mut seen: AHashMap<String, u64> = AHashMap::new();

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(row as u64 + 2);
        let cell = |i: usize| record.get(i).unwrap_or("");
        let malformed = |column: &str, value: &str| LoadError::Malformed {
            line,
            column: column.to_string(),
            value: value.to_string(),
        };

        let name = cell(layout.identity);
        if name.is_empty() {
            return Err(malformed(schema.identity.as_str(), name));
        }
        if let Some(&first_line) = seen.get(name) {
            return Err(LoadError::DuplicateIdentity {
                name: name.to_string(),
                first_line,
                line,
            });
        }
        seen.insert(name.to_string(), line);

        let features = layout
            .features
            .iter()
            .zip(&schema.features)
            .map(|(&i, column)| parse_score(cell(i)).ok_or_else(|| malformed(column.as_str(), cell(i))))
            .collect::<Result<Vec<_>, _>>()?;

        let ranges = layout
            .ranges
            .iter()
            .zip(&schema.ranges)
            .map(|(&i, column)| parse_whole(cell(i)).ok_or_else(|| malformed(column.as_str(), cell(i))))
            .collect::<Result<Vec<_>, _>>()?;

        let categories = layout
            .categories
            .iter()
            .map(|&i| cell(i).to_string())
            .collect();

        let image_url = layout
            .image
            .map(cell)
            .filter(|v| !is_missing(v))
            .map(str::to_string);

        let id = u32::try_from(row).map_err(|_| LoadError::TooManyRows(u32::MAX))?;
        players.push(Arc::new(Player {
            id: PlayerId(id),
            name: name.to_string(),
            features,
            categories,
            ranges,
            image_url,
        }));
    }

    debug!("Parsed {} rows, {} feature columns", players.len(), schema.dim());
    Ok(Table::new(Arc::new(schema), players))
}

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("nan")
}

/// `Some(None)` for a missing score, `None` for text that is not a number
fn parse_score(raw: &str) -> Option<Option<f64>> {
    if is_missing(raw) {
        return Some(None);
    }
    raw.parse::<f64>()
        .ok()
        .map(|v| v.is_finite().then_some(v))
}

fn parse_whole(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}
