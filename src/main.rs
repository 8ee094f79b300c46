use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use skout::{Predicate, Session, SessionConfig, SimilarResponse, Table};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Explore a football player dataset
#[derive(Parser, Debug)]
#[command(name = "skout")]
#[command(about = "Scout, compare and find similar football players", long_about = None)]
struct Cli {
    /// JSON session config (dataset, schema, top_k)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Player CSV file; overrides the config
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// JSON schema file; overrides the config
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List players matching the filters
    Scout(Filters),
    /// Compare players and show who leads each attribute
    Compare {
        /// Player names
        #[arg(required = true)]
        players: Vec<String>,
    },
    /// Find the players most similar to one player
    Similar {
        /// Query player name
        player: String,

        /// Number of results; defaults to the config's top_k
        #[arg(short, long)]
        k: Option<usize>,

        /// Include full rows in the output
        #[arg(long)]
        rows: bool,

        #[command(flatten)]
        filters: Filters,
    },
    /// Show value ranges and options of every filterable column
    Domain,
}

#[derive(Args, Debug, Default)]
struct Filters {
    /// Allowed positions (repeatable)
    #[arg(long)]
    position: Vec<String>,

    /// Allowed leagues (repeatable)
    #[arg(long)]
    league: Vec<String>,

    /// Allowed clubs (repeatable)
    #[arg(long)]
    club: Vec<String>,

    /// Age range, MIN:MAX
    #[arg(long, value_parser = parse_bounds)]
    age: Option<(f64, f64)>,

    /// Height range in cm, MIN:MAX
    #[arg(long, value_parser = parse_bounds)]
    height: Option<(f64, f64)>,

    /// Any numeric column, COLUMN=MIN:MAX (repeatable)
    #[arg(long = "range", value_parser = parse_column_range)]
    ranges: Vec<(String, f64, f64)>,
}

impl Filters {
    fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        for (column, values) in [
            ("position", &self.position),
            ("league", &self.league),
            ("Current Club", &self.club),
        ] {
            if !values.is_empty() {
                predicates.push(Predicate::membership(column, values.iter().cloned()));
            }
        }
        for (column, bounds) in [("age", self.age), ("height_cm", self.height)] {
            if let Some((min, max)) = bounds {
                predicates.push(Predicate::range(column, min, max));
            }
        }
        for (column, min, max) in &self.ranges {
            predicates.push(Predicate::range(column.clone(), *min, *max));
        }
        predicates
    }
}

fn parse_bounds(s: &str) -> Result<(f64, f64), String> {
    let (min, max) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid bound '{}': {}", v, e))
    };
    Ok((parse(min)?, parse(max)?))
}

fn parse_column_range(s: &str) -> Result<(String, f64, f64), String> {
    let (column, bounds) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected COLUMN=MIN:MAX, got '{}'", s))?;
    let (min, max) = parse_bounds(bounds)?;
    Ok((column.trim().to_string(), min, max))
}

fn rows_json(table: &Table) -> Vec<Value> {
    table.iter().map(|p| table.row_json(p)).collect()
}

fn domain_json(table: &Table) -> anyhow::Result<Value> {
    let schema = table.schema();
    let mut ranges = serde_json::Map::new();
    for column in schema.ranges.iter().chain(&schema.features) {
        let bounds = table.range_bounds(column)?;
        ranges.insert(column.clone(), json!(bounds.map(|(lo, hi)| [lo, hi])));
    }
    let mut options = serde_json::Map::new();
    for column in &schema.categories {
        options.insert(column.clone(), json!(table.distinct(column)?));
    }
    Ok(json!({
        "players": table.len(),
        "ranges": ranges,
        "options": options,
    }))
}

fn load_config(cli: &Cli) -> anyhow::Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(data) = &cli.data {
        config.dataset = data.clone();
    }
    if let Some(schema) = &cli.schema {
        config.schema = SessionConfig::schema_from_json_file(schema)?;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting skout v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    info!("Dataset: {:?}", config.dataset);

    let session = Session::open(&config)
        .with_context(|| format!("failed to load dataset {:?}", config.dataset))?;

    let output = run(&cli.command, &session)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(command: &Command, session: &Session) -> anyhow::Result<Value> {
    let table = session.table();
    let output = match command {
        Command::Scout(filters) => {
            let found = session.scout(&filters.predicates())?;
            json!({ "count": found.len(), "players": rows_json(&found) })
        }
        Command::Compare { players } => {
            let comparison = session.compare(players.as_slice())?;
            json!({
                "players": rows_json(&comparison.players),
                "leaders": comparison.leaders,
            })
        }
        Command::Similar { player, k, rows, filters } => {
            let k = k.unwrap_or(session.top_k());
            let report = session.similar_with_k(player, &filters.predicates(), k)?;
            let response = SimilarResponse::from_outcome(
                &report.query,
                &report.outcome,
                &table.schema().features,
                report.candidates_count,
                rows.then_some(table),
            );
            json!({ "similar": response, "leaders": report.leaders })
        }
        Command::Domain => domain_json(table)?,
    };
    Ok(output)
}
