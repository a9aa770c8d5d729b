//! TyTo Search CLI
//!
//! Typo-tolerant search over a JSON term list. Prints the hits (terms that
//! contain the query) and suggestions (likely typo corrections) per query.
//!
//! ## Usage
//!
//! ```bash
//! tyto-search --terms countries.json --key-path countries Gremany Swiitzerland
//! echo Rumania | tyto-search --terms countries.json --key-path countries --json
//! ```
//!
//! ## Configuration
//!
//! Environment variables (ignored when `--config` is given):
//! - `TYTO_WINDOW`: characters tolerated per offset (default: 2)
//! - `TYTO_MIN_QUERY_LEN`: shortest query searched (default: 5)
//! - `TYTO_MAX_SUGGESTIONS`: cap on hits + suggestions (default: unlimited)
//! - `TYTO_TIMEOUT_MS`: collection deadline in milliseconds (default: none)
//! - `TYTO_WORKERS`: matcher threads, 0 = one per CPU (default: 0)
//! - `RUST_LOG`: Logging level (default: warn)

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tyto::spawn_json_file_load;
use tyto_core::{SearchEngine, SearchOptions};

mod output;
mod settings;

#[derive(Debug, Parser)]
#[command(name = "tyto-search", version, about = "Typo-tolerant search over a JSON term list")]
pub struct Args {
    /// JSON file holding the terms
    #[arg(long)]
    pub terms: PathBuf,

    /// Dotted key path of the term array inside the JSON file
    #[arg(long, default_value = "terms")]
    pub key_path: String,

    /// JSON engine configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Characters tolerated at each offset
    #[arg(long)]
    pub window: Option<usize>,

    /// Shortest query that is searched
    #[arg(long)]
    pub min_query_len: Option<usize>,

    /// Cap on hits + suggestions
    #[arg(long)]
    pub max_suggestions: Option<usize>,

    /// Collection deadline in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Matcher threads (0 = one per CPU)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Only match patterns at the start of a term
    #[arg(long)]
    pub anchor_start: bool,

    /// Capitalize each word of returned terms
    #[arg(long)]
    pub capitalize: bool,

    /// Print one JSON object per query
    #[arg(long)]
    pub json: bool,

    /// Queries to run; read one per line from stdin when omitted
    pub queries: Vec<String>,
}

#[tokio::main]
async fn main() -> tyto::Result<()> {
    tyto::tracing::init_with_filter("warn");

    let args = Args::parse();
    let config = settings::resolve(&args)?;

    info!(
        terms = %args.terms.display(),
        key_path = %args.key_path,
        window = config.window,
        min_query_len = config.min_query_len,
        "Starting TyTo search"
    );

    let (engine, loader) = SearchEngine::pending(config)?;
    spawn_json_file_load(loader, args.terms.clone(), args.key_path.clone());

    if args.queries.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let query = line.trim();
            if !query.is_empty() {
                run_query(&engine, query, args.json).await?;
            }
        }
    } else {
        for query in &args.queries {
            run_query(&engine, query, args.json).await?;
        }
    }

    Ok(())
}

async fn run_query(engine: &SearchEngine, query: &str, json: bool) -> tyto::Result<()> {
    let result = engine.search(query, SearchOptions::new()).await;
    if json {
        println!("{}", output::render_json(query, &result)?);
    } else {
        print!("{}", output::render_text(query, &result));
    }
    Ok(())
}
