use std::{
    fs,
    io::{self, BufRead, Read, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_matcher::{
    config::CONFIG_FILE, recipe::response::to_responses, Config, CorpusIndex, MatchEngine, Query, RecognizedProduct,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "recipe-matcher", version, about = "Find recipes for the ingredients you have")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Recipe CSV dataset (overrides config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Index snapshot to read, or to write after building (overrides config)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search once for the given ingredients, or read queries from stdin when none are given
    Search {
        /// Ingredient names
        ingredients: Vec<String>,
        /// Number of recipes wanted
        #[arg(long)]
        target: Option<usize>,
        /// JSON file of `[{"name": .., "count": ..}]` products, `-` for stdin
        #[arg(long, conflicts_with = "ingredients")]
        products: Option<PathBuf>,
    },
    /// Build the index from the dataset and write it as a snapshot
    Build {
        /// Output path (defaults to the configured snapshot path)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load_from(&cli.config).context("loading configuration")?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(snapshot) = cli.snapshot {
        config.snapshot_path = Some(snapshot);
    }

    match cli.command {
        Command::Build { out } => {
            let out = out
                .or_else(|| config.snapshot_path.clone())
                .context("no output path: pass --out or configure snapshot_path")?;
            let index = CorpusIndex::from_csv(&config.data_path)
                .with_context(|| format!("building index from {}", config.data_path.display()))?;
            index.save(&out).with_context(|| format!("writing snapshot {}", out.display()))?;
        }
        Command::Search { ingredients, target, products } => {
            let index = open_index(&config)?;
            let engine = MatchEngine::from(&config);
            let target = target.unwrap_or(config.target_count);
            if let Some(path) = products {
                let products = read_products(&path)?;
                run_single_query(&index, &engine, Query::from_products(&products).with_target(target))?;
            } else if !ingredients.is_empty() {
                run_single_query(&index, &engine, Query::new(ingredients).with_target(target))?;
            } else {
                run_interactive(&index, &engine, target)?;
            }
        }
    }
    Ok(())
}

fn open_index(config: &Config) -> Result<CorpusIndex> {
    let started = Instant::now();
    info!(data = %config.data_path.display(), "loading recipe index");
    let index = CorpusIndex::open(config).context("recipe index could not be loaded")?;
    info!(recipes = index.len(), elapsed_ms = started.elapsed().as_millis() as u64, "recipe index ready");
    Ok(index)
}

fn read_products(path: &Path) -> Result<Vec<RecognizedProduct>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading products from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&raw).context("products must be a JSON list of {\"name\", \"count\"} objects")
}

fn run_single_query(index: &CorpusIndex, engine: &MatchEngine, query: Query) -> Result<()> {
    let started = Instant::now();
    let results = engine.search(index, &query)?;
    info!(
        terms = query.terms().len(),
        results = results.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "query answered"
    );
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &to_responses(&results))?;
    writeln!(stdout)?;
    Ok(())
}

/// One query per line, ingredients separated by commas; empty line or `exit` quits
fn run_interactive(index: &CorpusIndex, engine: &MatchEngine, target: usize) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        eprint!("ingredients> ");
        io::stderr().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line.context("reading query")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        let terms = trimmed.split(',').map(str::trim).filter(|t| !t.is_empty());
        let query = Query::new(terms).with_target(target);
        if let Err(err) = run_single_query(index, engine, query) {
            warn!("query failed: {err:#}");
        }
    }
    Ok(())
}
