//! nutrion: search the food catalog from the command line.

use anyhow::Context;
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};
use nutrion_cli::output::{format_count, format_duration, format_record_row, print_records, Status};
use nutrion_search::{
    normalize, prefix_edit_distance, Catalog, CatalogRecord, JsonFileCatalog, SearchConfig,
    SeedCatalog, MAX_FUZZY_DISTANCE,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Search the Nutrion food catalog
#[derive(Parser)]
#[command(name = "nutrion")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the catalog comes from
#[derive(Args)]
struct SourceArgs {
    /// Extra foods as a JSON array, merged over the built-in list
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Do not load the built-in food list
    #[arg(long, global = true)]
    no_seed: bool,

    /// Configuration file (default: nutrion.toml discovery)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prefix, then substring, then fuzzy search
    Search {
        /// Text to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum results (default from configuration)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Search results ranked by relevance
    Suggest {
        /// Text to search for
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Maximum suggestions (default from configuration)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Foods whose name starts with the text
    Prefix {
        /// Name prefix
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Foods whose name contains the text
    Partial {
        /// Name fragment
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Foods within a few typos of the text
    Fuzzy {
        /// Misspelled name or prefix
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Edit budget, at most 3 (default from configuration)
        #[arg(
            short,
            long,
            value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_FUZZY_DISTANCE as u64)
        )]
        distance: Option<usize>,
    },
    /// Index size and shape
    Stats,
    /// Show the search key for a name
    Normalize {
        /// Name to normalize
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[derive(Serialize)]
struct FuzzyHit<'a> {
    #[serde(flatten)]
    record: &'a CatalogRecord,
    distance: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Status::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "nutrion=debug,nutrion_search=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Search { query, limit } => {
            let catalog = load_catalog(&cli.source)?;
            let query = query.join(" ");
            let limit = limit.unwrap_or(catalog.config().default_limit);
            let (results, elapsed) = timed(|| catalog.index().intelligent_search(&query, limit));
            report(&results, &query, elapsed, json)?;
        }

        Commands::Suggest { query, limit } => {
            let catalog = load_catalog(&cli.source)?;
            let query = query.join(" ");
            let limit = limit.unwrap_or(catalog.config().suggestion_limit);
            let (results, elapsed) = timed(|| catalog.index().suggestions(&query, limit));
            report(&results, &query, elapsed, json)?;
        }

        Commands::Prefix { text } => {
            let catalog = load_catalog(&cli.source)?;
            let text = text.join(" ");
            let (results, elapsed) = timed(|| catalog.index().search_prefix(&text));
            report(&results, &text, elapsed, json)?;
        }

        Commands::Partial { text } => {
            let catalog = load_catalog(&cli.source)?;
            let text = text.join(" ");
            let (results, elapsed) = timed(|| catalog.index().partial_search(&text));
            report(&results, &text, elapsed, json)?;
        }

        Commands::Fuzzy { text, distance } => {
            let catalog = load_catalog(&cli.source)?;
            let text = text.join(" ");
            let distance = distance.unwrap_or(catalog.config().fuzzy_distance);
            let (results, elapsed) = timed(|| catalog.index().fuzzy_search(&text, distance));

            let key = normalize(&text);
            let mut hits: Vec<FuzzyHit<'_>> = results
                .iter()
                .map(|record| FuzzyHit {
                    record: record.as_ref(),
                    distance: prefix_edit_distance(&record.key(), &key),
                })
                .collect();
            hits.sort_by(|a, b| {
                a.distance
                    .cmp(&b.distance)
                    .then_with(|| a.record.name.cmp(&b.record.name))
            });

            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                Status::warning(&format!("No foods within {distance} edits of \"{text}\""));
            } else {
                for hit in &hits {
                    println!("{}  ±{}", format_record_row(hit.record), hit.distance);
                }
                Status::info(&format!(
                    "{} in {}",
                    format_count(hits.len(), "food", "foods"),
                    format_duration(elapsed)
                ));
            }
        }

        Commands::Stats => {
            let catalog = load_catalog(&cli.source)?;
            let stats = catalog.index().stats();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "records": catalog.len(),
                        "index": stats,
                    }))?
                );
            } else {
                Status::header("Search index");
                println!("Records:          {}", catalog.len());
                println!("Nodes:            {}", stats.total_nodes);
                println!("Record refs:      {}", stats.total_records);
                println!("Max depth:        {}", stats.max_depth);
                println!("Distinct keys:    {}", stats.terminal_nodes);
                println!("Per-node cap:     {}", stats.max_records_per_node);
            }
        }

        Commands::Normalize { text } => {
            let input = text.join(" ");
            let key = normalize(&input);
            if json {
                println!("{}", serde_json::json!({ "input": input, "key": key }));
            } else {
                println!("{key}");
            }
        }
    }

    Ok(())
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed())
}

fn load_catalog(source: &SourceArgs) -> anyhow::Result<Catalog> {
    let (config, config_path) =
        SearchConfig::load(source.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = &config_path {
        debug!(path = %path.display(), "Using configuration file");
    }

    let mut catalog = Catalog::with_config(config);

    if !source.no_seed {
        catalog.load(&SeedCatalog).context("Failed to load built-in foods")?;
    }

    if let Some(path) = &source.catalog {
        let taken = catalog
            .extend(&JsonFileCatalog::new(path))
            .with_context(|| format!("Failed to load foods from {}", path.display()))?;
        debug!(taken, path = %path.display(), "Merged extra foods");
    }

    if catalog.is_empty() {
        warn!("Catalog is empty, every search will come back empty");
    }

    Ok(catalog)
}

fn report(
    results: &[Arc<CatalogRecord>],
    query: &str,
    elapsed: Duration,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let records: Vec<&CatalogRecord> = results.iter().map(AsRef::as_ref).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if results.is_empty() {
        Status::warning(&format!("No foods match \"{query}\""));
        return Ok(());
    }

    print_records(results);
    Status::info(&format!(
        "{} in {}",
        format_count(results.len(), "food", "foods"),
        format_duration(elapsed)
    ));
    Ok(())
}
