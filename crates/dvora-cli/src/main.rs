//! Dvora command-line entry point.

mod config;
mod output;
mod prompt;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dvora_core::{load_catalog, parse_line, Requirement, ResolutionDriver};

use crate::config::{Overrides, Settings};
use crate::output::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Category {
    Shows,
    Movies,
}

impl Category {
    fn name(self) -> &'static str {
        match self {
            Category::Shows => "shows",
            Category::Movies => "movies",
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dvora",
    version,
    about = "Check which streaming sites list a movie or show"
)]
struct Cli {
    /// Title to search for (prompted when omitted)
    #[arg(short, long)]
    term: Option<String>,

    /// Catalog to check (prompted when omitted)
    #[arg(short, long, value_enum)]
    category: Option<Category>,

    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Shows catalog path
    #[arg(long)]
    shows: Option<PathBuf>,

    /// Movies catalog path
    #[arg(long)]
    movies: Option<PathBuf>,

    /// Optional search API catalog path
    #[arg(long)]
    api_sites: Option<PathBuf>,

    /// Optional manual checks catalog path
    #[arg(long)]
    manual: Option<PathBuf>,

    /// User-Agent header sent on every request
    #[arg(long)]
    user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Sites checked at once; reports keep catalog order
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Skip the welcome banner
    #[arg(long)]
    no_banner: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            user_agent: self.user_agent.clone(),
            timeout_secs: self.timeout,
            concurrency: self.concurrency,
            shows: self.shows.clone(),
            movies: self.movies.clone(),
            api_sites: self.api_sites.clone(),
            manual: self.manual.clone(),
        }
    }
}

/// Expands every non-blank manual catalog line with the term
fn manual_urls(lines: &[String], term: &str) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| parse_line(line))
        .map(|template| template.expand(term))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    }
    .apply(cli.overrides());

    let interactive = cli.term.is_none() || cli.category.is_none();
    let mut input = prompt::open_input()?;

    if interactive && !cli.no_banner && !cli.json {
        prompt::welcome(input.as_mut())?;
    }
    let term = match cli.term.clone() {
        Some(term) => term,
        None => prompt::ask_term(input.as_mut())?,
    };
    let category = match cli.category {
        Some(category) => category,
        None => prompt::ask_category(input.as_mut())?,
    };

    let driver = ResolutionDriver::with_config(settings.client_config())
        .context("failed to build HTTP client")?
        .with_concurrency(settings.concurrency);
    let reporter = Reporter::new(&term, cli.json);

    let catalog = match category {
        Category::Shows => &settings.catalogs.shows,
        Category::Movies => &settings.catalogs.movies,
    };
    let runs = [
        (category.name(), catalog, Requirement::Required),
        ("api sites", &settings.catalogs.api_sites, Requirement::Optional),
    ];

    for (name, path, requirement) in runs {
        let lines = match load_catalog(path, requirement).await {
            Ok(lines) => lines,
            Err(e) => {
                reporter.category_error(name, &e);
                continue;
            }
        };
        if lines.iter().all(|line| line.trim().is_empty()) && requirement == Requirement::Optional {
            continue;
        }

        reporter.category_start(name);
        match driver
            .run_category(name, &lines, &term, |report| reporter.site(name, report))
            .await
        {
            Ok(summary) => reporter.summary(&summary),
            Err(e) => reporter.category_error(name, &e),
        }
    }

    let manual = load_catalog(&settings.catalogs.manual, Requirement::Optional)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read manual checks catalog");
            Vec::new()
        });
    reporter.manual_checks(&manual_urls(&manual, &term));

    if interactive && !cli.json {
        prompt::wait_for_enter(input.as_mut())?;
    }

    Ok(())
}
