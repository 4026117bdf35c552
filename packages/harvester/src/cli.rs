//! Command-line interface for the harvester.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use dodaward_extractor::Rules;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{HarvesterConfig, DEFAULT_AWARDS_FILE, DEFAULT_CORRECTIONS_FILE};
use crate::error::{HarvesterError, Result};
use crate::fetch::fetch_articles;
use crate::harvester::{extract_directory, extract_file};
use crate::http::create_client;
use crate::output::{save_awards, save_corrections};

/// DoD Award Harvester - Turn daily contract announcements into award records.
#[derive(Parser)]
#[command(name = "dodaward-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download announcement pages into the local cache.
    Fetch {
        /// Number of listing pages to walk
        #[arg(short, long)]
        pages: Option<u32>,

        /// First listing page
        #[arg(short, long, default_value_t = 1)]
        start: u32,

        /// Cache directory (default: page_htmls, or DODAWARD_CACHE_DIR)
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,
    },

    /// Extract award records from every cached page into CSV files.
    Extract {
        /// Cache directory (default: page_htmls, or DODAWARD_CACHE_DIR)
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,

        /// Award CSV file
        #[arg(short, long, default_value = DEFAULT_AWARDS_FILE)]
        output: PathBuf,

        /// Correction CSV file
        #[arg(long, default_value = DEFAULT_CORRECTIONS_FILE)]
        corrections: PathBuf,

        /// Worker threads (default: available cores, or DODAWARD_WORKERS)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Print the records of one page as JSON.
    Parse {
        /// Saved article page
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = HarvesterConfig::from_env();

    match cli.command {
        Commands::Fetch {
            pages,
            start,
            cache_dir,
        } => {
            let mut config = config.with_start_page(start);
            if let Some(pages) = pages {
                config = config.with_pages(pages);
            }
            if let Some(dir) = cache_dir {
                config = config.with_cache_dir(dir);
            }
            fetch_command(&config)
        }
        Commands::Extract {
            cache_dir,
            output,
            corrections,
            workers,
        } => {
            let mut config = config;
            if let Some(dir) = cache_dir {
                config = config.with_cache_dir(dir);
            }
            if let Some(workers) = workers {
                config = config.with_workers(workers);
            }
            extract_command(&config, &output, &corrections)
        }
        Commands::Parse { file } => parse_command(&file),
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Execute the fetch command.
fn fetch_command(config: &HarvesterConfig) -> Result<()> {
    println!(
        "{} {} listing pages into {}",
        style("Fetching").bold(),
        style(config.pages).cyan(),
        style(config.cache_dir.display()).green()
    );
    println!();

    let client = create_client()?;
    let pb = spinner();

    let summary = match fetch_articles(&client, config, |page| {
        pb.set_message(format!("Listing page {page}..."));
    }) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Listing pages: {}", summary.pages);
    println!("  Articles found: {}", summary.discovered);
    println!("  Downloaded: {}", style(summary.downloaded).green());
    println!("  Already cached: {}", summary.already_cached);
    if !summary.failures.is_empty() {
        println!("  Failures: {}", style(summary.failures.len()).yellow().bold());
    }

    Ok(())
}

/// Execute the extract command.
fn extract_command(config: &HarvesterConfig, output: &Path, corrections: &Path) -> Result<()> {
    if !config.cache_dir.is_dir() {
        return Err(HarvesterError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cache directory does not exist: {}", config.cache_dir.display()),
        )));
    }

    println!(
        "{} pages in {} with {} workers",
        style("Extracting").bold(),
        style(config.cache_dir.display()).cyan(),
        config.workers
    );
    println!();

    let pb = spinner();
    pb.set_message("Processing pages...");

    let batch = match extract_directory(&config.cache_dir, config.workers, &Rules::default(), |_| {
        pb.inc(1);
    }) {
        Ok(batch) => batch,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving CSV...");
    let saved = save_awards(output, &batch.extraction.awards)
        .and_then(|()| save_corrections(corrections, &batch.extraction.corrections));
    pb.finish_and_clear();
    saved?;

    println!("  Pages: {}", batch.documents);
    println!("  Awards: {}", style(batch.extraction.awards.len()).green());
    println!("  Corrections: {}", batch.extraction.corrections.len());
    if !batch.failures.is_empty() {
        println!("  Failed pages: {}", style(batch.failures.len()).yellow().bold());
        for failure in &batch.failures {
            println!("    {}: {}", failure.path.display(), failure.error);
        }
    }

    println!();
    println!("{} {}", style("Saved to:").green().bold(), output.display());
    println!("{} {}", style("Corrections:").green().bold(), corrections.display());

    Ok(())
}

/// Execute the parse command.
fn parse_command(file: &Path) -> Result<()> {
    let extraction = extract_file(file, &Rules::default())?;
    println!("{}", serde_json::to_string_pretty(&extraction)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_fetch_defaults() {
        let cli = Cli::parse_from(["dodaward-harvester", "fetch"]);

        let Commands::Fetch {
            pages,
            start,
            cache_dir,
        } = cli.command
        else {
            panic!("expected fetch command");
        };
        assert!(pages.is_none());
        assert_eq!(start, 1);
        assert!(cache_dir.is_none());
    }

    #[test]
    fn test_cli_parse_fetch_with_options() {
        let cli = Cli::parse_from([
            "dodaward-harvester",
            "fetch",
            "--pages",
            "5",
            "--start",
            "20",
            "--cache-dir",
            "/tmp/pages",
        ]);

        let Commands::Fetch {
            pages,
            start,
            cache_dir,
        } = cli.command
        else {
            panic!("expected fetch command");
        };
        assert_eq!(pages, Some(5));
        assert_eq!(start, 20);
        assert_eq!(cache_dir, Some(PathBuf::from("/tmp/pages")));
    }

    #[test]
    fn test_cli_parse_extract_defaults() {
        let cli = Cli::parse_from(["dodaward-harvester", "extract"]);

        let Commands::Extract {
            output,
            corrections,
            workers,
            ..
        } = cli.command
        else {
            panic!("expected extract command");
        };
        assert_eq!(output, PathBuf::from("webscraped_data.csv"));
        assert_eq!(corrections, PathBuf::from("correction.csv"));
        assert!(workers.is_none());
    }

    #[test]
    fn test_cli_parse_parse() {
        let cli = Cli::parse_from(["dodaward-harvester", "parse", "page_htmls/3251958.html"]);

        let Commands::Parse { file } = cli.command else {
            panic!("expected parse command");
        };
        assert_eq!(file, PathBuf::from("page_htmls/3251958.html"));
    }
}
