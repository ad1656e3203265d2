//! CLI for the topofetch catalog crawler and bulk downloader.

mod commands;
mod progress_line;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use topofetch_core::config::{self, FetchConfig};

use commands::{run_crawl, run_fetch};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "topofetch")]
#[command(about = "topofetch: catalog crawler and bulk map downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Catalog options shared by both subcommands; each overrides the
/// corresponding config-file value for this invocation only.
#[derive(Debug, Args)]
pub struct CatalogOpts {
    /// Catalog API endpoint.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Dataset name filter (the `datasets` query parameter).
    #[arg(long)]
    pub datasets: Option<String>,

    /// Link list output path.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Collect download links from the catalog and write the link list.
    Crawl {
        #[command(flatten)]
        catalog: CatalogOpts,
    },

    /// Crawl the catalog, then download every collected file.
    Fetch {
        #[command(flatten)]
        catalog: CatalogOpts,

        /// Directory downloads are written into (created if absent).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Crawl { catalog } => run_crawl(apply_overrides(cfg, catalog, None))?,
            CliCommand::Fetch {
                catalog,
                download_dir,
            } => run_fetch(apply_overrides(cfg, catalog, download_dir))?,
        }

        Ok(())
    }
}

fn apply_overrides(
    mut cfg: FetchConfig,
    opts: CatalogOpts,
    download_dir: Option<PathBuf>,
) -> FetchConfig {
    if let Some(endpoint) = opts.endpoint {
        cfg.endpoint = endpoint;
    }
    if let Some(datasets) = opts.datasets {
        cfg.datasets = datasets;
    }
    if let Some(out) = opts.out {
        cfg.link_list = out;
    }
    if let Some(dir) = download_dir {
        cfg.download_dir = dir;
    }
    cfg
}

#[cfg(test)]
mod tests;
