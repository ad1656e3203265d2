//! `topofetch crawl` – phase 1 only: collect links, write the link list.

use anyhow::Result;
use std::path::Path;
use topofetch_core::catalog::{self, CatalogClient, CrawlReport, CrawlStop};
use topofetch_core::config::FetchConfig;

use crate::cli::progress_line::ConsoleProgress;

pub fn run_crawl(cfg: FetchConfig) -> Result<()> {
    crawl_phase(&cfg)?;
    Ok(())
}

/// Shared by `crawl` and `fetch`: runs the pagination loop, writes the link
/// list, prints the end-of-loop console summary.
pub(crate) fn crawl_phase(cfg: &FetchConfig) -> Result<CrawlReport> {
    let client = CatalogClient::new(&cfg.endpoint, &cfg.datasets, &cfg.prod_formats);
    let mut progress = ConsoleProgress::new("Creating link list");
    let report = catalog::collect_links(&client, cfg.page_size, &cfg.link_list, &mut progress)?;

    for line in summary_lines(&report, &cfg.link_list) {
        println!("{line}");
    }

    Ok(report)
}

/// Console summary after the crawl: sampled total, end-of-loop notice, unique
/// link count, the full URL set (one per line), and the artifact path.
fn summary_lines(report: &CrawlReport, link_list: &Path) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.links.len() + 4);
    lines.push(format!(
        "Total items to download: {}",
        report.total_reported
    ));
    match &report.stop {
        CrawlStop::Exhausted => lines.push("No more items found. Ending loop.".to_string()),
        CrawlStop::Failed { error } => lines.push(format!("Error: {error}")),
    }
    lines.push(format!(
        "Total unique download URLs collected: {}",
        report.links.len()
    ));
    lines.extend(report.links.iter().map(str::to_string));
    lines.push(format!("Link list written to {}", link_list.display()));
    lines
}
