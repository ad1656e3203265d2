//! `topofetch fetch` – the full two-phase pipeline: crawl, then download.

use anyhow::Result;
use topofetch_core::config::FetchConfig;
use topofetch_core::downloader;

use super::crawl_phase;
use crate::cli::progress_line::ConsoleProgress;

pub fn run_fetch(cfg: FetchConfig) -> Result<()> {
    // Phase 1 produces the in-memory worklist; the link file on disk is an
    // inspection artifact and is not read back.
    let crawl = crawl_phase(&cfg)?;

    let mut progress = ConsoleProgress::new("Downloading files");
    let report = downloader::download_all(crawl.links, &cfg.download_dir, &mut progress)?;

    println!("All downloads completed.");
    if report.failed > 0 {
        println!(
            "{} of {} file(s) failed; see the log for details.",
            report.failed, report.attempted
        );
    }

    Ok(())
}
