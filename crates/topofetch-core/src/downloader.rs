//! Bulk download phase: stream every collected link into a destination dir.
//!
//! Strictly sequential, one request in flight at a time. Failure isolation is
//! per link: a failed request or write is logged and the batch proceeds. A
//! truncated file may remain after a mid-stream fault; nothing cleans it up.

use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::link_list::LinkCollection;
use crate::progress::{ProgressSink, TransferStats};
use crate::url_model::UniqueNames;

/// Receive buffer handed to libcurl; also the granularity of byte-count and
/// status updates.
const RECV_BUFFER: usize = 8192;

/// One link's failure. Terminal for that link; never for the batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

/// Counts for the final summary. The process exit code stays 0 regardless of
/// `failed`; callers that want aggregate signaling read this instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub attempted: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Downloads every link into `dest_dir` (created if absent), in set iteration
/// order. The sink is bounded by the number of links and advanced once per
/// completed file; after every received chunk the cumulative-average
/// throughput is pushed as status text.
pub fn download_all(
    links: LinkCollection,
    dest_dir: &Path,
    sink: &mut dyn ProgressSink,
) -> Result<DownloadReport> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("create download dir {}", dest_dir.display()))?;

    sink.init(links.len() as u64, "files");

    let mut names = UniqueNames::new();
    let started = Instant::now();
    let mut bytes_done = 0u64;
    let mut report = DownloadReport::default();

    for url in links.iter() {
        report.attempted += 1;
        let dest = dest_dir.join(names.assign(url));
        match fetch_one(url, &dest, started, &mut bytes_done, sink) {
            Ok(written) => {
                report.completed += 1;
                sink.advance(1);
                tracing::debug!("downloaded {} ({} bytes) -> {}", url, written, dest.display());
            }
            Err(FetchError::Http(status)) => {
                report.failed += 1;
                tracing::warn!("failed to download {}: HTTP {}", url, status);
            }
            Err(err) => {
                report.failed += 1;
                tracing::warn!("error downloading {}: {}", url, err);
            }
        }
    }
    sink.close();

    tracing::info!(
        "download phase finished: {} completed, {} failed of {}",
        report.completed,
        report.failed,
        report.attempted
    );

    Ok(report)
}

/// Streams one URL to `dest`, returning the bytes written.
///
/// The file is created lazily on the first body chunk of the final 200
/// response, so redirect pages and error bodies never land on disk.
fn fetch_one(
    url: &str,
    dest: &Path,
    started: Instant,
    bytes_done: &mut u64,
    sink: &mut dyn ProgressSink,
) -> Result<u64, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.buffer_size(RECV_BUFFER)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;

    // Shared with the transfer callbacks below; the header callback tracks
    // the status of the response currently being delivered so redirect and
    // error bodies can be dropped instead of written.
    let status = Cell::new(0u32);
    let out: RefCell<Option<File>> = RefCell::new(None);
    let written = Cell::new(0u64);
    let write_err: RefCell<Option<io::Error>> = RefCell::new(None);

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            if let Ok(text) = str::from_utf8(line) {
                if let Some(code) = parse_status_line(text) {
                    status.set(code);
                }
            }
            true
        })?;
        transfer.write_function(|data| {
            if status.get() != 200 {
                return Ok(data.len());
            }
            let mut slot = out.borrow_mut();
            if slot.is_none() {
                match File::create(dest) {
                    Ok(file) => *slot = Some(file),
                    Err(err) => {
                        *write_err.borrow_mut() = Some(err);
                        return Ok(0); // abort transfer
                    }
                }
            }
            let Some(file) = slot.as_mut() else {
                return Ok(0);
            };
            if let Err(err) = file.write_all(data) {
                *write_err.borrow_mut() = Some(err);
                return Ok(0);
            }
            drop(slot);

            written.set(written.get() + data.len() as u64);
            *bytes_done += data.len() as u64;
            let stats = TransferStats {
                bytes_done: *bytes_done,
                elapsed_secs: started.elapsed().as_secs_f64(),
            };
            sink.set_status(&stats.status_line());
            Ok(data.len())
        })?;
        transfer.perform()
    };

    if let Some(source) = write_err.borrow_mut().take() {
        return Err(FetchError::Io {
            path: dest.to_path_buf(),
            source,
        });
    }
    perform_result?;

    let code = easy.response_code()?;
    if code != 200 {
        return Err(FetchError::Http(code));
    }

    // A 200 with an empty body never triggered the write callback; the file
    // still has to exist afterwards.
    if out.into_inner().is_none() {
        File::create(dest).map_err(|source| FetchError::Io {
            path: dest.to_path_buf(),
            source,
        })?;
    }

    Ok(written.get())
}

/// Parses the code out of an HTTP status line ("HTTP/1.1 200 OK"). The header
/// callback also sees ordinary header lines; those yield `None`.
fn parse_status_line(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}
