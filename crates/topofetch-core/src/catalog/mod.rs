//! Catalog pagination: a page-offset loop collecting unique download links.
//!
//! The offset is a locally maintained counter; no pagination cursor from the
//! API is honored. Duplicate or shifted pages caused by a catalog mutating
//! mid-crawl are tolerated through set deduplication.

mod page;

pub use page::{CatalogItem, CatalogPage};

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::link_list::LinkCollection;
use crate::progress::ProgressSink;

/// A catalog page request that did not produce a usable page. Every variant
/// ends the crawl; none of them ends the process.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Non-200 response; carries status code and response text.
    #[error("catalog request failed: HTTP {status}: {body}")]
    RequestFailed { status: u32, body: String },
    #[error("catalog transport error: {0}")]
    Transport(#[from] curl::Error),
    #[error("catalog response is not valid JSON: {0}")]
    BadJson(#[from] serde_json::Error),
    #[error("invalid catalog URL: {0}")]
    BadUrl(#[from] url::ParseError),
}

/// Why the crawl loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlStop {
    /// A page came back with no items: the normal end-of-catalog signal.
    Exhausted,
    /// A page request failed; everything collected before it is kept.
    Failed { error: String },
}

/// Result of the crawl phase. The collection (not the link file) feeds the
/// download phase.
#[derive(Debug)]
pub struct CrawlReport {
    pub links: LinkCollection,
    /// `total` sampled from the first successful page (0 if none succeeded).
    pub total_reported: u64,
    /// Pages that contributed items.
    pub pages: u32,
    pub stop: CrawlStop,
}

/// Fixed query shape for the products endpoint:
/// `GET endpoint?datasets=&prodFormats=&offset=`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    endpoint: String,
    datasets: String,
    prod_formats: String,
}

impl CatalogClient {
    pub fn new(endpoint: &str, datasets: &str, prod_formats: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            datasets: datasets.to_string(),
            prod_formats: prod_formats.to_string(),
        }
    }

    fn page_url(&self, offset: u64) -> Result<String, CatalogError> {
        let mut url = url::Url::parse(&self.endpoint)?;
        url.query_pairs_mut()
            .append_pair("datasets", &self.datasets)
            .append_pair("prodFormats", &self.prod_formats)
            .append_pair("offset", &offset.to_string());
        Ok(url.into())
    }

    /// Issues one page request. Returns the parsed page on HTTP 200; any
    /// other status yields `RequestFailed` with the response text.
    pub fn fetch_page(&self, offset: u64) -> Result<CatalogPage, CatalogError> {
        let url = self.page_url(offset)?;

        let mut body: Vec<u8> = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(&url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(15))?;
        easy.timeout(Duration::from_secs(120))?;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        if status != 200 {
            return Err(CatalogError::RequestFailed {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Runs the offset loop until the catalog is exhausted or a request fails.
///
/// Termination precedence per page: request failure (logged, no retry, no
/// backoff), then empty item list, then collect-and-continue. The progress
/// bound is sampled from the first successful page's `total` and never
/// adjusted afterwards, even if it turns out stale.
pub fn crawl(client: &CatalogClient, page_size: u64, sink: &mut dyn ProgressSink) -> CrawlReport {
    let mut links = LinkCollection::new();
    let mut offset = 0u64;
    let mut pages = 0u32;
    let mut total_reported = 0u64;
    let mut total_sampled = false;

    let stop = loop {
        let page = match client.fetch_page(offset) {
            Ok(page) => page,
            Err(err) => {
                tracing::error!("catalog crawl stopped at offset {}: {}", offset, err);
                break CrawlStop::Failed {
                    error: err.to_string(),
                };
            }
        };

        if !total_sampled {
            total_reported = page.total;
            total_sampled = true;
            sink.init(total_reported, "items");
        }

        if page.items.is_empty() {
            break CrawlStop::Exhausted;
        }

        let item_count = page.items.len();
        for item in page.items {
            // Items without a usable link are skipped silently.
            if let Some(link) = item.download_url {
                if !link.is_empty() {
                    links.insert(link);
                }
            }
        }
        sink.advance(item_count as u64);

        pages += 1;
        offset += page_size;
    };
    sink.close();

    tracing::info!(
        "crawl collected {} unique link(s) over {} page(s)",
        links.len(),
        pages
    );

    CrawlReport {
        links,
        total_reported,
        pages,
        stop,
    }
}

/// Phase 1: crawl the catalog and persist the link list artifact.
///
/// The file is written after the loop ends by any reason, so a failed crawl
/// still leaves the partial set on disk.
pub fn collect_links(
    client: &CatalogClient,
    page_size: u64,
    link_file: &Path,
    sink: &mut dyn ProgressSink,
) -> Result<CrawlReport> {
    let report = crawl(client, page_size, sink);
    report
        .links
        .write_to(link_file)
        .with_context(|| format!("write link list {}", link_file.display()))?;
    Ok(report)
}
