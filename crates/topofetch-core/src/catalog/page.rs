//! Catalog page JSON structures (the subset the crawler reads).

use serde::Deserialize;

/// One paginated response from the products endpoint.
#[derive(Debug, Deserialize)]
pub struct CatalogPage {
    /// Total matching records as reported by the catalog. Sampled once from
    /// the first successful page and used only for the progress bound; it is
    /// never validated against the number of links actually collected.
    #[serde(default)]
    pub total: u64,
    /// Item records for this page. An empty list is the end-of-catalog signal.
    #[serde(default)]
    pub items: Vec<CatalogItem>,
}

/// One catalog item; only the download link matters here.
#[derive(Debug, Deserialize)]
pub struct CatalogItem {
    #[serde(default, rename = "downloadURL")]
    pub download_url: Option<String>,
}
