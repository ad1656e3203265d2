use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/topofetch/config.toml`.
///
/// Default crawl parameters; the CLI can override individual values per
/// invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Catalog API endpoint queried page by page.
    pub endpoint: String,
    /// Dataset name filter, sent as the `datasets` query parameter.
    pub datasets: String,
    /// Product format filter, sent as `prodFormats` even when empty.
    #[serde(default)]
    pub prod_formats: String,
    /// Records requested per page; also the offset increment.
    pub page_size: u64,
    /// Path of the newline-delimited link list artifact.
    pub link_list: PathBuf,
    /// Directory downloads are written into (created if absent).
    pub download_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://tnmaccess.nationalmap.gov/api/v1/products".to_string(),
            datasets: "US Topo Current".to_string(),
            prod_formats: String::new(),
            page_size: 50,
            link_list: PathBuf::from("out.txt"),
            download_dir: PathBuf::from("downloads"),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("topofetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
