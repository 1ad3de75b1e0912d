//! GitHub release metadata and asset downloads
//!
//! [`ReleaseClient`] queries the upstream release API for a tagged release
//! and downloads its assets through the [`AssetCache`]. The HTTP client is
//! owned by the `ReleaseClient` instance rather than living in module-level
//! state, so tests can point a client at a local server.

use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::info;

use crate::cache::{set_executable, AssetCache, CacheStatus};
use crate::error::{Error, Result};

const GITHUB_API_BASE: &str = "https://api.github.com/repos/tailwindlabs/tailwindcss";

/// One downloadable file attached to a release
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    /// Declared size in bytes, the cache-validity oracle
    pub size: u64,
}

/// A tagged upstream release and its assets
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub body: String,
    pub assets: Vec<ReleaseAsset>,
}

/// Client for the upstream release API
pub struct ReleaseClient {
    http: reqwest::blocking::Client,
    api_base: String,
}

impl ReleaseClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("tailwind/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base: GITHUB_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API base (used by tests)
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Fetch metadata for a tagged release
    pub fn fetch_release(&self, tag: &str) -> Result<Release> {
        let url = format!("{}/releases/tags/{}", self.api_base, tag);
        let response = self
            .http
            .get(&url)
            .header("accept", "application/vnd.github.v3+json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                url,
                status: status.as_u16(),
            });
        }

        Ok(response.json()?)
    }

    /// Download an asset through the cache, returning the local path
    ///
    /// A cache hit returns without any network access. A stale entry is
    /// deleted before a single re-download attempt.
    pub fn download(&self, tag: &str, asset: &ReleaseAsset, cache: &AssetCache) -> Result<PathBuf> {
        match cache.status(tag, &asset.name, asset.size)? {
            CacheStatus::Hit(path) => {
                set_executable(&path)?;
                return Ok(path);
            }
            CacheStatus::Stale(_) => cache.invalidate(tag, &asset.name)?,
            CacheStatus::Miss => {}
        }

        info!(asset = %asset.name, url = %asset.browser_download_url, "downloading asset");

        let response = self.http.get(&asset.browser_download_url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                url: asset.browser_download_url.clone(),
                status: status.as_u16(),
            });
        }

        let pb = ProgressBar::new(asset.size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                .expect("progress template is valid")
                .progress_chars("#>-"),
        );
        pb.set_message(asset.name.clone());

        let mut body = pb.wrap_read(response);
        let path = cache.store(tag, &asset.name, &mut body)?;
        pb.finish_and_clear();

        info!(path = %path.display(), "saved asset");
        Ok(path)
    }
}
