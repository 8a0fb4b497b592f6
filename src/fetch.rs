//! Remote package metadata.
//!
//! The monitor talks to the index through the [`MetadataFetcher`] seam.
//! Absence is the only failure signal that crosses it: network errors,
//! HTTP errors, malformed bodies, and responses without a version all
//! collapse to `None`, logged at the fetch site.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Result, ScoutError};

/// Default package index endpoint. `{base}/{package}/json` per package.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// Extracted metadata for one package release.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageMetadata {
    /// Latest released version.
    pub version: String,
    pub homepage: Option<String>,
    pub summary: Option<String>,
    pub requires_python: Option<String>,
    pub changelog_url: Option<String>,
}

/// Fetches the latest metadata for a package by name.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetch metadata for `package`. `None` means the package could not be
    /// checked this cycle (any transport or shape problem).
    async fn fetch(&self, package: &str) -> Option<PackageMetadata>;
}

// =============================================================================
// PyPI JSON API
// =============================================================================

/// Wire shape of a PyPI `/pypi/{package}/json` response, reduced to the
/// fields the monitor records.
#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PypiInfo {
    version: Option<String>,
    home_page: Option<String>,
    project_url: Option<String>,
    summary: Option<String>,
    requires_python: Option<String>,
    project_urls: Option<HashMap<String, String>>,
}

fn metadata_from_response(response: PypiResponse) -> Option<PackageMetadata> {
    let info = response.info;
    // A record without a version is useless to the monitor.
    let version = info.version.filter(|v| !v.is_empty())?;

    let changelog_url = info
        .project_urls
        .as_ref()
        .and_then(|urls| urls.get("Changelog").cloned());

    Some(PackageMetadata {
        version,
        homepage: info.home_page.or(info.project_url),
        summary: info.summary,
        requires_python: info.requires_python,
        changelog_url,
    })
}

/// HTTP fetcher over the PyPI JSON API.
#[derive(Debug, Clone)]
pub struct PyPiFetcher {
    client: reqwest::Client,
    index_url: String,
}

impl PyPiFetcher {
    /// Build a fetcher against `index_url` with a per-request timeout.
    pub fn new(index_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("libscout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScoutError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            index_url: index_url.into(),
        })
    }

    fn package_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.index_url.trim_end_matches('/'), package)
    }

    async fn request(&self, package: &str) -> reqwest::Result<PypiResponse> {
        self.client
            .get(self.package_url(package))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl MetadataFetcher for PyPiFetcher {
    async fn fetch(&self, package: &str) -> Option<PackageMetadata> {
        let response = match self.request(package).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(package, error = %err, "fetch failed, skipping this cycle");
                return None;
            }
        };

        let metadata = metadata_from_response(response);
        if metadata.is_none() {
            tracing::warn!(package, "index response had no version, skipping this cycle");
        }
        metadata
    }
}

// =============================================================================
// Static fetcher
// =============================================================================

/// In-memory fetcher, primarily for use in unit tests.
///
/// Serves metadata from a fixed map; packages without an entry fetch as
/// `None`, which exercises the monitor's skip path.
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    entries: HashMap<String, PackageMetadata>,
}

impl StaticFetcher {
    /// Create an empty fetcher (every fetch fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `metadata` for `package`.
    pub fn insert(&mut self, package: impl Into<String>, metadata: PackageMetadata) {
        self.entries.insert(package.into(), metadata);
    }

    /// Serve a bare version for `package`, no descriptive fields.
    pub fn insert_version(&mut self, package: impl Into<String>, version: impl Into<String>) {
        self.insert(
            package,
            PackageMetadata {
                version: version.into(),
                homepage: None,
                summary: None,
                requires_python: None,
                changelog_url: None,
            },
        );
    }

    /// Drop a package so its next fetch fails.
    pub fn remove(&mut self, package: &str) {
        self.entries.remove(package);
    }
}

#[async_trait]
impl MetadataFetcher for StaticFetcher {
    async fn fetch(&self, package: &str) -> Option<PackageMetadata> {
        self.entries.get(package).cloned()
    }
}
