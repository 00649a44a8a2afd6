//! Latest-version lookups against an npm-compatible registry.
//!
//! `GET {registry_url}/{package}/latest` answers with the manifest of the
//! latest published release. Three outcomes matter:
//!
//! - `200`: `Ok(Some(version))`
//! - `404`: `Ok(None)`; an unknown package is absence, not failure
//! - anything else: [`CtxdocsError::RegistryHttp`] carrying the status code
//!
//! Successful answers (including 404) are memoized per client; errors are
//! not, so a later call retries. The client is created and owned by the
//! caller and [`NpmRegistry::reset`] drops the memo.

use anyhow::Result;
use dashmap::DashMap;
use reqwest::StatusCode;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::core::CtxdocsError;

/// Something that knows the latest published version of a package.
pub trait VersionSource {
    /// Latest version of `package`, or `None` if the package does not exist.
    fn latest_version(&self, package: &str) -> impl Future<Output = Result<Option<String>>> + Send;
}

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

/// Memoizing npm registry client.
#[derive(Debug)]
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
    memo: DashMap<String, Option<String>>,
}

impl NpmRegistry {
    /// A client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CtxdocsError::NetworkError`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ctxdocs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CtxdocsError::NetworkError {
                operation: "build registry client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            memo: DashMap::new(),
        })
    }

    /// Forget all memoized answers.
    pub fn reset(&self) {
        self.memo.clear();
    }

    /// Number of memoized answers.
    #[must_use]
    pub fn memoized(&self) -> usize {
        self.memo.len()
    }

    fn latest_url(&self, package: &str) -> String {
        format!("{}/{}/latest", self.base_url, encode_package_name(package))
    }

    async fn fetch_latest(&self, package: &str) -> Result<Option<String>> {
        if let Some(hit) = self.memo.get(package) {
            return Ok(hit.clone());
        }

        let url = self.latest_url(package);
        debug!("Fetching latest version of {package} from {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            CtxdocsError::NetworkError {
                operation: format!("registry lookup for '{package}'"),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let version = if status == StatusCode::NOT_FOUND {
            debug!("Package {package} not found in registry");
            None
        } else if status.is_success() {
            let manifest: LatestManifest =
                response.json().await.map_err(|e| CtxdocsError::NetworkError {
                    operation: format!("registry lookup for '{package}'"),
                    reason: format!("invalid response body: {e}"),
                })?;
            Some(manifest.version)
        } else {
            return Err(CtxdocsError::RegistryHttp {
                package: package.to_string(),
                status: status.as_u16(),
            }
            .into());
        };

        self.memo.insert(package.to_string(), version.clone());
        Ok(version)
    }
}

impl VersionSource for NpmRegistry {
    fn latest_version(&self, package: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        self.fetch_latest(package)
    }
}

/// Encode a package name for use as a registry path segment.
///
/// Scoped names keep their `@` but the separating slash is escaped:
/// `@tanstack/react-query` becomes `@tanstack%2Freact-query`.
#[must_use]
pub fn encode_package_name(package: &str) -> String {
    package.replace('/', "%2F")
}
