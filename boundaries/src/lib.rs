//! Constellation boundary file downloader
//!
//! The IAU publishes one boundary text file per constellation, linked from a
//! single index page. [`BoundaryFetcher`] reads that page, picks out the
//! plain text links and downloads each file in turn.
//!
//! Requests are sequential and blocking, without retries or timeouts. By
//! default the first failed download aborts the run; [`FailurePolicy::KeepGoing`]
//! logs failures and carries on with the remaining files.

pub mod links;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use thiserror::Error;
use url::Url;

pub use links::{extract_links, file_name, LinkPattern};

/// Index page listing the constellation boundary files
pub const DEFAULT_PAGE_URL: &str = "https://iau.org/public/themes/constellations/";

/// Errors that can occur while fetching boundary files
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid link selector: {0}")]
    Selector(String),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: Url,
        #[source]
        source: ureq::Error,
    },

    #[error("Cannot derive a file name from {0}")]
    NoFileName(Url),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{failed} of {total} downloads failed")]
    Incomplete { failed: usize, total: usize },
}

/// What to do when one download fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure
    #[default]
    Abort,
    /// Log the failure and continue with the next file
    KeepGoing,
}

/// Outcome of downloading a list of files
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Files written, in download order
    pub saved: Vec<PathBuf>,
    /// URLs that could not be downloaded, with the reason
    pub failed: Vec<(Url, FetchError)>,
}

impl FetchReport {
    pub fn total(&self) -> usize {
        self.saved.len() + self.failed.len()
    }

    /// Turn a report with failures into an error
    pub fn into_result(self) -> Result<Vec<PathBuf>, FetchError> {
        if self.failed.is_empty() {
            Ok(self.saved)
        } else {
            Err(FetchError::Incomplete {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }
}

/// Blocking HTTP client for the boundary index page and files
#[derive(Debug, Clone)]
pub struct BoundaryFetcher {
    agent: ureq::Agent,
    pattern: LinkPattern,
}

impl Default for BoundaryFetcher {
    fn default() -> Self {
        Self::new(LinkPattern::default())
    }
}

impl BoundaryFetcher {
    pub fn new(pattern: LinkPattern) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            pattern,
        }
    }

    /// Download the index page as text
    pub fn fetch_page(&self, page_url: &Url) -> Result<String, FetchError> {
        let http_error = |source| FetchError::Http {
            url: page_url.clone(),
            source,
        };

        let mut response = self
            .agent
            .get(page_url.as_str())
            .call()
            .map_err(http_error)?;
        response.body_mut().read_to_string().map_err(http_error)
    }

    /// Fetch the index page and return the boundary file URLs it links to
    pub fn find_links(&self, page_url: &Url) -> Result<Vec<Url>, FetchError> {
        let html = self.fetch_page(page_url)?;
        let urls = extract_links(&html, page_url, &self.pattern)?;
        info!("Found {} boundary files on {}", urls.len(), page_url);
        Ok(urls)
    }

    /// Download one file into `dir`, named after the last URL path segment.
    ///
    /// The body is written to a `.part` file first and renamed once complete,
    /// so an interrupted download never leaves a truncated file under the
    /// final name.
    pub fn download(&self, url: &Url, dir: &Path) -> Result<PathBuf, FetchError> {
        let name = file_name(url).ok_or_else(|| FetchError::NoFileName(url.clone()))?;
        let target = dir.join(name);
        let partial = dir.join(format!("{name}.part"));
        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let mut file = File::create(&partial).map_err(|source| FetchError::Io {
            path: partial.clone(),
            source,
        })?;
        let mut body = response.into_body().into_reader();
        if let Err(source) = io::copy(&mut body, &mut file) {
            remove_partial(&partial);
            return Err(FetchError::Io {
                path: partial,
                source,
            });
        }
        drop(file);

        if let Err(source) = fs::rename(&partial, &target) {
            remove_partial(&partial);
            return Err(FetchError::Io {
                path: target,
                source,
            });
        }
        Ok(target)
    }

    /// Download every URL into `dir` in order
    pub fn download_all(
        &self,
        urls: &[Url],
        dir: &Path,
        policy: FailurePolicy,
    ) -> Result<FetchReport, FetchError> {
        let mut report = FetchReport::default();

        for url in urls {
            info!("Downloading {url}");
            match self.download(url, dir) {
                Ok(path) => report.saved.push(path),
                Err(e) if policy == FailurePolicy::KeepGoing => {
                    error!("Skipping {url}: {e}");
                    report.failed.push((url.clone(), e));
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Downloaded {} of {} files into {}",
            report.saved.len(),
            report.total(),
            dir.display()
        );
        Ok(report)
    }
}

fn remove_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Could not remove partial download {}: {e}", path.display());
    }
}
