use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{info, warn};

use crate::config::Credentials;
use crate::date::DateRange;
use crate::error::{Error, Result};
use crate::locator;

/// Outcome of a batch download.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub attempted: usize,
    pub files: Vec<PathBuf>,
}

/// Authenticated client for the GES DISC archive.
///
/// All fetches are synchronous and sequential; a failed fetch never aborts
/// the rest of a batch.
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    credentials: Credentials,
}

impl Client {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("merra2-subset/0.1"));

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self { http, credentials })
    }

    /// Fetch one archive URL into `output_dir`, named after the URL's last
    /// path segment. Returns the path of the written file.
    pub fn fetch(&self, url: &str, output_dir: &Path) -> Result<PathBuf> {
        let resp = self
            .http
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let filename = url.rsplit('/').next().unwrap_or("download.nc4");
        let path = output_dir.join(filename);
        let bytes = resp.bytes()?;
        fs::write(&path, &bytes)?;

        Ok(path)
    }

    /// Download every file of a product over a date range.
    ///
    /// URL construction happens up front, so an unknown product or reversed
    /// range fails before any network activity. Individual fetch failures are
    /// logged and skipped; the outcome reports attempted vs succeeded.
    pub fn download(
        &self,
        product_id: &str,
        range: DateRange,
        output_dir: &Path,
    ) -> Result<DownloadOutcome> {
        let urls = locator::locate(product_id, range)?;
        fs::create_dir_all(output_dir)?;

        let mut files = Vec::new();
        for url in &urls {
            match self.fetch(url, output_dir) {
                Ok(path) => {
                    info!(file = %path.display(), "downloaded");
                    files.push(path);
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "download failed, skipping");
                }
            }
        }

        Ok(DownloadOutcome {
            attempted: urls.len(),
            files,
        })
    }
}
