use std::path::{Path, PathBuf};
use std::time::Duration;

use taxi_data::{BatchResult, FetchError, FetchOptions, Locator, ResourceFetcher, fetch_all};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Transport settings shared by every request a client makes.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Total time allowed per request, body included. `None` waits forever.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: "taxi-data-fetcher".into(),
        }
    }
}

impl HttpConfig {
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(&self.user_agent);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| FetchError::transport("http client", format!("failed to build: {e}")))
    }
}

/// HTTP client that streams remote files straight to disk.
///
/// One instance is meant to serve one batch; dropping it closes the
/// pooled connections.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        Ok(Self {
            client: config.build_client()?,
        })
    }
}

#[async_trait::async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_single_resource(
        &self,
        locator: &Locator,
        target_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        let path = target_dir.join(locator.file_name()?);
        download_to_file(&self.client, locator.as_str(), &path).await?;
        Ok(path)
    }
}

/// GET `url` and write the body to `path` chunk by chunk.
///
/// The destination is only created once the server has answered with a
/// success status, so a 404 leaves an existing file untouched. Returns the
/// number of bytes written.
pub(crate) async fn download_to_file(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
) -> Result<u64, FetchError> {
    debug!(url, "connecting");

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::transport(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::RemoteStatus {
            locator: url.to_owned(),
            status: status.as_u16(),
        });
    }

    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| FetchError::filesystem(path, e))?;

    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| FetchError::transport(url, format!("failed to read body: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| FetchError::filesystem(path, e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| FetchError::filesystem(path, e))?;

    debug!(url, path = %path.display(), bytes = written, "download finished");
    Ok(written)
}

/// Download a batch of trip-data files into `target_dir`.
///
/// A single HTTP client is created for the batch and dropped once every
/// retrieval has finished or the batch has failed, closing its connections.
pub async fn download_taxi_data(
    locators: &[Locator],
    target_dir: &Path,
    config: &HttpConfig,
    options: FetchOptions,
) -> Result<BatchResult, FetchError> {
    let fetcher = HttpFetcher::new(config)?;
    let result = fetch_all(&fetcher, locators, target_dir, options).await;
    drop(fetcher);
    result
}
