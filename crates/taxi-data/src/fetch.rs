use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use crate::batch::{BatchEntry, BatchResult};
use crate::error::FetchError;
use crate::feedback::Feedback;
use crate::locator::Locator;

/// Retrieves one remote file into a directory.
///
/// Implementations write the file named by [`Locator::file_name`] inside
/// `target_dir`, truncating anything already there, and return its path.
/// The directory already exists when this is called.
#[async_trait::async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_single_resource(
        &self,
        locator: &Locator,
        target_dir: &Path,
    ) -> Result<PathBuf, FetchError>;
}

/// Knobs for a batch. The default is a single attempt per locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Attempts per locator, including the first one. Only transport and
    /// remote status failures are retried.
    pub max_attempts: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { max_attempts: 1 }
    }
}

impl FetchOptions {
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts }
    }
}

/// Fetch every locator concurrently into `target_dir` and wait for all of them.
///
/// Every locator must name a file; otherwise nothing is touched. The
/// directory is created next, including parents. All retrievals then run
/// concurrently on the calling task. The first failure aborts the batch: the
/// remaining retrievals are dropped and the error is returned. On success the
/// entries are in request order.
pub async fn fetch_all<F>(
    fetcher: &F,
    locators: &[Locator],
    target_dir: &Path,
    options: FetchOptions,
) -> Result<BatchResult, FetchError>
where
    F: ResourceFetcher + ?Sized,
{
    if locators.is_empty() {
        return Err(FetchError::InvalidParameter(
            "a batch needs at least one locator".into(),
        ));
    }
    if options.max_attempts == 0 {
        return Err(FetchError::InvalidParameter(
            "max_attempts must be at least 1".into(),
        ));
    }

    for locator in locators {
        locator.file_name()?;
    }

    tokio::fs::create_dir_all(target_dir)
        .await
        .map_err(|e| FetchError::filesystem(target_dir, e))?;

    let total = locators.len();
    debug!(total, target_dir = %target_dir.display(), "starting batch");

    let retrievals = locators.iter().enumerate().map(|(index, locator)| async move {
        let (path, feedback) =
            fetch_with_attempts(fetcher, locator, target_dir, options.max_attempts).await?;
        info!(index, total, %locator, path = %path.display(), "retrieval complete");
        Ok::<_, FetchError>((
            BatchEntry {
                index,
                locator: locator.clone(),
                path,
            },
            feedback,
        ))
    });

    let completed = try_join_all(retrievals).await?;

    let mut result = BatchResult::default();
    for (entry, feedback) in completed {
        result.entries.push(entry);
        result.feedback.extend(feedback);
    }
    Ok(result)
}

async fn fetch_with_attempts<F>(
    fetcher: &F,
    locator: &Locator,
    target_dir: &Path,
    max_attempts: u32,
) -> Result<(PathBuf, Vec<Feedback>), FetchError>
where
    F: ResourceFetcher + ?Sized,
{
    let mut feedback = Vec::new();
    let mut attempt = 1;

    loop {
        match fetcher.fetch_single_resource(locator, target_dir).await {
            Ok(path) => return Ok((path, feedback)),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                warn!(%locator, attempt, max_attempts, error = %e, "retrieval failed, retrying");
                feedback.push(Feedback::warning(format!(
                    "attempt {attempt}/{max_attempts} failed: {e}"
                )));
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
