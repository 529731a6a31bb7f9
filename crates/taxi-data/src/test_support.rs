use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tokio::io::AsyncWriteExt;

use crate::{FetchError, Locator, ResourceFetcher};

const CHUNK_SIZE: usize = 8;

/// In-memory fetcher for testing. Serves fixed payloads, optionally after a
/// delay or a number of simulated failures, and records completion order.
#[derive(Default)]
pub struct InMemoryFetcher {
    payloads: HashMap<Locator, Vec<u8>>,
    delays: HashMap<Locator, Duration>,
    statuses: HashMap<Locator, u16>,
    transient_failures: Mutex<HashMap<Locator, u32>>,
    attempts: Mutex<HashMap<Locator, u32>>,
    completed: Mutex<Vec<Locator>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, locator: Locator, payload: Vec<u8>) {
        self.payloads.insert(locator, payload);
    }

    pub fn delay(&mut self, locator: Locator, delay: Duration) {
        self.delays.insert(locator, delay);
    }

    /// Every attempt on `locator` fails with the given HTTP status.
    pub fn fail_with_status(&mut self, locator: Locator, status: u16) {
        self.statuses.insert(locator, status);
    }

    /// The first `times` attempts on `locator` fail with a transport error.
    pub fn fail_transiently(&mut self, locator: Locator, times: u32) {
        self.transient_failures
            .get_mut()
            .unwrap()
            .insert(locator, times);
    }

    pub fn attempts(&self, locator: &Locator) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(locator)
            .copied()
            .unwrap_or_default()
    }

    /// Locators in the order their retrievals finished successfully.
    pub fn completion_order(&self) -> Vec<Locator> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ResourceFetcher for InMemoryFetcher {
    async fn fetch_single_resource(
        &self,
        locator: &Locator,
        target_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        *self
            .attempts
            .lock()
            .unwrap()
            .entry(locator.clone())
            .or_default() += 1;

        if let Some(delay) = self.delays.get(locator) {
            tokio::time::sleep(*delay).await;
        }

        {
            let mut transient = self.transient_failures.lock().unwrap();
            if let Some(remaining) = transient.get_mut(locator)
                && *remaining > 0
            {
                *remaining -= 1;
                return Err(FetchError::transport(locator, "connection reset by peer"));
            }
        }

        if let Some(status) = self.statuses.get(locator) {
            return Err(FetchError::RemoteStatus {
                locator: locator.to_string(),
                status: *status,
            });
        }

        let path = target_dir.join(locator.file_name()?);
        let payload = self
            .payloads
            .get(locator)
            .ok_or_else(|| FetchError::RemoteStatus {
                locator: locator.to_string(),
                status: 404,
            })?;

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| FetchError::filesystem(&path, e))?;
        for chunk in payload.chunks(CHUNK_SIZE) {
            file.write_all(chunk)
                .await
                .map_err(|e| FetchError::filesystem(&path, e))?;
            tokio::task::yield_now().await;
        }
        file.flush()
            .await
            .map_err(|e| FetchError::filesystem(&path, e))?;

        self.completed.lock().unwrap().push(locator.clone());
        Ok(path)
    }
}
