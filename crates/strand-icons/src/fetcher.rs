//! Icon fetch boundary

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::watch;
use url::Url;

use crate::error::IconError;
use crate::Result;

/// Control signal for an in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchControl {
    Continue,
    Cancel,
}

/// Fetches icon bytes for cross-origin sources.
///
/// Implementations must abort promptly when `control` flips to
/// [`FetchControl::Cancel`] and return [`IconError::Cancelled`].
#[async_trait]
pub trait IconFetcher: Send + Sync {
    async fn fetch(&self, src: &Url, control: watch::Receiver<FetchControl>) -> Result<Vec<u8>>;
}

/// HTTP fetcher that streams the body chunk by chunk, so cancellation
/// lands mid-transfer instead of after the whole response.
pub struct HttpIconFetcher {
    client: reqwest::Client,
}

impl HttpIconFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpIconFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IconFetcher for HttpIconFetcher {
    async fn fetch(&self, src: &Url, mut control: watch::Receiver<FetchControl>) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(src.clone())
            .send()
            .await
            .map_err(|e| IconError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IconError::Status(response.status().as_u16()));
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();

        loop {
            tokio::select! {
                changed = control.changed() => {
                    // A dropped control channel counts as cancellation.
                    if changed.is_err() || *control.borrow() == FetchControl::Cancel {
                        return Err(IconError::Cancelled);
                    }
                }
                chunk = stream.next() => {
                    match chunk {
                        Some(Ok(bytes)) => body.extend_from_slice(&bytes),
                        Some(Err(e)) => return Err(IconError::Fetch(e.to_string())),
                        None => break,
                    }
                }
            }
        }

        Ok(body)
    }
}
