//! Favicon resolution jobs
//!
//! At most one fetch is in flight per tab. Re-resolving a tab's icon
//! cancels the previous job before the new one starts; closing the tab
//! or tearing the resolver down releases jobs and resolved resources
//! alike. Completions are delivered over a channel and drained on the
//! host's event thread.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{mpsc, watch};
use url::Url;

use strand_tabs::TabKey;

use crate::error::IconError;
use crate::fetcher::{FetchControl, IconFetcher};

/// An icon ready for the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIcon {
    /// Same-origin source the presenter can load directly.
    Direct(String),
    /// Cross-origin bytes fetched through the client.
    Fetched { src: String, bytes: Arc<Vec<u8>> },
}

/// Completion notice for one tab's icon. `icon` is `None` when the fetch
/// failed; the tab simply shows no icon.
#[derive(Debug, Clone)]
pub struct IconEvent {
    pub key: TabKey,
    pub icon: Option<ResolvedIcon>,
}

pub struct IconResolver {
    /// Origin icon sources are compared against.
    base: Url,
    fetcher: Arc<dyn IconFetcher>,
    jobs: Arc<RwLock<HashMap<TabKey, watch::Sender<FetchControl>>>>,
    resolved: Arc<RwLock<HashMap<TabKey, ResolvedIcon>>>,
    events: mpsc::UnboundedSender<IconEvent>,
}

impl IconResolver {
    pub fn new(
        base: Url,
        fetcher: Arc<dyn IconFetcher>,
    ) -> (Self, mpsc::UnboundedReceiver<IconEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        (
            Self {
                base,
                fetcher,
                jobs: Arc::new(RwLock::new(HashMap::new())),
                resolved: Arc::new(RwLock::new(HashMap::new())),
                events,
            },
            receiver,
        )
    }

    /// Resolve `src` for the tab with `key`, superseding whatever fetch
    /// was in flight for it. Same-origin sources complete immediately;
    /// cross-origin sources spawn a cancellable fetch job.
    pub fn resolve(&self, key: TabKey, src: &str) {
        let formed = match self.base.join(src) {
            Ok(url) => url,
            Err(_) => {
                tracing::debug!(tab_key = key, src = %src, "Ignoring unparseable icon source");
                self.cancel(key);
                return;
            }
        };

        self.cancel_job(key);

        if formed.origin() == self.base.origin() {
            let icon = ResolvedIcon::Direct(formed.to_string());
            self.resolved.write().insert(key, icon.clone());
            let _ = self.events.send(IconEvent {
                key,
                icon: Some(icon),
            });
            return;
        }

        let (tx, rx) = watch::channel(FetchControl::Continue);
        self.jobs.write().insert(key, tx);

        let fetcher = Arc::clone(&self.fetcher);
        let jobs = Arc::clone(&self.jobs);
        let resolved = Arc::clone(&self.resolved);
        let events = self.events.clone();
        let src = src.to_string();
        let cancelled = rx.clone();

        tokio::spawn(async move {
            let outcome = fetcher.fetch(&formed, rx).await;

            // Publish under the jobs lock so a stale completion cannot
            // clobber the job a newer resolve installed.
            let mut jobs = jobs.write();
            if *cancelled.borrow() == FetchControl::Cancel {
                return;
            }
            jobs.remove(&key);
            drop(jobs);

            match outcome {
                Ok(bytes) => {
                    let icon = ResolvedIcon::Fetched {
                        src,
                        bytes: Arc::new(bytes),
                    };
                    resolved.write().insert(key, icon.clone());
                    let _ = events.send(IconEvent {
                        key,
                        icon: Some(icon),
                    });
                    tracing::debug!(tab_key = key, "Resolved icon");
                }
                Err(IconError::Cancelled) => {}
                Err(e) => {
                    resolved.write().remove(&key);
                    let _ = events.send(IconEvent { key, icon: None });
                    tracing::debug!(tab_key = key, error = %e, "Icon fetch failed");
                }
            }
        });
    }

    /// Release everything held for `key`: the in-flight job, if any, and
    /// the resolved resource. Used when the tab closes or its icon goes
    /// away.
    pub fn cancel(&self, key: TabKey) {
        self.cancel_job(key);
        self.resolved.write().remove(&key);
    }

    /// Cancel every job and drop every resolved resource.
    pub fn shutdown(&self) {
        let mut jobs = self.jobs.write();
        for (key, tx) in jobs.drain() {
            let _ = tx.send(FetchControl::Cancel);
            tracing::debug!(tab_key = key, "Cancelled icon fetch at teardown");
        }
        drop(jobs);

        self.resolved.write().clear();
    }

    pub fn icon_for(&self, key: TabKey) -> Option<ResolvedIcon> {
        self.resolved.read().get(&key).cloned()
    }

    pub fn has_job(&self, key: TabKey) -> bool {
        self.jobs.read().contains_key(&key)
    }

    fn cancel_job(&self, key: TabKey) {
        if let Some(tx) = self.jobs.write().remove(&key) {
            let _ = tx.send(FetchControl::Cancel);
            tracing::debug!(tab_key = key, "Cancelled icon fetch");
        }
    }
}

impl Drop for IconResolver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
