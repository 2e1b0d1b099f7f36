//! Debounced search-as-you-type
//!
//! Each keystroke schedules a search after a quiet period. Scheduling again
//! cancels the pending task, so only the most recently scheduled search may
//! run and publish results.

use crate::services::CatalogSearch;
use seedmix_common::events::{EventBus, SeedmixEvent};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancellable delayed catalog search
pub struct SearchDebouncer {
    catalog: Arc<dyn CatalogSearch>,
    event_bus: EventBus,
    quiet_period: Duration,
    pending: Mutex<Option<CancellationToken>>,
}

impl SearchDebouncer {
    pub fn new(catalog: Arc<dyn CatalogSearch>, event_bus: EventBus, quiet_period: Duration) -> Self {
        Self {
            catalog,
            event_bus,
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    /// Schedule a search for `term`, cancelling any pending one
    ///
    /// Results arrive on the event bus as `SearchResults`/`SearchFailed`.
    /// A blank term only cancels the pending search.
    pub fn schedule(&self, term: impl Into<String>) -> JoinHandle<()> {
        let term = term.into().trim().to_string();
        let token = self.replace_pending();

        let catalog = Arc::clone(&self.catalog);
        let event_bus = self.event_bus.clone();
        let quiet_period = self.quiet_period;

        tokio::spawn(async move {
            if term.is_empty() {
                return;
            }

            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!(term = %term, "Debounced search cancelled before firing");
                    return;
                }
                _ = tokio::time::sleep(quiet_period) => {}
            }

            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!(term = %term, "Debounced search superseded in flight");
                    return;
                }
                result = catalog.search(&term) => result,
            };

            let event = match result {
                Ok(results) => SeedmixEvent::SearchResults {
                    term,
                    results,
                    timestamp: chrono::Utc::now(),
                },
                Err(e) => {
                    tracing::warn!(term = %term, error = %e, "Search failed");
                    SeedmixEvent::SearchFailed {
                        term,
                        message: e.user_message(),
                        timestamp: chrono::Utc::now(),
                    }
                }
            };
            event_bus.emit_lossy(event);
        })
    }

    /// Cancel the pending search, if any
    pub fn cancel(&self) {
        if let Some(token) = self.lock_pending().take() {
            token.cancel();
        }
    }

    fn replace_pending(&self) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some(previous) = self.lock_pending().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        // A poisoned lock only means another scheduler panicked mid-swap
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CuratorResult;
    use async_trait::async_trait;
    use seedmix_common::CatalogEntry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records every term it is asked for
    struct RecordingCatalog {
        terms: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSearch for RecordingCatalog {
        async fn search(&self, term: &str) -> CuratorResult<Vec<CatalogEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.terms.lock().unwrap().push(term.to_string());
            Ok(Vec::new())
        }
    }

    fn recording_catalog() -> Arc<RecordingCatalog> {
        Arc::new(RecordingCatalog {
            terms: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_scheduled_search_runs() {
        let catalog = recording_catalog();
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let debouncer = SearchDebouncer::new(catalog.clone(), bus, Duration::from_millis(300));

        let first = debouncer.schedule("ab");
        let second = debouncer.schedule("abb");
        let third = debouncer.schedule("abba");

        first.await.unwrap();
        second.await.unwrap();
        third.await.unwrap();

        assert_eq!(*catalog.terms.lock().unwrap(), vec!["abba".to_string()]);
        match rx.recv().await.unwrap() {
            SeedmixEvent::SearchResults { term, results, .. } => {
                assert_eq!(term, "abba");
                assert!(results.is_empty());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_search() {
        let catalog = recording_catalog();
        let debouncer =
            SearchDebouncer::new(catalog.clone(), EventBus::new(4), Duration::from_millis(300));

        let handle = debouncer.schedule("abba");
        debouncer.cancel();
        handle.await.unwrap();

        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_term_does_not_search() {
        let catalog = recording_catalog();
        let debouncer =
            SearchDebouncer::new(catalog.clone(), EventBus::new(4), Duration::from_millis(300));

        debouncer.schedule("   ").await.unwrap();
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }
}
