use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

use crate::core::{Favorites, SearchHistory};
use crate::models::SearchHistoryEntry;
use crate::services::cache::{CacheError, CacheKey, CacheManager};

/// Idle session locks kept before the map is swept
const LOCK_SWEEP_THRESHOLD: usize = 1_024;

/// Per-session history and favorites kept in the cache tier
///
/// History is stored as the raw JSON array so unreadable payloads can be
/// discarded instead of failing the request. Every read-modify-write of a
/// session runs under that session's lock, so concurrent requests in this
/// process never drop each other's writes.
#[derive(Clone)]
pub struct SessionStore {
    cache: Arc<CacheManager>,
    history_capacity: usize,
    locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl SessionStore {
    pub fn new(cache: Arc<CacheManager>, history_capacity: usize) -> Self {
        Self {
            cache,
            history_capacity,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn lock_session(&self, session_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            if locks.len() >= LOCK_SWEEP_THRESHOLD {
                // Drop locks nobody holds or waits on
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }

    pub async fn load_history(&self, session_id: &str) -> Result<SearchHistory, CacheError> {
        let raw: Option<serde_json::Value> =
            self.cache.get_optional(&CacheKey::history(session_id)).await?;

        Ok(match raw {
            Some(value) => SearchHistory::from_json(&value.to_string(), self.history_capacity),
            None => SearchHistory::new(self.history_capacity),
        })
    }

    pub async fn save_history(
        &self,
        session_id: &str,
        history: &SearchHistory,
    ) -> Result<(), CacheError> {
        self.cache
            .set(&CacheKey::history(session_id), &history.entries())
            .await
    }

    /// Load, push `entry` to the front, save
    pub async fn record_search(
        &self,
        session_id: &str,
        entry: SearchHistoryEntry,
    ) -> Result<SearchHistory, CacheError> {
        self.record_search_if(session_id, entry, || true)
            .await
            .map(|history| history.unwrap_or_else(|| SearchHistory::new(self.history_capacity)))
    }

    /// Like `record_search`, but `accept` decides under the session lock
    /// whether the entry is written at all
    ///
    /// Returns `None` when `accept` says no.
    pub async fn record_search_if<F>(
        &self,
        session_id: &str,
        entry: SearchHistoryEntry,
        accept: F,
    ) -> Result<Option<SearchHistory>, CacheError>
    where
        F: FnOnce() -> bool,
    {
        let _guard = self.lock_session(session_id).await;
        if !accept() {
            return Ok(None);
        }

        let mut history = self.load_history(session_id).await?;
        history.record(entry);
        self.save_history(session_id, &history).await?;

        tracing::debug!(
            "Session {} now has {} remembered searches",
            session_id,
            history.len()
        );

        Ok(Some(history))
    }

    pub async fn load_favorites(&self, session_id: &str) -> Result<Favorites, CacheError> {
        Ok(self
            .cache
            .get_optional(&CacheKey::favorites(session_id))
            .await?
            .unwrap_or_default())
    }

    /// Flip one listing; returns the updated set and its new membership
    pub async fn toggle_favorite(
        &self,
        session_id: &str,
        listing_id: &str,
    ) -> Result<(Favorites, bool), CacheError> {
        let _guard = self.lock_session(session_id).await;
        let mut favorites = self.load_favorites(session_id).await?;
        let favorited = favorites.toggle(listing_id);
        self.cache
            .set(&CacheKey::favorites(session_id), &favorites)
            .await?;
        Ok((favorites, favorited))
    }
}
