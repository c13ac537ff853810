//! Bookmark store backed by the persistent key-value layer.
//!
//! The whole collection is stored as one record, wrapped in the same
//! `{ state, version }` envelope the browser client persists, so both can
//! share a storage file.

use crate::bookmarks::error::BookmarkResult;
use crate::storage::KeyValueStore;
use rk_protocol::bookmark_models::Bookmark;
use rk_protocol::research_models::ResearchResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Storage key of the bookmark collection.
pub const BOOKMARKS_KEY: &str = "bookmarks-storage";

const STORAGE_VERSION: u32 = 0;

/// Entries are `Bookmark` when saving and raw JSON values when loading,
/// so one bad entry cannot take the rest of the collection with it.
#[derive(Serialize, Deserialize, Debug)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct BookmarkState<T> {
    #[serde(default)]
    bookmarks: Vec<T>,
}

#[derive(Serialize, Deserialize, Debug)]
struct PersistedBookmarks<T> {
    state: BookmarkState<T>,
    #[serde(default)]
    version: u32,
}

/// In-memory bookmark collection, saved in full after every mutation.
///
/// Holds at most one bookmark per topic (exact, case-sensitive match).
/// Insertion order is preserved.
pub struct BookmarkStore {
    kv: Arc<dyn KeyValueStore>,
    bookmarks: Vec<Bookmark>,
}

impl BookmarkStore {
    /// Load the collection from `kv`.
    ///
    /// A missing record gives an empty collection. A record that cannot be
    /// read or decoded is logged and also treated as empty; it will be
    /// overwritten by the next save.
    pub async fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let bookmarks = match kv.get(BOOKMARKS_KEY).await {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(bookmarks) => bookmarks,
                Err(e) => {
                    tracing::warn!(
                        key = BOOKMARKS_KEY,
                        error = %e,
                        "Malformed bookmark record, starting empty"
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    key = BOOKMARKS_KEY,
                    error = %e,
                    "Failed to read bookmarks, starting empty"
                );
                Vec::new()
            }
        };

        tracing::debug!(count = bookmarks.len(), "Loaded bookmarks");
        Self { kv, bookmarks }
    }

    pub fn list(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// True iff a bookmark with exactly this topic exists.
    pub fn is_bookmarked(&self, topic: &str) -> bool {
        self.bookmarks.iter().any(|b| b.topic == topic)
    }

    pub fn get_by_topic(&self, topic: &str) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.topic == topic)
    }

    /// Insert `bookmark`, or replace the existing bookmark for its topic.
    ///
    /// A replacement keeps the old entry's position but takes every field
    /// (id, date, score, top paper) from the new bookmark.
    pub async fn add(&mut self, bookmark: Bookmark) -> BookmarkResult<()> {
        match self.bookmarks.iter_mut().find(|b| b.topic == bookmark.topic) {
            Some(existing) => {
                tracing::info!(
                    topic = %bookmark.topic,
                    old_id = %existing.id,
                    new_id = %bookmark.id,
                    "Replacing bookmark"
                );
                *existing = bookmark;
            }
            None => {
                tracing::info!(topic = %bookmark.topic, id = %bookmark.id, "Adding bookmark");
                self.bookmarks.push(bookmark);
            }
        }
        self.save().await
    }

    /// Remove the bookmark with `id`. Returns whether one was removed.
    pub async fn remove(&mut self, id: &str) -> BookmarkResult<bool> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        let removed = self.bookmarks.len() != before;
        if removed {
            tracing::info!(id, "Removed bookmark");
        }
        self.save().await?;
        Ok(removed)
    }

    /// Remove the bookmark for `topic`. Returns whether one was removed.
    pub async fn remove_topic(&mut self, topic: &str) -> BookmarkResult<bool> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.topic != topic);
        let removed = self.bookmarks.len() != before;
        if removed {
            tracing::info!(topic, "Removed bookmark");
        }
        self.save().await?;
        Ok(removed)
    }

    /// Bookmark `result` under `topic`, or un-bookmark the topic if it is
    /// already saved. Returns whether the topic is bookmarked afterwards.
    pub async fn toggle(&mut self, topic: &str, result: &ResearchResult) -> BookmarkResult<bool> {
        if self.is_bookmarked(topic) {
            self.remove_topic(topic).await?;
            Ok(false)
        } else {
            self.add(Bookmark::from_result(topic, result)).await?;
            Ok(true)
        }
    }

    /// Write the full collection to the key-value layer.
    ///
    /// On failure the in-memory collection is left as is.
    pub async fn save(&self) -> BookmarkResult<()> {
        let raw = encode(&self.bookmarks)?;
        if let Err(e) = self.kv.set(BOOKMARKS_KEY, &raw).await {
            tracing::error!(key = BOOKMARKS_KEY, error = %e, "Failed to persist bookmarks");
            return Err(e.into());
        }
        Ok(())
    }
}

fn encode(bookmarks: &[Bookmark]) -> serde_json::Result<String> {
    serde_json::to_string(&PersistedBookmarks {
        state: BookmarkState {
            bookmarks: bookmarks.to_vec(),
        },
        version: STORAGE_VERSION,
    })
}

fn decode(raw: &str) -> serde_json::Result<Vec<Bookmark>> {
    let persisted: PersistedBookmarks<Value> = serde_json::from_str(raw)?;
    let bookmarks = persisted
        .state
        .bookmarks
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(bookmark) => Some(bookmark),
            Err(e) => {
                tracing::warn!(
                    key = BOOKMARKS_KEY,
                    error = %e,
                    "Dropping malformed bookmark entry"
                );
                None
            }
        })
        .collect();
    Ok(bookmarks)
}
