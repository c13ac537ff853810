//! Durable, topic-deduplicated bookmark collection.

pub mod error;
pub mod store;

pub use error::{BookmarkError, BookmarkResult};
pub use store::{BookmarkStore, BOOKMARKS_KEY};
