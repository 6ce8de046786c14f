//! The moderation queue: the pending-review view over the item store and
//! the admin decisions taken on it.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::item::{Item, ItemError, ItemStats, ItemStatus, ItemStore};

#[derive(Debug, Clone)]
pub struct ModerationQueue {
    items: Arc<ItemStore>,
}

impl ModerationQueue {
    #[must_use]
    pub fn new(items: Arc<ItemStore>) -> Self {
        Self { items }
    }

    /// Items awaiting review, most recent submission first.
    pub async fn pending(&self) -> Vec<Item> {
        self.items
            .select(|item| item.status == ItemStatus::Pending)
            .await
    }

    pub async fn approve(&self, id: &str) -> Result<Item, ItemError> {
        self.items.set_status(id, ItemStatus::Approved).await
    }

    pub async fn reject(&self, id: &str) -> Result<Item, ItemError> {
        self.items.set_status(id, ItemStatus::Rejected).await
    }

    /// Close out an approved item once it is back with its owner.
    pub async fn resolve(&self, id: &str) -> Result<Item, ItemError> {
        self.items.resolve(id).await
    }

    /// Items with spam reports, most reported first, then newest first.
    pub async fn flagged(&self) -> Vec<Item> {
        let mut flagged = self.items.select(Item::is_flagged).await;
        flagged.sort_by_key(|item| Reverse(item.spam_reports));
        flagged
    }

    pub async fn stats(&self) -> ItemStats {
        self.items.stats().await
    }
}
