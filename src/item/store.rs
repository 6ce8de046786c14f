//! The item store: owner of every item record.
//!
//! All mutations run under one write lock, which is also held while the
//! snapshot (if any) is rewritten. Two admins racing on the same item
//! therefore observe the transitions one after the other, and only the first
//! finds the item still `Pending`.

use chrono::Utc;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::error::ItemError;
use super::types::{Item, ItemFilter, ItemPage, ItemStats, ItemStatus, NewItem};
use super::validation::validate_new_item;
use crate::persistence::{SnapshotFile, ITEMS_FILENAME};

#[derive(Debug, Default)]
struct StoreState {
    items: HashMap<String, Item>,
    /// Ids in insertion order; breaks `created_at` ties when sorting.
    order: Vec<String>,
}

impl StoreState {
    fn from_records(records: Vec<Item>) -> Self {
        let mut state = Self::default();
        for item in records {
            state.order.push(item.id.clone());
            state.items.insert(item.id.clone(), item);
        }
        state
    }

    fn records(&self) -> Vec<&Item> {
        self.order.iter().filter_map(|id| self.items.get(id)).collect()
    }

    /// Items matching `keep`, newest first.
    fn newest_first<F>(&self, keep: F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        let mut matched: Vec<(usize, &Item)> = self
            .order
            .iter()
            .enumerate()
            .filter_map(|(seq, id)| self.items.get(id).map(|item| (seq, item)))
            .filter(|(_, item)| keep(item))
            .collect();
        matched.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at.cmp(&a.created_at).then(seq_b.cmp(seq_a))
        });
        matched.into_iter().map(|(_, item)| item.clone()).collect()
    }
}

/// Owned, injectable store of lost & found items.
#[derive(Debug, Default)]
pub struct ItemStore {
    state: RwLock<StoreState>,
    snapshot: Option<SnapshotFile>,
}

impl ItemStore {
    /// An empty store that lives only in memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store persisted to `data_dir`, loading whatever is already there.
    pub async fn open(data_dir: &Path) -> Result<Self, ItemError> {
        let snapshot = SnapshotFile::new(data_dir, ITEMS_FILENAME);
        let records: Vec<Item> = snapshot.load().await?;
        Ok(Self {
            state: RwLock::new(StoreState::from_records(records)),
            snapshot: Some(snapshot),
        })
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.snapshot.is_some()
    }

    async fn persist(&self, state: &StoreState) -> Result<(), ItemError> {
        if let Some(snapshot) = &self.snapshot {
            snapshot.save(state.records().as_slice()).await?;
        }
        Ok(())
    }

    /// Validate a submission and store it as a new `Pending` item.
    pub async fn create(&self, input: NewItem) -> Result<Item, ItemError> {
        let valid = validate_new_item(&input)?;
        let now = Utc::now();
        let item = Item {
            id: uuid::Uuid::new_v4().to_string(),
            title: valid.title,
            item_type: valid.item_type,
            category: valid.category,
            description: valid.description,
            location_text: valid.location_text,
            date_seen: valid.date_seen,
            images: valid.images,
            posted_by_name: valid.posted_by_name,
            posted_by_email: valid.posted_by_email,
            status: ItemStatus::Pending,
            created_at: now,
            updated_at: now,
            spam_reports: 0,
        };

        let mut state = self.state.write().await;
        state.order.push(item.id.clone());
        state.items.insert(item.id.clone(), item.clone());
        if let Err(e) = self.persist(&state).await {
            state.items.remove(&item.id);
            state.order.retain(|id| id != &item.id);
            warn!(item_id = %item.id, "Rolled back item creation: {e}");
            return Err(e);
        }

        info!(
            item_id = %item.id,
            item_type = %item.item_type,
            category = %item.category,
            "Item submitted for moderation"
        );
        Ok(item)
    }

    pub async fn get(&self, id: &str) -> Result<Item, ItemError> {
        self.state
            .read()
            .await
            .items
            .get(id)
            .cloned()
            .ok_or_else(|| ItemError::not_found(id))
    }

    /// Items matching `filter`, newest first, paged by its limit/offset.
    pub async fn list(&self, filter: &ItemFilter) -> ItemPage {
        let matched = self.state.read().await.newest_first(|item| filter.matches(item));
        let total = matched.len();
        let items = matched
            .into_iter()
            .skip(filter.offset.unwrap_or(0))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect();
        ItemPage { items, total }
    }

    /// Items satisfying `keep`, newest first, unpaged.
    pub async fn select<F>(&self, keep: F) -> Vec<Item>
    where
        F: Fn(&Item) -> bool,
    {
        self.state.read().await.newest_first(keep)
    }

    /// Moderation decision on a `Pending` item.
    ///
    /// Only `Approved` and `Rejected` are valid targets, and only from
    /// `Pending`; anything else is an `InvalidTransition`.
    pub async fn set_status(&self, id: &str, new_status: ItemStatus) -> Result<Item, ItemError> {
        match new_status {
            ItemStatus::Approved | ItemStatus::Rejected => {
                self.transition(id, ItemStatus::Pending, new_status).await
            }
            ItemStatus::Pending | ItemStatus::Resolved => {
                let current = self.get(id).await?;
                Err(ItemError::InvalidTransition {
                    id: id.to_string(),
                    from: current.status,
                    to: new_status,
                })
            }
        }
    }

    /// Mark an `Approved` item as returned to its owner.
    pub async fn resolve(&self, id: &str) -> Result<Item, ItemError> {
        self.transition(id, ItemStatus::Approved, ItemStatus::Resolved)
            .await
    }

    async fn transition(
        &self,
        id: &str,
        from: ItemStatus,
        to: ItemStatus,
    ) -> Result<Item, ItemError> {
        let mut state = self.state.write().await;
        let item = state
            .items
            .get_mut(id)
            .ok_or_else(|| ItemError::not_found(id))?;
        if item.status != from {
            return Err(ItemError::InvalidTransition {
                id: id.to_string(),
                from: item.status,
                to,
            });
        }

        let previous = item.clone();
        item.status = to;
        item.updated_at = Utc::now();
        let updated = item.clone();

        if let Err(e) = self.persist(&state).await {
            state.items.insert(previous.id.clone(), previous);
            warn!(item_id = %id, "Rolled back status change: {e}");
            return Err(e);
        }

        info!(item_id = %id, from = %from, to = %to, "Item status changed");
        Ok(updated)
    }

    /// Record a spam report against an item. Its status is left alone.
    pub async fn flag_spam(&self, id: &str) -> Result<Item, ItemError> {
        let mut state = self.state.write().await;
        let item = state
            .items
            .get_mut(id)
            .ok_or_else(|| ItemError::not_found(id))?;
        item.spam_reports = item.spam_reports.saturating_add(1);
        let updated = item.clone();

        if let Err(e) = self.persist(&state).await {
            if let Some(item) = state.items.get_mut(id) {
                item.spam_reports = item.spam_reports.saturating_sub(1);
            }
            warn!(item_id = %id, "Rolled back spam flag: {e}");
            return Err(e);
        }

        warn!(
            item_id = %id,
            spam_reports = updated.spam_reports,
            "Item flagged for admin attention"
        );
        Ok(updated)
    }

    /// Withdraw one spam report, e.g. when the report itself failed to be
    /// recorded. Never drops below zero.
    pub async fn unflag_spam(&self, id: &str) -> Result<Item, ItemError> {
        let mut state = self.state.write().await;
        let item = state
            .items
            .get_mut(id)
            .ok_or_else(|| ItemError::not_found(id))?;
        let previous = item.spam_reports;
        item.spam_reports = previous.saturating_sub(1);
        let updated = item.clone();

        if let Err(e) = self.persist(&state).await {
            if let Some(item) = state.items.get_mut(id) {
                item.spam_reports = previous;
            }
            return Err(e);
        }

        info!(
            item_id = %id,
            spam_reports = updated.spam_reports,
            "Spam report withdrawn"
        );
        Ok(updated)
    }

    pub async fn stats(&self) -> ItemStats {
        let state = self.state.read().await;
        let mut stats = ItemStats::default();
        for item in state.items.values() {
            stats.total = stats.total.saturating_add(1);
            let counter = match item.status {
                ItemStatus::Pending => &mut stats.pending,
                ItemStatus::Approved => &mut stats.approved,
                ItemStatus::Rejected => &mut stats.rejected,
                ItemStatus::Resolved => &mut stats.resolved,
            };
            *counter = counter.saturating_add(1);
            if item.is_flagged() {
                stats.flagged = stats.flagged.saturating_add(1);
            }
        }
        stats
    }
}
