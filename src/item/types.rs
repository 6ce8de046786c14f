//! Item records and the filters used to query them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of media references attached to one item.
pub const MAX_IMAGES: usize = 5;

/// Categories offered by the post form, in display order.
pub const CATEGORIES: [&str; 8] = [
    "Phone",
    "Wallet",
    "Keys",
    "ID Card",
    "Books",
    "Bag",
    "Electronics",
    "Other",
];

/// Whether the poster lost the belonging or found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Lost,
    Found,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Lost => write!(f, "Lost"),
            ItemType::Found => write!(f, "Found"),
        }
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lost" => Ok(ItemType::Lost),
            "found" => Ok(ItemType::Found),
            _ => Err(format!("Unknown item type: {s}")),
        }
    }
}

/// Lifecycle stage of an item. Only `Approved` items are publicly visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Pending,
    Approved,
    Rejected,
    Resolved,
}

impl ItemStatus {
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, ItemStatus::Approved)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemStatus::Pending => "Pending",
            ItemStatus::Approved => "Approved",
            ItemStatus::Rejected => "Rejected",
            ItemStatus::Resolved => "Resolved",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ItemStatus::Pending),
            "approved" => Ok(ItemStatus::Approved),
            "rejected" => Ok(ItemStatus::Rejected),
            "resolved" => Ok(ItemStatus::Resolved),
            _ => Err(format!("Unknown item status: {s}")),
        }
    }
}

/// A lost or found belonging report.
///
/// Everything except `status`, `updated_at` and `spam_reports` is fixed at
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: String,
    pub description: String,
    pub location_text: String,
    pub date_seen: NaiveDate,
    #[serde(default)]
    pub images: Vec<String>,
    pub posted_by_name: String,
    pub posted_by_email: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub spam_reports: u32,
}

impl Item {
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.status.is_public()
    }

    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.spam_reports > 0
    }
}

/// Unvalidated submission, as received from the post form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub item_type: String,
    pub category: String,
    pub description: String,
    pub location_text: String,
    /// `YYYY-MM-DD`
    pub date_seen: String,
    pub images: Vec<String>,
    pub posted_by_name: String,
    pub posted_by_email: String,
}

/// Query over the item store. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub status: Option<ItemStatus>,
    pub item_type: Option<ItemType>,
    pub category: Option<String>,
    pub query: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ItemFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Whether `item` satisfies every set constraint (pagination aside).
    ///
    /// Category compares case-insensitively; the free-text query is a
    /// case-insensitive substring match over title and description.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        if self.status.is_some_and(|s| s != item.status) {
            return false;
        }
        if self.item_type.is_some_and(|t| t != item.item_type) {
            return false;
        }
        if let Some(category) = &self.category {
            if !category.trim().eq_ignore_ascii_case(item.category.trim()) {
                return false;
            }
        }
        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let needle = q.to_lowercase();
                item.title.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

/// One page of list results and the number of matches before paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total: usize,
}

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub resolved: usize,
    pub flagged: usize,
}
