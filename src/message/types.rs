use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A claim or spam-report note about an item, or a general contact-form
/// message when `item_id` is unset. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// Weak reference; the item owns nothing here and nothing cascades.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub from_name: String,
    pub from_email: String,
    pub subject: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub is_spam_report: bool,
}

/// Unvalidated message as submitted by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMessage {
    /// Empty for a contact-form message.
    pub item_id: String,
    pub from_name: String,
    pub from_email: String,
    /// Empty means "derive from the item title". Required for contact
    /// messages.
    pub subject: String,
    pub body: String,
    pub is_spam_report: bool,
}

impl Message {
    #[must_use]
    pub fn is_contact(&self) -> bool {
        self.item_id.is_none()
    }
}

impl NewMessage {
    /// A claim from a visitor who believes the item is theirs (or found it).
    #[must_use]
    pub fn claim(
        item_id: impl Into<String>,
        from_name: impl Into<String>,
        from_email: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            from_name: from_name.into(),
            from_email: from_email.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// An anonymous spam report.
    #[must_use]
    pub fn spam_report(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            is_spam_report: true,
            ..Self::default()
        }
    }

    /// A general message to the moderators, not tied to any item.
    #[must_use]
    pub fn contact(
        from_name: impl Into<String>,
        from_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            from_name: from_name.into(),
            from_email: from_email.into(),
            subject: subject.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }
}

/// Who a stored message is relayed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// The person who posted the item.
    Poster { name: String, email: String },
    /// The moderation team.
    Admins,
}
