//! Delivery of relayed messages.
//!
//! The relay stores a message first and then hands it to a [`Notifier`].
//! Delivery is best-effort: a failing notifier is logged, never surfaced to
//! the visitor who sent the message.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use super::types::{Message, Recipient};
use crate::item::Item;

#[derive(Error, Debug)]
#[error("Notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Decide who should hear about `message`.
///
/// Spam reports and contact-form messages go to the moderators; claims go
/// to whoever posted the item.
#[must_use]
pub fn recipient_for(item: Option<&Item>, message: &Message) -> Recipient {
    match item {
        Some(item) if !message.is_spam_report => Recipient::Poster {
            name: item.posted_by_name.clone(),
            email: item.posted_by_email.clone(),
        },
        _ => Recipient::Admins,
    }
}

/// Collaborator that carries a stored message to its recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// `item` is `None` for contact-form messages.
    async fn deliver(
        &self,
        recipient: &Recipient,
        item: Option<&Item>,
        message: &Message,
    ) -> Result<(), NotifyError>;
}

/// Notifier that records each delivery as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn deliver(
        &self,
        recipient: &Recipient,
        item: Option<&Item>,
        message: &Message,
    ) -> Result<(), NotifyError> {
        match (recipient, item) {
            (Recipient::Poster { name, email }, _) => info!(
                item_id = message.item_id.as_deref().unwrap_or_default(),
                message_id = %message.id,
                poster = %name,
                poster_email = %email,
                subject = %message.subject,
                "Claim message relayed to poster"
            ),
            (Recipient::Admins, Some(item)) => warn!(
                item_id = %item.id,
                message_id = %message.id,
                spam_reports = item.spam_reports,
                "Spam report relayed to admins"
            ),
            (Recipient::Admins, None) => info!(
                message_id = %message.id,
                from = %message.from_name,
                from_email = %message.from_email,
                subject = %message.subject,
                "Contact message relayed to admins"
            ),
        }
        Ok(())
    }
}
