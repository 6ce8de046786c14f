//! The message relay: stores visitor messages and routes them onward.

use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::error::MessageError;
use super::notify::{recipient_for, LogNotifier, Notifier};
use super::types::{Message, NewMessage};
use crate::item::validation::{is_valid_email, require, require_email};
use crate::item::{Item, ItemError, ItemStore};
use crate::persistence::{SnapshotFile, MESSAGES_FILENAME};

struct ValidMessage {
    from_name: String,
    from_email: String,
    subject: String,
    body: String,
}

/// Claims and contact messages need a reachable sender and some text;
/// spam reports may be anonymous, but an email given with one still has to
/// look like an email. Contact messages carry no item, so their subject
/// cannot be derived and must be given.
fn validate(input: &NewMessage, item: Option<&Item>) -> Result<ValidMessage, ItemError> {
    let (from_name, from_email, body) = if input.is_spam_report {
        let email = input.from_email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            return Err(ItemError::validation(
                "fromEmail",
                "is not a valid email address",
            ));
        }
        (
            input.from_name.trim().to_string(),
            email.to_string(),
            input.body.trim().to_string(),
        )
    } else {
        (
            require("fromName", &input.from_name)?,
            require_email("fromEmail", &input.from_email)?,
            require("body", &input.body)?,
        )
    };

    let subject = match (input.subject.trim(), item) {
        ("", Some(item)) if input.is_spam_report => format!("Spam report: {}", item.title),
        ("", Some(item)) => format!("Claim: {}", item.title),
        ("", None) => return Err(ItemError::validation("subject", "is required")),
        (s, _) => s.to_string(),
    };

    Ok(ValidMessage {
        from_name,
        from_email,
        subject,
        body,
    })
}

/// Records claim and spam-report messages linked to items, plus contact
/// messages addressed to the moderators.
pub struct MessageRelay {
    items: Arc<ItemStore>,
    messages: RwLock<Vec<Message>>,
    snapshot: Option<SnapshotFile>,
    notifier: Arc<dyn Notifier>,
}

impl MessageRelay {
    /// An in-memory relay over `items` that logs deliveries.
    #[must_use]
    pub fn new(items: Arc<ItemStore>) -> Self {
        Self {
            items,
            messages: RwLock::new(Vec::new()),
            snapshot: None,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// A relay persisted to `data_dir`, loading earlier messages.
    pub async fn open(items: Arc<ItemStore>, data_dir: &Path) -> Result<Self, MessageError> {
        let snapshot = SnapshotFile::new(data_dir, MESSAGES_FILENAME);
        let messages: Vec<Message> = snapshot.load().await?;
        Ok(Self {
            items,
            messages: RwLock::new(messages),
            snapshot: Some(snapshot),
            notifier: Arc::new(LogNotifier),
        })
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Store a message and relay it.
    ///
    /// With an item id the item must exist, otherwise this fails with
    /// `ItemNotFound` and stores nothing. A spam report additionally flags
    /// the item for admin attention. Without an item id the message is a
    /// contact message for the moderators; spam reports always need an item.
    pub async fn send(&self, input: NewMessage) -> Result<Message, MessageError> {
        let item_id = input.item_id.trim();
        let mut item = if item_id.is_empty() {
            if input.is_spam_report {
                return Err(MessageError::ValidationError {
                    field: "itemId",
                    message: "is required".to_string(),
                });
            }
            None
        } else {
            Some(self.items.get(item_id).await?)
        };
        let valid = validate(&input, item.as_ref())?;

        let message = Message {
            id: uuid::Uuid::new_v4().to_string(),
            item_id: item.as_ref().map(|item| item.id.clone()),
            from_name: valid.from_name,
            from_email: valid.from_email,
            subject: valid.subject,
            body: valid.body,
            created_at: Utc::now(),
            is_spam_report: input.is_spam_report,
        };

        {
            let mut messages = self.messages.write().await;
            let flagged = match &item {
                Some(current) if message.is_spam_report => {
                    Some(self.items.flag_spam(&current.id).await?)
                }
                _ => None,
            };
            messages.push(message.clone());
            if let Some(snapshot) = &self.snapshot {
                if let Err(e) = snapshot.save(messages.as_slice()).await {
                    messages.pop();
                    warn!(message_id = %message.id, "Dropped message after snapshot failure: {e}");
                    if let Some(flagged) = &flagged {
                        if let Err(undo) = self.items.unflag_spam(&flagged.id).await {
                            warn!(item_id = %flagged.id, "Could not withdraw spam flag: {undo}");
                        }
                    }
                    return Err(e.into());
                }
            }
            if flagged.is_some() {
                item = flagged;
            }
        }

        info!(
            item_id = message.item_id.as_deref().unwrap_or_default(),
            message_id = %message.id,
            spam_report = message.is_spam_report,
            contact = message.is_contact(),
            "Message stored"
        );

        let recipient = recipient_for(item.as_ref(), &message);
        if let Err(e) = self
            .notifier
            .deliver(&recipient, item.as_ref(), &message)
            .await
        {
            warn!(message_id = %message.id, "{e}");
        }
        Ok(message)
    }

    /// Messages about one item, in the order they were sent.
    pub async fn list_for_item(&self, item_id: &str) -> Vec<Message> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.item_id.as_deref() == Some(item_id))
            .cloned()
            .collect()
    }

    /// Contact messages, in the order they were sent.
    pub async fn list_contact(&self) -> Vec<Message> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.is_contact())
            .cloned()
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemStatus, NewItem};

    async fn store_with_item() -> (Arc<ItemStore>, Item) {
        let store = Arc::new(ItemStore::new());
        let item = store
            .create(NewItem {
                title: "Blue Backpack".to_string(),
                item_type: "Found".to_string(),
                category: "Bag".to_string(),
                description: "Large blue Nike backpack".to_string(),
                location_text: "Gym Locker Room".to_string(),
                date_seen: "2024-01-14".to_string(),
                images: vec![],
                posted_by_name: "Emma Wilson".to_string(),
                posted_by_email: "emma.w@campus.edu".to_string(),
            })
            .await
            .unwrap();
        (store, item)
    }

    #[tokio::test]
    async fn test_claim_defaults_subject() {
        let (store, item) = store_with_item().await;
        let relay = MessageRelay::new(store);
        let msg = relay
            .send(NewMessage::claim(
                &item.id,
                "Jordan",
                "jordan@campus.edu",
                "I think that's mine",
            ))
            .await
            .unwrap();
        assert_eq!(msg.subject, "Claim: Blue Backpack");
        assert!(!msg.is_spam_report);
    }

    #[tokio::test]
    async fn test_explicit_subject_is_kept() {
        let (store, item) = store_with_item().await;
        let relay = MessageRelay::new(store);
        let msg = relay
            .send(
                NewMessage::claim(&item.id, "Jordan", "jordan@campus.edu", "mine")
                    .with_subject("My backpack"),
            )
            .await
            .unwrap();
        assert_eq!(msg.subject, "My backpack");
    }

    #[tokio::test]
    async fn test_claim_requires_sender_fields() {
        let (store, item) = store_with_item().await;
        let relay = MessageRelay::new(store);
        let cases = [
            (NewMessage::claim(&item.id, "", "jordan@campus.edu", "mine"), "fromName"),
            (NewMessage::claim(&item.id, "Jordan", "", "mine"), "fromEmail"),
            (NewMessage::claim(&item.id, "Jordan", "jordan", "mine"), "fromEmail"),
            (NewMessage::claim(&item.id, "Jordan", "jordan@campus.edu", " "), "body"),
        ];
        for (input, field) in cases {
            let err = relay.send(input).await.unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
        assert_eq!(relay.count().await, 0);
    }

    #[tokio::test]
    async fn test_spam_report_may_be_anonymous() {
        let (store, item) = store_with_item().await;
        let relay = MessageRelay::new(store.clone());
        let msg = relay.send(NewMessage::spam_report(&item.id)).await.unwrap();
        assert_eq!(msg.subject, "Spam report: Blue Backpack");
        assert!(msg.from_email.is_empty());

        let flagged = store.get(&item.id).await.unwrap();
        assert_eq!(flagged.spam_reports, 1);
        assert_eq!(flagged.status, ItemStatus::Pending);
    }

    #[tokio::test]
    async fn test_spam_report_with_bad_email_is_rejected() {
        let (store, item) = store_with_item().await;
        let relay = MessageRelay::new(store.clone());
        let mut input = NewMessage::spam_report(&item.id);
        input.from_email = "nope".to_string();
        assert_eq!(relay.send(input).await.unwrap_err().field(), Some("fromEmail"));
        assert_eq!(store.get(&item.id).await.unwrap().spam_reports, 0);
    }

    #[tokio::test]
    async fn test_spam_report_needs_item_id() {
        let (store, _) = store_with_item().await;
        let relay = MessageRelay::new(store);
        let err = relay.send(NewMessage::spam_report("  ")).await.unwrap_err();
        assert_eq!(err.field(), Some("itemId"));
    }

    #[tokio::test]
    async fn test_contact_message_has_no_item() {
        let (store, item) = store_with_item().await;
        let relay = MessageRelay::new(store);
        let msg = relay
            .send(NewMessage::contact(
                "Jordan",
                "jordan@campus.edu",
                "Opening hours",
                "When is the desk staffed?",
            ))
            .await
            .unwrap();
        assert!(msg.is_contact());
        assert_eq!(msg.subject, "Opening hours");
        assert_eq!(relay.list_contact().await, vec![msg]);
        assert!(relay.list_for_item(&item.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_contact_message_requires_all_fields() {
        let (store, _) = store_with_item().await;
        let relay = MessageRelay::new(store);
        let cases = [
            (NewMessage::contact("", "jordan@campus.edu", "Hi", "Hello"), "fromName"),
            (NewMessage::contact("Jordan", "jordan", "Hi", "Hello"), "fromEmail"),
            (NewMessage::contact("Jordan", "jordan@campus.edu", " ", "Hello"), "subject"),
            (NewMessage::contact("Jordan", "jordan@campus.edu", "Hi", ""), "body"),
        ];
        for (input, field) in cases {
            let err = relay.send(input).await.unwrap_err();
            assert_eq!(err.field(), Some(field));
        }
        assert_eq!(relay.count().await, 0);
    }
}
