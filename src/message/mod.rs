//! Visitor messages: claims and spam reports about items, and contact
//! messages for the moderators.

pub mod error;
pub mod notify;
pub mod relay;
pub mod types;

pub use error::MessageError;
pub use notify::{recipient_for, LogNotifier, Notifier, NotifyError};
pub use relay::MessageRelay;
pub use types::{Message, NewMessage, Recipient};
