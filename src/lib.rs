// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod app;
pub mod auth;
pub mod config;
pub mod cors;
pub mod grpc_logging;
pub mod item;
pub mod logging;
pub mod message;
pub mod metrics;
pub mod moderation;
pub mod persistence;
pub mod server;

// Re-export commonly used types
pub use auth::{token_digest, AdminAuthorizer, AuthError};
pub use config::{load_config, ConfigError, DaemonConfig};
pub use item::{
    Item, ItemError, ItemFilter, ItemPage, ItemStats, ItemStatus, ItemStore, ItemType, NewItem,
};
pub use message::{LogNotifier, Message, MessageError, MessageRelay, NewMessage, Notifier};
pub use moderation::ModerationQueue;
pub use persistence::SnapshotError;
pub use server::LostFoundService;
