mod convert;
mod error_mapping;
mod handlers;
mod helpers;
pub mod structured_error;
mod trait_impl;

use std::path::PathBuf;
use std::sync::Arc;

use tonic::metadata::MetadataMap;
use tonic::Status;
use tracing::warn;

use crate::auth::AdminAuthorizer;
use crate::item::ItemStore;
use crate::message::MessageRelay;
use crate::moderation::ModerationQueue;

pub use error_mapping::ToStructuredError;

// Import generated protobuf types
pub mod proto {
    #![allow(clippy::pedantic)]
    #![allow(clippy::all)]
    tonic::include_proto!("lostfound");
}

pub struct LostFoundService {
    items: Arc<ItemStore>,
    moderation: ModerationQueue,
    relay: Arc<MessageRelay>,
    auth: AdminAuthorizer,
    exe_path: Option<PathBuf>,
}

impl LostFoundService {
    #[must_use]
    pub fn new(
        items: Arc<ItemStore>,
        relay: Arc<MessageRelay>,
        auth: AdminAuthorizer,
        exe_path: Option<PathBuf>,
    ) -> Self {
        Self {
            moderation: ModerationQueue::new(items.clone()),
            items,
            relay,
            auth,
            exe_path,
        }
    }

    /// Refuse the call unless it carries a valid admin token.
    fn require_admin(&self, metadata: &MetadataMap) -> Result<(), Status> {
        self.auth.authorize(metadata).map_err(|e| {
            warn!("Admin RPC refused: {e}");
            Status::from(e)
        })
    }

    fn is_admin(&self, metadata: &MetadataMap) -> bool {
        self.auth.is_admin(metadata)
    }
}
