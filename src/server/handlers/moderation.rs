use crate::item::validation::require;
use crate::item::{Item, ItemError};
use crate::message::MessageRelay;
use crate::moderation::ModerationQueue;
use crate::server::convert::{item_to_proto, stats_to_proto};
use crate::server::helpers::count_u32;
use crate::server::proto::{
    GetModerationStatsResponse, ListItemsResponse, ModerateItemRequest, ModerateItemResponse,
};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

/// Which admin decision a `ModerateItemRequest` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
    Resolve,
}

fn items_response(items: &[Item]) -> Response<ListItemsResponse> {
    Response::new(ListItemsResponse {
        success: true,
        error: String::new(),
        items: items.iter().map(item_to_proto).collect(),
        total_count: count_u32(items.len()),
    })
}

pub async fn list_pending_items(
    queue: &ModerationQueue,
) -> Result<Response<ListItemsResponse>, Status> {
    Ok(items_response(&queue.pending().await))
}

pub async fn list_flagged_items(
    queue: &ModerationQueue,
) -> Result<Response<ListItemsResponse>, Status> {
    Ok(items_response(&queue.flagged().await))
}

async fn decide(
    queue: &ModerationQueue,
    id: &str,
    decision: Decision,
) -> Result<Item, ItemError> {
    let id = require("id", id)?;
    match decision {
        Decision::Approve => queue.approve(&id).await,
        Decision::Reject => queue.reject(&id).await,
        Decision::Resolve => queue.resolve(&id).await,
    }
}

pub async fn moderate_item(
    queue: &ModerationQueue,
    req: ModerateItemRequest,
    decision: Decision,
) -> Result<Response<ModerateItemResponse>, Status> {
    let result = decide(queue, &req.id, decision).await;

    match result {
        Ok(item) => Ok(Response::new(ModerateItemResponse {
            success: true,
            error: String::new(),
            item: Some(item_to_proto(&item)),
        })),
        Err(e) => Ok(Response::new(ModerateItemResponse {
            success: false,
            error: to_error_json(&e),
            item: None,
        })),
    }
}

pub async fn get_moderation_stats(
    queue: &ModerationQueue,
    relay: &MessageRelay,
) -> Result<Response<GetModerationStatsResponse>, Status> {
    let stats = queue.stats().await;
    Ok(Response::new(stats_to_proto(&stats, relay.count().await)))
}
