use crate::item::{ItemError, ItemStore};
use crate::server::convert::item_to_proto;
use crate::server::proto::{GetItemRequest, GetItemResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

/// Fetch one item. Non-admin callers only see approved items; anything else
/// is reported as not found so hidden submissions do not leak.
pub async fn get_item(
    items: &ItemStore,
    req: GetItemRequest,
    admin: bool,
) -> Result<Response<GetItemResponse>, Status> {
    let result = match items.get(req.id.trim()).await {
        Ok(item) if admin || item.is_public() => Ok(item),
        Ok(item) => Err(ItemError::not_found(item.id)),
        Err(e) => Err(e),
    };

    match result {
        Ok(item) => Ok(Response::new(GetItemResponse {
            success: true,
            error: String::new(),
            item: Some(item_to_proto(&item)),
        })),
        Err(e) => Ok(Response::new(GetItemResponse {
            success: false,
            error: to_error_json(&e),
            item: None,
        })),
    }
}
