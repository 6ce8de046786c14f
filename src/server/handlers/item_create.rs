use crate::item::{ItemStore, NewItem};
use crate::server::convert::item_to_proto;
use crate::server::proto::{CreateItemRequest, CreateItemResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn create_item(
    items: &ItemStore,
    req: CreateItemRequest,
) -> Result<Response<CreateItemResponse>, Status> {
    let input = NewItem {
        title: req.title,
        item_type: req.item_type,
        category: req.category,
        description: req.description,
        location_text: req.location_text,
        date_seen: req.date_seen,
        images: req.images,
        posted_by_name: req.posted_by_name,
        posted_by_email: req.posted_by_email,
    };

    match items.create(input).await {
        Ok(item) => Ok(Response::new(CreateItemResponse {
            success: true,
            error: String::new(),
            item: Some(item_to_proto(&item)),
        })),
        Err(e) => Ok(Response::new(CreateItemResponse {
            success: false,
            error: to_error_json(&e),
            item: None,
        })),
    }
}
