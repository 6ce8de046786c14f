use crate::item::ItemStore;
use crate::message::MessageRelay;
use crate::server::convert::message_to_proto;
use crate::server::proto::{ListMessagesRequest, ListMessagesResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn list_messages(
    items: &ItemStore,
    relay: &MessageRelay,
    req: ListMessagesRequest,
) -> Result<Response<ListMessagesResponse>, Status> {
    let item_id = req.item_id.trim();
    if item_id.is_empty() {
        let messages = relay.list_contact().await;
        return Ok(Response::new(ListMessagesResponse {
            success: true,
            error: String::new(),
            messages: messages.iter().map(message_to_proto).collect(),
        }));
    }
    if let Err(e) = items.get(item_id).await {
        return Ok(Response::new(ListMessagesResponse {
            success: false,
            error: to_error_json(&e),
            messages: vec![],
        }));
    }

    let messages = relay.list_for_item(item_id).await;
    Ok(Response::new(ListMessagesResponse {
        success: true,
        error: String::new(),
        messages: messages.iter().map(message_to_proto).collect(),
    }))
}
