use crate::message::{MessageRelay, NewMessage};
use crate::server::convert::message_to_proto;
use crate::server::proto::{SendMessageRequest, SendMessageResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

pub async fn send_message(
    relay: &MessageRelay,
    req: SendMessageRequest,
) -> Result<Response<SendMessageResponse>, Status> {
    let input = NewMessage {
        item_id: req.item_id,
        from_name: req.from_name,
        from_email: req.from_email,
        subject: req.subject,
        body: req.body,
        is_spam_report: req.is_spam_report,
    };

    match relay.send(input).await {
        Ok(message) => Ok(Response::new(SendMessageResponse {
            success: true,
            error: String::new(),
            message: Some(message_to_proto(&message)),
        })),
        Err(e) => Ok(Response::new(SendMessageResponse {
            success: false,
            error: to_error_json(&e),
            message: None,
        })),
    }
}
