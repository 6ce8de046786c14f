use crate::metrics::{generate_request_id, OperationTimer};
use tonic::{Request, Response, Status};
use tracing::instrument;

use super::handlers;
use super::handlers::moderation::Decision;
use super::proto::lost_found_server::LostFound;
use super::proto::{
    CreateItemRequest, CreateItemResponse, DaemonInfo, GetDaemonInfoRequest, GetItemRequest,
    GetItemResponse, GetModerationStatsRequest, GetModerationStatsResponse,
    ListFlaggedItemsRequest, ListItemsRequest, ListItemsResponse, ListMessagesRequest,
    ListMessagesResponse, ListPendingItemsRequest, ModerateItemRequest, ModerateItemResponse,
    SendMessageRequest, SendMessageResponse,
};
use super::LostFoundService;

#[tonic::async_trait]
impl LostFound for LostFoundService {
    #[instrument(
        name = "grpc.create_item",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn create_item(
        &self,
        request: Request<CreateItemRequest>,
    ) -> Result<Response<CreateItemResponse>, Status> {
        let _timer = OperationTimer::new("create_item");
        handlers::item_create::create_item(&self.items, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.get_item",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn get_item(
        &self,
        request: Request<GetItemRequest>,
    ) -> Result<Response<GetItemResponse>, Status> {
        let _timer = OperationTimer::new("get_item");
        let admin = self.is_admin(request.metadata());
        handlers::item_read::get_item(&self.items, request.into_inner(), admin).await
    }

    #[instrument(
        name = "grpc.list_items",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn list_items(
        &self,
        request: Request<ListItemsRequest>,
    ) -> Result<Response<ListItemsResponse>, Status> {
        let _timer = OperationTimer::new("list_items");
        let admin = self.is_admin(request.metadata());
        handlers::item_list::list_items(&self.items, request.into_inner(), admin).await
    }

    #[instrument(
        name = "grpc.list_pending_items",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn list_pending_items(
        &self,
        request: Request<ListPendingItemsRequest>,
    ) -> Result<Response<ListItemsResponse>, Status> {
        let _timer = OperationTimer::new("list_pending_items");
        self.require_admin(request.metadata())?;
        handlers::moderation::list_pending_items(&self.moderation).await
    }

    #[instrument(
        name = "grpc.list_flagged_items",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn list_flagged_items(
        &self,
        request: Request<ListFlaggedItemsRequest>,
    ) -> Result<Response<ListItemsResponse>, Status> {
        let _timer = OperationTimer::new("list_flagged_items");
        self.require_admin(request.metadata())?;
        handlers::moderation::list_flagged_items(&self.moderation).await
    }

    #[instrument(
        name = "grpc.approve_item",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn approve_item(
        &self,
        request: Request<ModerateItemRequest>,
    ) -> Result<Response<ModerateItemResponse>, Status> {
        let _timer = OperationTimer::new("approve_item");
        self.require_admin(request.metadata())?;
        handlers::moderation::moderate_item(
            &self.moderation,
            request.into_inner(),
            Decision::Approve,
        )
        .await
    }

    #[instrument(
        name = "grpc.reject_item",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn reject_item(
        &self,
        request: Request<ModerateItemRequest>,
    ) -> Result<Response<ModerateItemResponse>, Status> {
        let _timer = OperationTimer::new("reject_item");
        self.require_admin(request.metadata())?;
        handlers::moderation::moderate_item(
            &self.moderation,
            request.into_inner(),
            Decision::Reject,
        )
        .await
    }

    #[instrument(
        name = "grpc.resolve_item",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn resolve_item(
        &self,
        request: Request<ModerateItemRequest>,
    ) -> Result<Response<ModerateItemResponse>, Status> {
        let _timer = OperationTimer::new("resolve_item");
        self.require_admin(request.metadata())?;
        handlers::moderation::moderate_item(
            &self.moderation,
            request.into_inner(),
            Decision::Resolve,
        )
        .await
    }

    #[instrument(
        name = "grpc.get_moderation_stats",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn get_moderation_stats(
        &self,
        request: Request<GetModerationStatsRequest>,
    ) -> Result<Response<GetModerationStatsResponse>, Status> {
        let _timer = OperationTimer::new("get_moderation_stats");
        self.require_admin(request.metadata())?;
        handlers::moderation::get_moderation_stats(&self.moderation, &self.relay).await
    }

    #[instrument(
        name = "grpc.send_message",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn send_message(
        &self,
        request: Request<SendMessageRequest>,
    ) -> Result<Response<SendMessageResponse>, Status> {
        let _timer = OperationTimer::new("send_message");
        handlers::message_send::send_message(&self.relay, request.into_inner()).await
    }

    #[instrument(
        name = "grpc.list_messages",
        skip(self, request),
        fields(request_id = %generate_request_id())
    )]
    async fn list_messages(
        &self,
        request: Request<ListMessagesRequest>,
    ) -> Result<Response<ListMessagesResponse>, Status> {
        let _timer = OperationTimer::new("list_messages");
        self.require_admin(request.metadata())?;
        handlers::message_list::list_messages(&self.items, &self.relay, request.into_inner())
            .await
    }

    #[instrument(
        name = "grpc.get_daemon_info",
        skip(self, _request),
        fields(request_id = %generate_request_id())
    )]
    async fn get_daemon_info(
        &self,
        _request: Request<GetDaemonInfoRequest>,
    ) -> Result<Response<DaemonInfo>, Status> {
        let _timer = OperationTimer::new("get_daemon_info");
        handlers::daemon::get_daemon_info(self.exe_path.as_deref(), self.items.is_persistent())
    }
}
