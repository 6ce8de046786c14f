use std::time::Instant;
use tracing::info;

/// Logs how long an RPC took when dropped.
///
/// ```ignore
/// async fn approve_item(&self, request: Request<ModerateItemRequest>) -> Result<Response<ModerateItemResponse>, Status> {
///     let _timer = OperationTimer::new("approve_item");
///     // ...
/// }
/// ```
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
}

impl OperationTimer {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        info!(
            operation = %self.name,
            duration_ms = %self.start.elapsed().as_millis(),
            "Operation completed"
        );
    }
}

/// Short request ID for correlating log lines of one RPC.
#[must_use]
pub fn generate_request_id() -> String {
    let uuid_str = uuid::Uuid::new_v4().simple().to_string();
    uuid_str.get(..8).unwrap_or(&uuid_str).to_string()
}
