use std::path::Path;

use crate::server::proto::DaemonInfo;
use tonic::{Response, Status};

pub const DAEMON_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn get_daemon_info(
    exe_path: Option<&Path>,
    persistent: bool,
) -> Result<Response<DaemonInfo>, Status> {
    let binary_path = exe_path
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(Response::new(DaemonInfo {
        version: DAEMON_VERSION.to_string(),
        binary_path,
        persistent,
    }))
}
