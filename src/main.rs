use clap::Parser;
use color_eyre::eyre::Result;
use lostfound_daemon::app::{report_server_error, Args, FILE_DESCRIPTOR_SET};
use lostfound_daemon::cors::build_cors_layer;
use lostfound_daemon::grpc_logging::GrpcLoggingLayer;
use lostfound_daemon::logging::{
    default_log_dir, init_logging, parse_rotation, set_log_file_path, LogConfig, LOG_FILENAME,
};
use lostfound_daemon::server::proto::lost_found_server::LostFoundServer;
use lostfound_daemon::{AdminAuthorizer, ItemStore, LostFoundService, MessageRelay};
use std::path::PathBuf;
use std::sync::Arc;
use tonic::transport::Server;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let log_dir = args
        .log_dir
        .as_ref()
        .map_or_else(default_log_dir, PathBuf::from);
    let log_file = log_dir.join(LOG_FILENAME);
    set_log_file_path(log_file.to_string_lossy().to_string());

    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };

    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    // A missing config file means defaults; a broken one stops startup.
    let config_path = args.config_path();
    let config = args.load_config().map_err(|e| {
        error!("Failed to load config from {}: {e}", config_path.display());
        e
    })?;

    let auth = AdminAuthorizer::new(&config.admin.token_sha256);
    if !auth.is_enabled() {
        warn!("No admin tokens configured; moderation RPCs are disabled");
    }

    let (items, relay) = match args.data_dir(&config) {
        Some(dir) => {
            info!("Persisting snapshots to {}", dir.display());
            let items = Arc::new(ItemStore::open(&dir).await?);
            let relay = MessageRelay::open(items.clone(), &dir).await?;
            (items, relay)
        }
        None => {
            info!("No data directory configured; items and messages are kept in memory");
            let items = Arc::new(ItemStore::new());
            let relay = MessageRelay::new(items.clone());
            (items, relay)
        }
    };

    let addr = args.addr.parse()?;

    let cors_origins = args.cors_origins();
    info!("CORS origins: {}", cors_origins.join(", "));
    let cors = build_cors_layer(cors_origins);

    let exe_path = std::env::current_exe().ok();
    let service = LostFoundService::new(items, Arc::new(relay), auth, exe_path);

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    info!("Starting Lost & Found daemon on {} (gRPC + gRPC-Web)", addr);

    let server_result = Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(cors)
        .layer(GrpcLoggingLayer)
        .layer(tonic_web::GrpcWebLayer::new())
        .add_service(reflection_service)
        .add_service(LostFoundServer::new(service))
        .serve_with_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for ctrl-c: {e}");
                std::future::pending::<()>().await;
            }
            info!("Received shutdown signal, stopping server...");
        })
        .await;

    if let Err(e) = server_result {
        report_server_error(addr, &log_file, &e);
        return Err(e.into());
    }

    info!("Lost & Found daemon stopped");
    Ok(())
}
