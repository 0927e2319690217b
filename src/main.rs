// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ispdesk::application::context::{AppContext, Collaborators};
use ispdesk::config::settings::Settings;
use ispdesk::infrastructure::database::connection;
use ispdesk::infrastructure::metrics;
use ispdesk::presentation::routes;
use ispdesk::utils::telemetry;
use ispdesk::workers::manager::WorkerManager;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting ispdesk...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    if settings.metrics.enabled {
        metrics::init_metrics(&settings.metrics.listen_addr);
    }

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Wire services
    let collaborators = Collaborators::from_settings(&settings);
    let ctx = AppContext::new(db, settings.clone(), collaborators)?;

    // 5. Start workers
    let mut worker_manager = WorkerManager::new();
    worker_manager.start_workers(&ctx);
    info!("{} background workers started", worker_manager.len());

    // 6. Start HTTP server
    let app = routes::app(ctx);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker_manager.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => error!("Unable to listen for shutdown signal: {}", err),
    }
}
