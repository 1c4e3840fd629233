//! Thaw Timer - A countdown timer service with pause and freeze interruptions
//!
//! This is the main entry point for the thaw-timer application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use thaw_timer::{
    api::create_router,
    clock::SystemClock,
    config::Config,
    state::AppState,
    tasks::countdown_monitor_task,
    timer::Timer,
    utils::{format_hms_cs, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("thaw_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting thaw-timer server v{}", env!("CARGO_PKG_VERSION"));

    let duration = config.timer_duration()?;
    let tick = config.tick()?;
    let timer = match &config.id {
        Some(id) => Timer::new(id.as_str(), duration)?,
        None => Timer::with_duration(duration)?,
    };

    info!("Configuration: host={}, port={}, timer={} ({}), tick={}ms, auto_defrost={}",
          config.host, config.port, timer.id(), format_hms_cs(duration),
          config.tick_ms, config.auto_defrost);

    // Create application state
    let state = Arc::new(AppState::new(
        timer,
        Arc::new(SystemClock),
        config.port,
        config.host.clone(),
    ));

    // Start the countdown monitor background task
    let monitor_state = Arc::clone(&state);
    let auto_defrost = config.auto_defrost;
    tokio::spawn(async move {
        countdown_monitor_task(monitor_state, tick, auto_defrost).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start   - Start the countdown (optional duration_ms)");
    info!("  POST /timer/pause   - Pause the countdown");
    info!("  POST /timer/resume  - Resume after a pause");
    info!("  POST /timer/freeze  - Freeze for freeze_duration_ms");
    info!("  POST /timer/defrost - End an elapsed freeze");
    info!("  POST /timer/stop    - Stop the countdown");
    info!("  POST /timer/reset   - Reset to the never-started state");
    info!("  GET  /timer         - Current timer status");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
