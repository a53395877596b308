use clap::Parser;
use scoreboard_backend::config::Config;
use scoreboard_backend::persistence::{load_state, spawn_writer};
use scoreboard_backend::state::SharedState;
use scoreboard_backend::websocket::{routes::create_router, Coordinator};
use scoreboard_backend::open_store;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How long shutdown waits for the last snapshot to reach the store
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scoreboard_backend=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    let store = open_store(&config).await.map_err(|e| {
        error!(error = %e, "failed to open backing store");
        e
    })?;

    let (state, persistence, writer) = match store {
        Some(store) => {
            let state = load_state(store.as_ref(), &config.state_key, config.require_store).await?;
            let (handle, writer) = spawn_writer(store, config.state_key.clone());
            (state, Some(handle), Some(writer))
        }
        None => (SharedState::new(), None, None),
    };

    let (coordinator, coordinator_task) = Coordinator::spawn(
        state,
        config.scoring_rules(),
        persistence,
        config.queue_capacity,
    );

    let app = create_router(coordinator.clone(), config.static_dir.as_deref());

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received Ctrl+C, shutting down");
        })
        .await?;

    // Stopping the coordinator releases the persistence handle, so the writer
    // stores the newest snapshot and then exits.
    coordinator.shutdown().await;
    let _ = coordinator_task.await;
    if let Some(writer) = writer {
        match tokio::time::timeout(FLUSH_TIMEOUT, writer).await {
            Ok(_) => info!("scoreboard flushed"),
            Err(_) => warn!("timed out flushing scoreboard to the backing store"),
        }
    }

    Ok(())
}
