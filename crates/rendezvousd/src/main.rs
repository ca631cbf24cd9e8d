//! rendezvousd: Rendezvous signaling server.

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use rendezvous_core::config::RendezvousConfig;
use rendezvous_services::{PeerRegistry, Signaling};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config
    if let Err(e) = RendezvousConfig::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let mut config = RendezvousConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        RendezvousConfig::default()
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                i += 1;
                config.server.port = args
                    .get(i)
                    .context("--port requires a value")?
                    .parse()
                    .context("--port must be a number")?;
            }
            "--debug-routes" => config.server.debug_routes = true,
            other => anyhow::bail!("unknown argument: {other}"),
        }
        i += 1;
    }

    tracing::info!(
        bind = %config.server.bind,
        port = config.server.port,
        "rendezvousd starting"
    );
    if config.server.debug_routes {
        tracing::warn!("debug routes enabled, registry reset is reachable over HTTP");
    }

    // Registry lives exactly as long as the server.
    let registry = PeerRegistry::new();
    let state = rendezvous_api::ApiState {
        signaling: Signaling::new(registry),
    };

    let listener = TcpListener::bind((config.server.bind.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "failed to bind signaling listener on {}:{}",
                config.server.bind, config.server.port
            )
        })?;

    // ── Shutdown channel ─────────────────────────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::broadcast::channel::<()>(1);

    {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown signal received");
            let _ = shutdown.send(());
        });
    }

    rendezvous_api::serve(state, listener, config.server.debug_routes, async move {
        let _ = shutdown_rx.recv().await;
    })
    .await
    .context("signaling server failed")?;

    tracing::info!("all background processes finished, shutting down");
    Ok(())
}
