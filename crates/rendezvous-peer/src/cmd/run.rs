//! `run`: bootstrap, then stay registered and answer introductions until ctrl-c.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use tokio::sync::broadcast;

use rendezvous_core::config::PeerConfig;
use rendezvous_peer::{bootstrap, keepalive, SignalingClient};

pub async fn cmd_run(config: &PeerConfig) -> Result<()> {
    let client = SignalingClient::new(&config.signaling_url, config.request_timeout())
        .context("failed to build signaling client")?;

    let intro_ip: IpAddr = config
        .intro_bind
        .parse()
        .with_context(|| format!("invalid intro_bind address `{}`", config.intro_bind))?;
    let intro_bind = SocketAddr::new(intro_ip, config.intro_port);

    // ── Shutdown channel ─────────────────────────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);

    {
        let shutdown = shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown signal received");
            let _ = shutdown.send(());
        });
    }

    let peer = bootstrap(
        &client,
        &config.display_name,
        intro_bind,
        config.wait_timeout(),
        shutdown_tx.subscribe(),
    )
    .await?;

    let keepalive_task = config.keepalive().map(|every| {
        keepalive::spawn(
            client.clone(),
            peer.display_name.clone(),
            every,
            shutdown_tx.subscribe(),
        )
    });

    println!(
        "All set up! `{}` is answering introductions on {}",
        peer.display_name, peer.intro_addr
    );

    // ── Wait for exit ────────────────────────────────────────────────────────
    let _ = shutdown_rx.recv().await;

    match keepalive::leave_after(&client, keepalive_task, &peer.display_name).await {
        Ok(_) => tracing::info!(name = %peer.display_name, "display name released"),
        Err(e) => tracing::warn!(error = %e, "failed to release display name"),
    }

    let stats = peer.endpoint.await.context("intro endpoint task failed")?;
    tracing::info!(
        served = stats.served,
        dropped = stats.dropped,
        send_failures = stats.send_failures,
        "intro endpoint stopped"
    );

    println!("Bye");
    Ok(())
}
