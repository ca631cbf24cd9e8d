//! `intro <name>`: resolve a peer and probe its introduction endpoint.

use anyhow::{Context, Result};

use rendezvous_core::config::PeerConfig;
use rendezvous_peer::{introduce, intro_target, SignalingClient};

pub async fn cmd_intro(client: &SignalingClient, config: &PeerConfig, peer_name: &str) -> Result<()> {
    let found = client.find(peer_name).await?;
    let target = intro_target(&found.address, config.intro_port)
        .with_context(|| format!("registry returned an unusable address `{}`", found.address))?;

    println!("Introducing myself to {} at {}...", found.display_name, target);

    let intro = introduce(target, &config.display_name, config.request_timeout()).await?;
    println!(
        "✓ {} answered from {} in {:.1} ms",
        intro.responder,
        intro.address,
        intro.round_trip.as_secs_f64() * 1000.0
    );

    Ok(())
}
