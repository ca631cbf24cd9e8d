//! One-shot signaling commands: status, find, and the debug-only reset/clients.

use anyhow::Result;

use rendezvous_peer::SignalingClient;

pub async fn cmd_status(client: &SignalingClient) -> Result<()> {
    let resp = client.status().await?;

    println!("═══════════════════════════════════════");
    println!("  Rendezvous Signaling Status");
    println!("═══════════════════════════════════════");
    println!("  Server       : {}", client.base_url());
    println!("  Status       : {}", resp.status);
    println!("  Version      : {}", resp.version);
    println!("  Peers online : {}", resp.peers_online);
    println!("  Uptime       : {}s", resp.uptime_secs);

    Ok(())
}

pub async fn cmd_find(client: &SignalingClient, peer_name: &str) -> Result<()> {
    let resp = client.find(peer_name).await?;
    println!("{} is online at {}", resp.display_name, resp.address);
    Ok(())
}

pub async fn cmd_reset(client: &SignalingClient) -> Result<()> {
    client.reset().await?;
    println!("Registry reset.");
    Ok(())
}

pub async fn cmd_clients(client: &SignalingClient) -> Result<()> {
    let resp = client.clients().await?;

    if resp.clients.is_empty() {
        println!("No peers online.");
        return Ok(());
    }

    println!("═══════════════════════════════════════");
    println!("  Online Peers ({})", resp.clients.len());
    println!("═══════════════════════════════════════");
    for c in &resp.clients {
        println!("  {:<24} {}", c.display_name, c.address);
    }

    Ok(())
}
