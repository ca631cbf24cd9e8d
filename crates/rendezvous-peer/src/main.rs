//! rendezvous-peer: register with a signaling server and meet other peers.

use std::path::PathBuf;

use anyhow::{Context, Result};

use rendezvous_core::config::RendezvousConfig;
use rendezvous_peer::SignalingClient;

mod cmd;

fn print_usage() {
    println!("Usage: rendezvous-peer [options] <command>");
    println!();
    println!("Commands:");
    println!("  run            Register and answer introductions until ctrl-c (default)");
    println!("  status         Show signaling server status");
    println!("  find <name>    Look up a peer's address");
    println!("  intro <name>   Look up a peer and probe its introduction endpoint");
    println!("  clients        List online peers (server needs debug routes)");
    println!("  reset          Clear the server registry (server needs debug routes)");
    println!();
    println!("Options:");
    println!("  --config <path>   Config file (default: $RENDEZVOUS_CONFIG or ~/.config/rendezvous/config.toml)");
    println!("  --name <name>     Display name to register under");
    println!("  --url <url>       Signaling server base URL");
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config_path: Option<PathBuf> = None;
    let mut name: Option<String> = None;
    let mut url: Option<String> = None;
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(args.get(i).context("--config requires a value")?.into());
            }
            "--name" => {
                i += 1;
                name = Some(args.get(i).context("--name requires a value")?.clone());
            }
            "--url" => {
                i += 1;
                url = Some(args.get(i).context("--url requires a value")?.clone());
            }
            other => remaining.push(other),
        }
        i += 1;
    }

    let path = config_path.unwrap_or_else(RendezvousConfig::file_path);
    tracing::info!(path = %path.display(), "loading config");
    let mut config = RendezvousConfig::load_from(&path).context("can't load config")?;
    if let Some(name) = name {
        config.peer.display_name = name;
    }
    if let Some(url) = url {
        config.peer.signaling_url = url;
    }
    let peer = config.peer;

    let client = SignalingClient::new(&peer.signaling_url, peer.request_timeout())
        .context("failed to build signaling client")?;

    match remaining.as_slice() {
        ["run"] | []                   => cmd::run::cmd_run(&peer).await,
        ["status"]                     => cmd::signaling::cmd_status(&client).await,
        ["find", name]                 => cmd::signaling::cmd_find(&client, name).await,
        ["intro", name]                => cmd::intro::cmd_intro(&client, &peer, name).await,
        ["clients"]                    => cmd::signaling::cmd_clients(&client).await,
        ["reset"]                      => cmd::signaling::cmd_reset(&client).await,
        ["help"] | ["--help"] | ["-h"] => { print_usage(); Ok(()) }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}
