use crate::*;

use rendezvous_core::{ErrorKind, SignalError};
use rendezvous_peer::ClientError;

fn kind(err: &ClientError) -> Option<ErrorKind> {
    err.signal().map(SignalError::kind)
}

#[tokio::test]
async fn test_ready_then_find() -> Result<()> {
    let server = TestServer::start(false).await?;
    let alice = server.client();
    let bob = server.client();

    let resp = alice.ready("alice").await?;
    assert_eq!(resp.result, "Accepted");

    let found = bob.find("alice").await?;
    assert_eq!(found.display_name, "alice");
    assert!(
        found.address.starts_with("127.0.0.1:"),
        "unexpected address {}",
        found.address
    );
    assert_eq!(server.registry.lookup("alice"), Some(found.address));

    server.stop().await
}

#[tokio::test]
async fn test_name_in_use_from_other_caller() -> Result<()> {
    let server = TestServer::start(false).await?;
    let first = server.client();
    let second = server.client();

    first.ready("x").await?;
    let bound = server.registry.lookup("x").context("x should be registered")?;

    let err = second.ready("x").await.unwrap_err();
    assert_eq!(kind(&err), Some(ErrorKind::NameInUse));
    assert_eq!(server.registry.lookup("x"), Some(bound));

    server.stop().await
}

#[tokio::test]
async fn test_name_in_use_status_code() -> Result<()> {
    let server = TestServer::start(false).await?;
    server.client().ready("x").await?;

    let resp = reqwest::Client::new()
        .post(server.url("/signaling/clients/ready"))
        .json(&serde_json::json!({ "displayName": "x" }))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 409);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["error"], "name_in_use");

    server.stop().await
}

#[tokio::test]
async fn test_ready_again_from_same_caller_is_keep_alive() -> Result<()> {
    let server = TestServer::start(false).await?;
    let alice = server.client();

    alice.ready("x").await?;
    let bound = server.registry.lookup("x").context("x should be registered")?;

    alice.ready("x").await?;
    assert_eq!(server.registry.lookup("x"), Some(bound.clone()));
    assert_eq!(alice.find("x").await?.address, bound);

    server.stop().await
}

#[tokio::test]
async fn test_find_unknown_is_peer_offline() -> Result<()> {
    let server = TestServer::start(false).await?;
    let client = server.client();

    let err = client.find("y").await.unwrap_err();
    assert_eq!(kind(&err), Some(ErrorKind::PeerOffline));

    client.ready("y").await?;
    assert_eq!(client.find("y").await?.display_name, "y");

    server.stop().await
}

#[tokio::test]
async fn test_reset_makes_peers_offline() -> Result<()> {
    let server = TestServer::start(true).await?;
    let client = server.client();

    client.ready("alice").await?;
    client.find("alice").await?;

    client.reset().await?;

    let err = client.find("alice").await.unwrap_err();
    assert_eq!(kind(&err), Some(ErrorKind::PeerOffline));
    assert_eq!(client.status().await?.peers_online, 0);

    server.stop().await
}

#[tokio::test]
async fn test_leave_frees_the_name() -> Result<()> {
    let server = TestServer::start(false).await?;
    let owner = server.client();
    let other = server.client();

    owner.ready("x").await?;

    let err = other.leave("x").await.unwrap_err();
    assert_eq!(kind(&err), Some(ErrorKind::NameInUse));

    assert_eq!(owner.leave("x").await?.result, "Released");
    other.ready("x").await?;

    let err = owner.leave("nobody").await.unwrap_err();
    assert_eq!(kind(&err), Some(ErrorKind::PeerOffline));

    server.stop().await
}

#[tokio::test]
async fn test_concurrent_distinct_registrations() -> Result<()> {
    let server = TestServer::start(true).await?;

    let mut tasks = Vec::new();
    for i in 0..20 {
        let client = server.client();
        tasks.push(tokio::spawn(async move {
            client.ready(&format!("peer-{i}")).await
        }));
    }
    for t in tasks {
        t.await??;
    }

    let clients = server.client().clients().await?;
    assert_eq!(clients.clients.len(), 20);
    for i in 0..20 {
        assert!(server.registry.lookup(&format!("peer-{i}")).is_some());
    }

    server.stop().await
}
