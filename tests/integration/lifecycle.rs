use crate::*;

use rendezvous_peer::{bootstrap, keepalive, BootstrapError, ClientError};

#[tokio::test]
async fn test_failed_endpoint_bind_releases_the_name() -> Result<()> {
    let server = TestServer::start(false).await?;
    let (shutdown, _) = broadcast::channel::<()>(1);

    // Hold the intro port so the endpoint cannot bind it.
    let busy = std::net::UdpSocket::bind("127.0.0.1:0")?;
    let busy_addr = busy.local_addr()?;

    let result = bootstrap(&server.client(), "alice", busy_addr, WAIT, shutdown.subscribe()).await;
    assert!(
        matches!(result, Err(BootstrapError::Endpoint { .. })),
        "bootstrap should fail at the endpoint step"
    );
    assert_eq!(server.registry.lookup("alice"), None);

    // A restarted peer can take the name again.
    server.client().ready("alice").await?;

    drop(busy);
    server.stop().await
}

#[tokio::test]
async fn test_non_success_status_is_fatal() -> Result<()> {
    let server = TestServer::start(false).await?;
    let (shutdown, _) = broadcast::channel::<()>(1);

    // Right server, wrong path prefix: every route answers 404.
    let client = SignalingClient::new(&server.url("/nowhere"), TIMEOUT)?;
    let result = bootstrap(
        &client,
        "alice",
        SocketAddr::from(([127, 0, 0, 1], 0)),
        WAIT,
        shutdown.subscribe(),
    )
    .await;

    assert!(
        matches!(
            result,
            Err(BootstrapError::Registry {
                source: ClientError::UnexpectedStatus(404),
                ..
            })
        ),
        "a 404 from status must stop bootstrap"
    );
    assert_eq!(server.registry.snapshot().peers_online, 0);

    server.stop().await
}

#[tokio::test]
async fn test_leave_waits_for_in_flight_keep_alive() -> Result<()> {
    let server = TestServer::start(false).await?;
    let (shutdown, _) = broadcast::channel::<()>(1);
    let client = server.client();

    let peer = bootstrap(
        &client,
        "alice",
        SocketAddr::from(([127, 0, 0, 1], 0)),
        WAIT,
        shutdown.subscribe(),
    )
    .await?;

    // Keep-alives back to back, so one is likely in flight at shutdown.
    let task = keepalive::spawn(
        client.clone(),
        "alice".to_string(),
        Duration::from_millis(5),
        shutdown.subscribe(),
    );
    tokio::time::sleep(Duration::from_millis(100)).await;

    shutdown.send(())?;
    let resp = keepalive::leave_after(&client, Some(task), "alice").await?;
    assert_eq!(resp.result, "Released");
    assert_eq!(server.registry.lookup("alice"), None);

    // Nothing re-registers the name afterwards.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(server.registry.lookup("alice"), None);

    tokio::time::timeout(TIMEOUT, peer.endpoint)
        .await
        .context("endpoint did not stop")??;
    server.stop().await
}
