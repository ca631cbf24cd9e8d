use crate::*;

use rendezvous_peer::{bootstrap, intro_target, introduce, BootstrapError, Bootstrapped};

async fn start_peer(
    server: &TestServer,
    name: &str,
    shutdown: &broadcast::Sender<()>,
) -> std::result::Result<Bootstrapped, BootstrapError> {
    bootstrap(
        &server.client(),
        name,
        SocketAddr::from(([127, 0, 0, 1], 0)),
        WAIT,
        shutdown.subscribe(),
    )
    .await
}

#[tokio::test]
async fn test_peers_meet_through_the_server() -> Result<()> {
    let server = TestServer::start(false).await?;
    let (shutdown, _) = broadcast::channel::<()>(1);

    let _alice = start_peer(&server, "alice", &shutdown).await?;
    let bob = start_peer(&server, "bob", &shutdown).await?;
    assert_eq!(bob.registry_status.peers_online, 1);

    let found = server.client().find("bob").await?;
    let target = intro_target(&found.address, bob.intro_addr.port())?;

    let intro = introduce(target, "alice", TIMEOUT).await?;
    assert_eq!(intro.responder, "bob");
    assert_eq!(intro.address, bob.intro_addr);

    shutdown.send(())?;
    let stats = tokio::time::timeout(TIMEOUT, bob.endpoint)
        .await
        .context("bob's endpoint did not stop")??;
    assert_eq!(stats.served, 1);

    server.stop().await
}

#[tokio::test]
async fn test_duplicate_name_fails_bootstrap() -> Result<()> {
    let server = TestServer::start(false).await?;
    let (shutdown, _) = broadcast::channel::<()>(1);

    let _first = start_peer(&server, "alice", &shutdown).await?;
    let second = start_peer(&server, "alice", &shutdown).await;
    assert!(
        matches!(second, Err(BootstrapError::Ready { .. })),
        "second bootstrap under a taken name must fail at ready"
    );

    server.stop().await
}

#[tokio::test]
async fn test_introduction_to_absent_endpoint_times_out() -> Result<()> {
    let server = TestServer::start(false).await?;
    let (shutdown, _) = broadcast::channel::<()>(1);

    let bob = start_peer(&server, "bob", &shutdown).await?;
    shutdown.send(())?;
    tokio::time::timeout(TIMEOUT, bob.endpoint)
        .await
        .context("bob's endpoint did not stop")??;

    let result = introduce(bob.intro_addr, "alice", WAIT).await;
    assert!(result.is_err(), "a stopped endpoint must not answer");

    server.stop().await
}
