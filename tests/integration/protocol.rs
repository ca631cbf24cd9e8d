use crate::*;

async fn error_kind(resp: reqwest::Response) -> Result<String> {
    let body: serde_json::Value = resp.json().await?;
    Ok(body["error"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn test_wrong_verb_is_unsupported_method() -> Result<()> {
    let server = TestServer::start(true).await?;
    let http = reqwest::Client::new();

    let resp = http.post(server.url("/signaling/status")).send().await?;
    assert_eq!(resp.status().as_u16(), 405);
    assert_eq!(error_kind(resp).await?, "unsupported_method");

    let resp = http.get(server.url("/signaling/clients/ready")).send().await?;
    assert_eq!(resp.status().as_u16(), 405);
    assert_eq!(error_kind(resp).await?, "unsupported_method");

    let resp = http.get(server.url("/debug/reset")).send().await?;
    assert_eq!(resp.status().as_u16(), 405);

    server.stop().await
}

#[tokio::test]
async fn test_undecodable_body_is_malformed() -> Result<()> {
    let server = TestServer::start(false).await?;
    let http = reqwest::Client::new();

    let resp = http
        .post(server.url("/signaling/clients/ready"))
        .body("{displayName: nope")
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(error_kind(resp).await?, "malformed_request");

    let resp = http
        .post(server.url("/signaling/clients/find"))
        .json(&serde_json::json!({ "displayName": "wrong field" }))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(error_kind(resp).await?, "malformed_request");

    server.stop().await
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() -> Result<()> {
    let server = TestServer::start(false).await?;

    let resp = reqwest::Client::new()
        .post(server.url("/signaling/clients/ready"))
        .body(r#"{"displayName":"plain"}"#)
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 200);

    server.stop().await
}

#[tokio::test]
async fn test_empty_name_is_malformed() -> Result<()> {
    let server = TestServer::start(false).await?;
    let http = reqwest::Client::new();

    let resp = http
        .post(server.url("/signaling/clients/ready"))
        .json(&serde_json::json!({ "displayName": "" }))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(error_kind(resp).await?, "malformed_request");
    assert_eq!(server.registry.snapshot().peers_online, 0);

    server.stop().await
}

#[tokio::test]
async fn test_debug_routes_absent_by_default() -> Result<()> {
    let server = TestServer::start(false).await?;
    server.client().ready("alice").await?;

    let resp = reqwest::Client::new()
        .post(server.url("/debug/reset"))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 404);
    assert_eq!(server.registry.snapshot().peers_online, 1);

    server.stop().await
}

#[tokio::test]
async fn test_reset_returns_no_content() -> Result<()> {
    let server = TestServer::start(true).await?;

    let resp = reqwest::Client::new()
        .post(server.url("/debug/reset"))
        .send()
        .await?;
    assert_eq!(resp.status().as_u16(), 204);

    server.stop().await
}
