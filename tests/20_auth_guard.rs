//! Boundary checks that need no database: the JWT middleware must reject
//! unauthenticated requests before any handler runs, and request validation
//! must fire before persistence is touched.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();

    for path in [
        "/api/auth/whoami",
        "/api/condominiums",
        "/api/users",
    ] {
        let res = client
            .get(format!("{}{}", server.base_url, path))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "path: {}", path);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED", "path: {}", path);
    }
    Ok(())
}

#[tokio::test]
async fn malformed_bearer_token_is_rejected() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/condominiums", server.base_url))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/condominiums", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn mutating_protected_routes_are_also_guarded() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/condominiums", server.base_url))
        .json(&json!({ "name": "Residencial Sem Token" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_validates_before_touching_storage() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();

    // Missing name
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "name": "", "email": "a@b.com", "password": "long enough" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Malformed email
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "name": "Ana", "email": "nope", "password": "long enough" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Short password
    let res = client
        .post(format!("{}/auth/register", server.base_url))
        .json(&json!({ "name": "Ana", "email": "ana@example.com", "password": "short" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn token_endpoints_validate_their_input() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/verify", server.base_url))
        .json(&json!({ "token": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/auth/google/callback", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
