//! Input validation must resolve before any access evaluation: a request
//! that is both malformed and out of scope reports the validation failure,
//! and only a well-formed request can be rejected as forbidden.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use condo_api_rust::auth::{generate_jwt, Claims};
use condo_api_rust::types::{Plan, Role};

fn board_member_token() -> Result<String> {
    let claims = Claims::new(
        Uuid::new_v4(),
        "sindico@example.com".to_string(),
        Role::BoardMember,
        None,
        Some(Uuid::new_v4()),
        Plan::Free,
    );
    Ok(generate_jwt(claims)?)
}

#[tokio::test]
async fn blank_condominium_name_beats_read_only_rejection() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();
    let token = board_member_token()?;

    // A board member may never create a condominium, but the blank name is
    // reported first.
    let res = client
        .post(format!("{}/api/condominiums", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "   " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn well_formed_create_is_still_forbidden_for_board_members() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();
    let token = board_member_token()?;

    let res = client
        .post(format!("{}/api/condominiums", server.base_url))
        .bearer_auth(&token)
        .json(&json!({ "name": "Residencial Aurora" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn user_creation_validates_payload_before_role_check() -> Result<()> {
    let server = common::TestServer::start().await?;
    let client = reqwest::Client::new();
    let token = board_member_token()?;

    // Short password: validation error even though the actor's role would be
    // rejected afterwards.
    let res = client
        .post(format!("{}/api/users", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Rui",
            "email": "rui@example.com",
            "password": "short",
            "role": "operator"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Unknown role value: also a validation error, not forbidden.
    let res = client
        .post(format!("{}/api/users", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Rui",
            "email": "rui@example.com",
            "password": "long enough",
            "role": "manager"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["role"].is_string());
    Ok(())
}
