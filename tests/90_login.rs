mod common;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use dealdesk_api::auth;
use dealdesk_api::database::DatabaseManager;

// Full sign-in flow against a running server, using locally minted identity
// tokens (the server's development preset shares the provider secret).
// Requires DEALDESK_TEST_SERVER=1 and DATABASE_URL.

fn identity_token(email: &str) -> String {
    auth::mint_identity_token(email.to_string(), Some("Test User".to_string()), 1)
        .expect("identity token")
}

async fn login(client: &Client, base: &str, token: &str) -> Result<reqwest::Response> {
    Ok(client
        .post(format!("{}/auth/login", base))
        .json(&json!({ "token": token }))
        .send()
        .await?)
}

async fn remove_user(pool: &PgPool, email: &str) -> Result<()> {
    sqlx::query(r#"DELETE FROM "users" WHERE "email" = $1"#)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(())
}

#[tokio::test]
async fn domain_email_is_admitted_with_user_role() -> Result<()> {
    if !common::enabled() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = Client::new();
    let pool = DatabaseManager::pool().await?;

    // Mixed case in, canonical lowercase out
    let suffix = Uuid::new_v4().simple().to_string();
    let raw_email = format!("Tester.{}@Example.COM", suffix);
    let email = raw_email.to_lowercase();

    let res = login(&client, &server.base_url, &identity_token(&raw_email)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["user"]["email"], json!(email));
    assert_eq!(body["data"]["user"]["role"], json!("USER"));
    assert!(body["data"]["expiresIn"].as_i64().unwrap_or(0) > 0);

    // The issued session token is good for the protected surface
    let session = body["data"]["token"].as_str().expect("session token");
    let res = client
        .get(format!("{}/api/auth/whoami", server.base_url))
        .header("authorization", format!("Bearer {}", session))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let whoami = res.json::<Value>().await?;
    assert_eq!(whoami["data"]["email"], json!(email));
    assert_eq!(whoami["data"]["role"], json!("USER"));

    remove_user(&pool, &email).await?;
    Ok(())
}

#[tokio::test]
async fn admin_email_is_admitted_with_admin_role() -> Result<()> {
    if !common::enabled() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = Client::new();
    let pool = DatabaseManager::pool().await?;
    let email = "admin@example.com";

    let res = login(&client, &server.base_url, &identity_token(email)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["user"]["role"], json!("ADMIN"));

    // A manual demotion does not stick; the role is recomputed at sign-in
    sqlx::query(r#"UPDATE "users" SET "role" = 'USER' WHERE "email" = $1"#)
        .bind(email)
        .execute(&pool)
        .await?;
    let res = login(&client, &server.base_url, &identity_token(email)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["user"]["role"], json!("ADMIN"));

    remove_user(&pool, email).await?;
    Ok(())
}

#[tokio::test]
async fn outside_domain_is_denied_without_a_trace() -> Result<()> {
    if !common::enabled() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = Client::new();
    let pool = DatabaseManager::pool().await?;

    let email = format!("outsider.{}@elsewhere.io", Uuid::new_v4().simple());
    let res = login(&client, &server.base_url, &identity_token(&email)).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("Sign-in not permitted"));

    // Denied identities never get a stored account
    let count = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM "users" WHERE "email" = $1"#)
        .bind(&email)
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 0);
    Ok(())
}

#[tokio::test]
async fn blocked_account_is_denied_despite_allowed_domain() -> Result<()> {
    if !common::enabled() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = Client::new();
    let pool = DatabaseManager::pool().await?;

    let email = format!("blocked.{}@example.com", Uuid::new_v4().simple());
    let res = login(&client, &server.base_url, &identity_token(&email)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    sqlx::query(r#"UPDATE "users" SET "is_blocked" = TRUE WHERE "email" = $1"#)
        .bind(&email)
        .execute(&pool)
        .await?;

    // Same generic denial as the allow-list; blocking is not advertised
    let res = login(&client, &server.base_url, &identity_token(&email)).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], json!("Sign-in not permitted"));

    remove_user(&pool, &email).await?;
    Ok(())
}
