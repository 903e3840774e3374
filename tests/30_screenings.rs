mod common;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use dealdesk_api::auth::{self, Claims};
use dealdesk_api::database::models::UserRole;
use dealdesk_api::database::DatabaseManager;

// Screening list/edit/delete against a running server. Screenings are
// produced by an external pipeline, so the tests seed them straight into
// the table. Requires DEALDESK_TEST_SERVER=1 and DATABASE_URL.

fn bearer(role: UserRole) -> String {
    let claims = Claims::new(Uuid::new_v4(), "tester@example.com".to_string(), role);
    let token = auth::generate_session_token(&claims).expect("session token");
    format!("Bearer {}", token)
}

async fn create_deal(client: &Client, base: &str) -> Result<Uuid> {
    let marker = Uuid::new_v4().simple().to_string();
    let res = client
        .post(format!("{}/api/deals", base))
        .header("authorization", bearer(UserRole::Admin))
        .json(&json!({
            "title": format!("Screened deal {}", marker),
            "dealCaption": format!("Regional logistics carve-out {}", marker),
            "dealType": "ACQUISITION",
            "bitrixId": format!("bx-{}", marker),
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let payload = res.json::<Value>().await?;
    let id = payload["data"]["id"].as_str().expect("deal id");
    Ok(Uuid::parse_str(id)?)
}

async fn delete_deal(client: &Client, base: &str, id: Uuid) -> Result<()> {
    let res = client
        .delete(format!("{}/api/deals/{}", base, id))
        .header("authorization", bearer(UserRole::Admin))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

async fn seed_screening(pool: &PgPool, deal_id: Uuid, title: &str) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO "ai_screenings" ("deal_id", "deal_type", "title", "explanation", "sentiment")
        VALUES ($1, 'ACQUISITION', $2, 'Strong recurring revenue base.', 'POSITIVE')
        RETURNING "id"
        "#,
    )
    .bind(deal_id)
    .bind(title)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

#[tokio::test]
async fn screening_lifecycle() -> Result<()> {
    if !common::enabled() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = Client::new();
    let pool = DatabaseManager::pool().await?;

    let deal_id = create_deal(&client, &server.base_url).await?;
    let first = seed_screening(&pool, deal_id, "Initial pass").await?;
    seed_screening(&pool, deal_id, "Second pass").await?;

    // Any signed-in user can read them
    let res = client
        .get(format!("{}/api/deals/{}/screenings", server.base_url, deal_id))
        .header("authorization", bearer(UserRole::User))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let payload = res.json::<Value>().await?;
    let screenings = payload["data"].as_array().expect("screenings");
    assert_eq!(screenings.len(), 2);
    assert_eq!(screenings[0]["dealId"], json!(deal_id.to_string()));
    assert_eq!(screenings[0]["sentiment"], json!("POSITIVE"));

    // Edit one of them
    let res = client
        .put(format!(
            "{}/api/deals/{}/screenings/{}",
            server.base_url, deal_id, first
        ))
        .header("authorization", bearer(UserRole::User))
        .json(&json!({
            "title": "Initial pass (revised)",
            "explanation": "Customer concentration is worse than it looked.",
            "sentiment": "NEGATIVE",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let edited = res.json::<Value>().await?;
    assert_eq!(edited["data"]["title"], json!("Initial pass (revised)"));
    assert_eq!(edited["data"]["sentiment"], json!("NEGATIVE"));

    // Delete it; the outcome travels inside a 200
    let res = client
        .delete(format!(
            "{}/api/deals/{}/screenings/{}",
            server.base_url, deal_id, first
        ))
        .header("authorization", bearer(UserRole::User))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let outcome = res.json::<Value>().await?;
    assert_eq!(outcome["data"], json!({"type": "success"}));

    // Deleting it again is an error outcome, still at 200
    let res = client
        .delete(format!(
            "{}/api/deals/{}/screenings/{}",
            server.base_url, deal_id, first
        ))
        .header("authorization", bearer(UserRole::User))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let outcome = res.json::<Value>().await?;
    assert_eq!(outcome["data"]["type"], json!("error"));
    assert_eq!(outcome["data"]["message"], json!("Screening not found"));

    // Deal deletion cascades to the remaining screening
    delete_deal(&client, &server.base_url, deal_id).await?;
    let res = client
        .get(format!("{}/api/deals/{}/screenings", server.base_url, deal_id))
        .header("authorization", bearer(UserRole::User))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn screening_mutations_are_scoped_to_their_deal() -> Result<()> {
    if !common::enabled() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = Client::new();
    let pool = DatabaseManager::pool().await?;

    let owner = create_deal(&client, &server.base_url).await?;
    let other = create_deal(&client, &server.base_url).await?;
    let screening = seed_screening(&pool, owner, "Scoped pass").await?;

    // Editing through the wrong deal misses
    let res = client
        .put(format!(
            "{}/api/deals/{}/screenings/{}",
            server.base_url, other, screening
        ))
        .header("authorization", bearer(UserRole::User))
        .json(&json!({
            "title": "Hijacked",
            "explanation": "Should not land.",
            "sentiment": "NEUTRAL",
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // So does deleting, reported as the error outcome
    let res = client
        .delete(format!(
            "{}/api/deals/{}/screenings/{}",
            server.base_url, other, screening
        ))
        .header("authorization", bearer(UserRole::User))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let outcome = res.json::<Value>().await?;
    assert_eq!(outcome["data"]["type"], json!("error"));

    // The screening is still there under its own deal
    let res = client
        .get(format!("{}/api/deals/{}/screenings", server.base_url, owner))
        .header("authorization", bearer(UserRole::User))
        .send()
        .await?;
    let payload = res.json::<Value>().await?;
    assert_eq!(payload["data"].as_array().map(Vec::len), Some(1));

    delete_deal(&client, &server.base_url, owner).await?;
    delete_deal(&client, &server.base_url, other).await?;
    Ok(())
}

#[tokio::test]
async fn screenings_for_unknown_deal_are_not_an_empty_list() -> Result<()> {
    if !common::enabled() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = Client::new();

    let res = client
        .get(format!(
            "{}/api/deals/{}/screenings",
            server.base_url,
            Uuid::new_v4()
        ))
        .header("authorization", bearer(UserRole::User))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], json!("NOT_FOUND"));
    Ok(())
}
