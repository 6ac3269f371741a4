//! Integration tests for admin roster management.
//!
//! These tests require:
//! - The admin server running (cargo run -p velvet-plum-admin)
//! - Backend credentials in environment (BACKEND_URL, BACKEND_SERVICE_KEY)
//! - An existing admin account (TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD)
//!
//! Run with: cargo test -p velvet-plum-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::Value;
use uuid::Uuid;

/// Base URL for admin API (configurable via environment).
fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Build a client that holds session cookies across requests.
fn cookie_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in with the configured test admin and return the session-bearing client.
async fn authenticated_client() -> Client {
    let client = cookie_client();
    let base_url = admin_base_url();

    let email = std::env::var("TEST_ADMIN_EMAIL").expect("TEST_ADMIN_EMAIL not set");
    let password = std::env::var("TEST_ADMIN_PASSWORD").expect("TEST_ADMIN_PASSWORD not set");

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to log in");

    assert_eq!(resp.status(), StatusCode::OK, "login failed for test admin");
    client
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_health_endpoints() {
    let client = cookie_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach health endpoint");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach readiness endpoint");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Guard Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_roster_requires_session() {
    let client = cookie_client();
    let base_url = admin_base_url();

    // No session cookie at all.
    let resp = client
        .get(format!("{base_url}/admin/users"))
        .send()
        .await
        .expect("Failed to request roster");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .post(format!("{base_url}/admin/users"))
        .form(&[("email", "nobody@example.com")])
        .send()
        .await
        .expect("Failed to post roster grant");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .delete(format!("{base_url}/admin/users/some-id"))
        .send()
        .await
        .expect("Failed to delete roster entry");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server and backend credentials"]
async fn test_non_admin_session_is_forbidden() {
    // A valid session whose user is not on the roster must get 403, not 401.
    let email = match std::env::var("TEST_NON_ADMIN_EMAIL") {
        Ok(email) => email,
        Err(_) => return, // No non-admin account in this environment
    };
    let password = std::env::var("TEST_NON_ADMIN_PASSWORD").expect("TEST_NON_ADMIN_PASSWORD not set");

    let client = cookie_client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to log in as non-admin");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/admin/users"))
        .send()
        .await
        .expect("Failed to request roster");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Roster Lifecycle Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and backend credentials"]
async fn test_roster_list_includes_current_admin() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/admin/users"))
        .send()
        .await
        .expect("Failed to list roster");
    assert_eq!(resp.status(), StatusCode::OK);

    let admins: Vec<Value> = resp.json().await.expect("Failed to parse roster");
    let email = std::env::var("TEST_ADMIN_EMAIL").expect("TEST_ADMIN_EMAIL not set");
    assert!(
        admins
            .iter()
            .any(|a| a.get("email").and_then(Value::as_str) == Some(email.as_str())),
        "current admin should appear in the roster listing"
    );
}

#[tokio::test]
#[ignore = "Requires running admin server and backend credentials"]
async fn test_grant_and_revoke_flow() {
    // Requires a second, non-admin account that the test can grant and revoke.
    let target_email = match std::env::var("TEST_NON_ADMIN_EMAIL") {
        Ok(email) => email,
        Err(_) => return,
    };

    let client = authenticated_client().await;
    let base_url = admin_base_url();

    // Grant
    let resp = client
        .post(format!("{base_url}/admin/users"))
        .form(&[("email", target_email.as_str())])
        .send()
        .await
        .expect("Failed to grant admin");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let entry: Value = resp.json().await.expect("Failed to parse grant response");
    let granted_id = entry
        .get("id")
        .and_then(Value::as_str)
        .expect("grant response missing id")
        .to_string();

    // Granting again must conflict.
    let resp = client
        .post(format!("{base_url}/admin/users"))
        .form(&[("email", target_email.as_str())])
        .send()
        .await
        .expect("Failed to re-grant admin");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // The new admin shows up in the listing.
    let resp = client
        .get(format!("{base_url}/admin/users"))
        .send()
        .await
        .expect("Failed to list roster");
    assert_eq!(resp.status(), StatusCode::OK);
    let admins: Vec<Value> = resp.json().await.expect("Failed to parse roster");
    assert!(
        admins
            .iter()
            .any(|a| a.get("id").and_then(Value::as_str) == Some(granted_id.as_str()))
    );

    // Revoke
    let resp = client
        .delete(format!("{base_url}/admin/users/{granted_id}"))
        .send()
        .await
        .expect("Failed to revoke admin");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Revoking again is idempotent.
    let resp = client
        .delete(format!("{base_url}/admin/users/{granted_id}"))
        .send()
        .await
        .expect("Failed to re-revoke admin");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running admin server and backend credentials"]
async fn test_grant_unknown_email_is_not_found() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/admin/users"))
        .form(&[(
            "email",
            format!("no-such-user-{}@example.com", Uuid::new_v4()),
        )])
        .send()
        .await
        .expect("Failed to post grant");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running admin server and backend credentials"]
async fn test_grant_malformed_email_is_unprocessable() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/admin/users"))
        .form(&[("email", "not-an-email")])
        .send()
        .await
        .expect("Failed to post grant");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and backend credentials"]
async fn test_logout_invalidates_session() {
    let client = authenticated_client().await;
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // The old session cookie no longer grants access.
    let resp = client
        .get(format!("{base_url}/admin/users"))
        .send()
        .await
        .expect("Failed to request roster");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
