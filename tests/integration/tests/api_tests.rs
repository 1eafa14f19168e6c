//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (`DATABASE_URL`)
//! - Optionally Redis (`REDIS_URL`); the in-process cache is used otherwise
//!
//! Run with: cargo test -p integration-tests --test api_tests

use gather_service::dto::{
    ActiveGatheringsResponse, AvailableMembersResponse, GatheringResponse, MemberGroupResponse,
    MemberWithGroupResponse, MessageResponse, RegistrationResponse,
};
use integration_tests::*;
use reqwest::StatusCode;
use serde_json::json;

/// Group, two members and a one-place gathering created over HTTP
struct Seeded {
    token: String,
    group: MemberGroupResponse,
    first: MemberWithGroupResponse,
    second: MemberWithGroupResponse,
    gathering: GatheringResponse,
}

async fn seed(server: &TestServer) -> Seeded {
    let token = server.admin_token().await.unwrap();

    let response = server
        .post_auth("/api/member-groups", &token, &group_body())
        .await
        .unwrap();
    let group: MemberGroupResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let mut members = Vec::new();
    for _ in 0..2 {
        let response = server
            .post_auth("/api/members", &token, &member_body(&group.id))
            .await
            .unwrap();
        let member: MemberWithGroupResponse =
            assert_json(response, StatusCode::OK).await.unwrap();
        members.push(member);
    }
    let second = members.pop().unwrap();
    let first = members.pop().unwrap();

    let response = server
        .post_auth("/api/gatherings", &token, &gathering_body(1))
        .await
        .unwrap();
    let gathering: GatheringResponse = assert_json(response, StatusCode::OK).await.unwrap();

    Seeded {
        token,
        group,
        first,
        second,
        gathering,
    }
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_login_with_wrong_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = json!({ "email": TEST_ADMIN_EMAIL, "password": "not-the-password" });
    let response = server.post("/api/auth/login", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/gatherings").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .get_auth("/api/registrations", "not-a-token")
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    for path in [
        "/api/gatherings/active",
        "/api/gatherings/with-registrations",
        "/api/member-groups/active",
    ] {
        let response = server.get(path).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_registration_flow() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let s = seed(&server).await;

    let body = registration_body(&s.first.member.id, &s.gathering.id);
    let response = server.post("/api/registrations", &body).await.unwrap();
    let registration: RegistrationResponse =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(registration.status, "registered");
    assert_eq!(registration.member.group.id, s.group.id);
    assert_eq!(registration.gathering.id, s.gathering.id);

    // Same member again
    let response = server.post("/api/registrations", &body).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Member is already registered for this gathering");

    // The only place is taken
    let body = registration_body(&s.second.member.id, &s.gathering.id);
    let response = server.post("/api/registrations", &body).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Gathering is at full capacity");

    // A full gathering drops out of the public listing
    let response = server.get("/api/gatherings/active").await.unwrap();
    let active: ActiveGatheringsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active
        .gatherings
        .iter()
        .all(|g| g.gathering.id != s.gathering.id));

    // Deleting the registration reopens the place
    let response = server
        .delete_auth(&format!("/api/registrations/{}", registration.id), &s.token)
        .await
        .unwrap();
    let deleted: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.message, "Registration deleted successfully");

    let response = server.post("/api/registrations", &body).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_registration_for_unknown_gathering() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let s = seed(&server).await;

    let body = registration_body(&s.first.member.id, "00000000-0000-0000-0000-000000000000");
    let response = server.post("/api/registrations", &body).await.unwrap();
    let message = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(message, "Gathering not found");
}

#[tokio::test]
async fn test_registration_with_malformed_body() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/api/registrations", &json!({ "memberId": "x" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_available_members() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let s = seed(&server).await;

    let body = registration_body(&s.first.member.id, &s.gathering.id);
    let response = server.post("/api/registrations", &body).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let path = format!(
        "/api/registrations/available-members?groupId={}&gatheringId={}",
        s.group.id, s.gathering.id
    );
    let response = server.get(&path).await.unwrap();
    let available: AvailableMembersResponse =
        assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = available.members.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, [s.second.member.id.as_str()]);

    let path = format!("/api/registrations/available-members?groupId={}", s.group.id);
    let response = server.get(&path).await.unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Missing required parameters");
}

// ============================================================================
// Administration Tests
// ============================================================================

#[tokio::test]
async fn test_group_with_members_conflicts_on_delete() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let s = seed(&server).await;

    let response = server
        .delete_auth(&format!("/api/member-groups/{}", s.group.id), &s.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_invalid_gathering_input() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();

    let response = server
        .post_auth("/api/gatherings", &token, &gathering_body(0))
        .await
        .unwrap();
    let message = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(message, "Capacity must be at least 1");

    let response = server
        .put_auth("/api/gatherings/not-an-id", &token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_gathering_update_and_delete() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let s = seed(&server).await;
    let path = format!("/api/gatherings/{}", s.gathering.id);

    let response = server
        .put_auth(&path, &s.token, &json!({ "capacity": 40, "title": "Renamed" }))
        .await
        .unwrap();
    let updated: GatheringResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.capacity, 40);
    assert_eq!(updated.title, "Renamed");

    let response = server.delete_auth(&path, &s.token).await.unwrap();
    let deleted: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.message, "Gathering deleted successfully");

    let response = server.delete_auth(&path, &s.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_user_administration() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = server.admin_token().await.unwrap();
    let email = format!("staff{}@example.com", unique_suffix());
    let body = json!({ "email": email, "password": "StaffPass123" });

    let response = server.post_auth("/api/users", &token, &body).await.unwrap();
    let created: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(created.get("password").is_none());
    assert!(created.get("passwordHash").is_none());

    let response = server.post_auth("/api/users", &token, &body).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let login = json!({ "email": email, "password": "StaffPass123" });
    let response = server.post("/api/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let id = created["id"].as_str().unwrap();
    let response = server
        .delete_auth(&format!("/api/users/{id}"), &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}
