// ABOUTME: End-to-end route tests driving the axum router directly
// ABOUTME: Covers registration, login, auth middleware, and admin approval over HTTP

use anyhow::Result;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use onboarding_service::{
    auth::AuthManager,
    config::environment::{
        AuthConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, SecurityConfig,
        ServerConfig,
    },
    context::ServerResources,
    database::Database,
    models::{role_names, RequestType},
    routes,
};

const TEST_JWT_SECRET: &str = "routes-test-jwt-secret";

async fn setup_app(name: &str) -> Result<(Router, Arc<ServerResources>)> {
    std::fs::create_dir_all("./test_data")?;
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
    let db_url = format!("sqlite:./test_data/{name}_{nanos}.db");

    let database = Database::new(&db_url).await?;
    let auth_manager = AuthManager::new(TEST_JWT_SECRET.as_bytes().to_vec(), 24);
    let config = ServerConfig {
        http_port: 0,
        log_level: LogLevel::Info,
        database: DatabaseConfig {
            url: DatabaseUrl::parse_url(&db_url),
        },
        auth: AuthConfig {
            jwt_secret: TEST_JWT_SECRET.to_string(),
            jwt_expiry_hours: 24,
        },
        security: SecurityConfig {
            cors_origins: vec!["*".to_string()],
            environment: Environment::Testing,
        },
    };

    let resources = Arc::new(ServerResources::new(database, auth_manager, config));
    let app = routes::build_router(resources.clone());
    Ok((app, resources))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request")
}

async fn response_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn register_and_login(app: &Router, email: &str) -> Result<(i64, String)> {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({
                "email": email,
                "password": "longenoughpassword",
                "name": "Route",
                "surname": "Tester"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await?;
    let user_id = body["user_id"].as_i64().expect("user_id in response");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            json!({ "email": email, "password": "longenoughpassword" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await?;
    let token = body["jwt_token"].as_str().expect("token in response");

    Ok((user_id, token.to_string()))
}

#[tokio::test]
async fn test_health_endpoints() -> Result<()> {
    let (app, _resources) = setup_app("health").await?;

    for uri in ["/health", "/ready"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    Ok(())
}

#[tokio::test]
async fn test_register_login_flow() -> Result<()> {
    let (app, _resources) = setup_app("register_login").await?;

    let (_user_id, token) = register_and_login(&app, "flow@test.com").await?;
    assert!(!token.is_empty());

    // Duplicate registration is a conflict
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({
                "email": "flow@test.com",
                "password": "longenoughpassword",
                "name": "Route",
                "surname": "Tester"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Bad password is a 401
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/login",
            json!({ "email": "flow@test.com", "password": "not the password" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_register_stores_department_but_never_role() -> Result<()> {
    let (app, resources) = setup_app("register_department").await?;

    let department_id = resources.database.create_department("Intake", None).await?;
    let admin_role = resources
        .database
        .get_role_by_name(role_names::ADMIN)
        .await?
        .expect("admin role seeded");

    // A role_id in the payload must not grant a role
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({
                "email": "dept@test.com",
                "password": "longenoughpassword",
                "name": "Dep",
                "surname": "Artment",
                "department_id": department_id,
                "role_id": admin_role.id
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await?;
    let user_id = body["user_id"].as_i64().expect("user_id in response");

    let user = resources
        .database
        .get_user(user_id)
        .await?
        .expect("user exists");
    assert_eq!(user.department_id, Some(department_id));
    assert!(user.role_id.is_none());

    Ok(())
}

#[tokio::test]
async fn test_short_password_rejected() -> Result<()> {
    let (app, _resources) = setup_app("short_password").await?;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({
                "email": "short@test.com",
                "password": "short",
                "name": "A",
                "surname": "B"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_protected_routes_require_token() -> Result<()> {
    let (app, _resources) = setup_app("requires_token").await?;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/v1/roles").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/roles")
                .header("authorization", "Bearer not-a-real-token")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_expired_token_is_forbidden() -> Result<()> {
    let (app, resources) = setup_app("expired_token").await?;

    let (user_id, _token) = register_and_login(&app, "expired@test.com").await?;
    let user = resources
        .database
        .get_user(user_id)
        .await?
        .expect("user exists");

    // Same secret, negative expiry: the token is already expired
    let expired_token =
        AuthManager::new(TEST_JWT_SECRET.as_bytes().to_vec(), -1).generate_token(&user)?;

    let response = app
        .oneshot(authed_request("GET", "/api/v1/roles", &expired_token, None))
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = response_json(response).await?;
    assert_eq!(body["error"]["code"], json!("AUTH_EXPIRED"));

    Ok(())
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() -> Result<()> {
    let (app, _resources) = setup_app("admin_guard").await?;

    let (_user_id, token) = register_and_login(&app, "plain@test.com").await?;

    let response = app
        .oneshot(authed_request("GET", "/api/v1/admin/requests", &token, None))
        .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

#[tokio::test]
async fn test_admin_approval_over_http() -> Result<()> {
    let (app, resources) = setup_app("admin_approval").await?;

    // An applicant submits an application
    let (applicant_id, applicant_token) =
        register_and_login(&app, "applicant@test.com").await?;

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/applicants/{applicant_id}/application"),
            &applicant_token,
            Some(json!({
                "name": "Route",
                "surname": "Tester",
                "gender": "female",
                "dob": "1990-04-01"
            })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await?;
    let request_id = body["request_id"].as_i64().expect("request_id");

    // Bootstrap an admin directly in the database
    let (admin_id, admin_token) = register_and_login(&app, "admin@test.com").await?;
    let admin_role = resources
        .database
        .get_role_by_name(role_names::ADMIN)
        .await?
        .expect("admin role seeded");
    resources.database.set_user_role(admin_id, admin_role.id).await?;

    // Pending queue is visible to the admin
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            "/api/v1/admin/requests/pending",
            &admin_token,
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let pending = response_json(response).await?;
    assert_eq!(pending.as_array().map(Vec::len), Some(1));

    // Approve it
    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/admin/requests/{request_id}/approve"),
            &admin_token,
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await?;
    assert_eq!(body["success"], json!(true));

    // The applicant now holds the applicant role
    let user = resources
        .database
        .get_user(applicant_id)
        .await?
        .expect("user exists");
    let role = resources
        .database
        .get_role(user.role_id.expect("role assigned"))
        .await?
        .expect("role exists");
    assert_eq!(role.name, role_names::APPLICANT);

    // A second approval attempt conflicts
    let response = app
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/admin/requests/{request_id}/approve"),
            &admin_token,
            None,
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    Ok(())
}

#[tokio::test]
async fn test_reject_over_http_records_notes() -> Result<()> {
    let (app, resources) = setup_app("reject_http").await?;

    let (applicant_id, _token) = register_and_login(&app, "reject@test.com").await?;
    let request_id = resources
        .database
        .create_request(applicant_id, RequestType::Verification)
        .await?;

    let (admin_id, admin_token) = register_and_login(&app, "admin2@test.com").await?;
    let admin_role = resources
        .database
        .get_role_by_name(role_names::ADMIN)
        .await?
        .expect("admin role seeded");
    resources.database.set_user_role(admin_id, admin_role.id).await?;

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/admin/requests/{request_id}/reject"),
            &admin_token,
            Some(json!({ "notes": "Expired document" })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(authed_request(
            "POST",
            &format!("/api/v1/admin/requests/{request_id}/reject-notes"),
            &admin_token,
            Some(json!({ "notes": "Please resubmit with a valid passport" })),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let request = resources
        .database
        .get_request(request_id)
        .await?
        .expect("request exists");
    assert_eq!(
        request.reject_notes.as_deref(),
        Some("Please resubmit with a valid passport")
    );

    Ok(())
}
