mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{body_json, request, send, test_app, test_app_with, test_config, token, Auth};
use mentorbridge::types::Role;
use serde_json::json;

#[tokio::test]
async fn admin_self_registration_is_rejected() -> Result<()> {
    let payload = json!({
        "name": "Eve",
        "email": "eve@example.com",
        "password": "long enough password",
        "role": "ADMIN"
    });
    let res = send(test_app(), request(Method::POST, "/api/auth/register", Auth::None, Some(payload))).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["field_errors"]["role"].is_string());
    Ok(())
}

#[tokio::test]
async fn registration_validates_every_field() -> Result<()> {
    let payload = json!({ "name": "", "email": "not-an-email", "password": "x", "role": "mentee" });
    let res = send(test_app(), request(Method::POST, "/api/auth/register", Auth::None, Some(payload))).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = body_json(res).await?;
    for field in ["name", "email", "password"] {
        assert!(body["field_errors"][field].is_string(), "{field}");
    }
    Ok(())
}

#[tokio::test]
async fn registration_can_be_disabled() -> Result<()> {
    let mut config = test_config();
    config.auth.allow_registration = false;
    let payload = json!({ "name": "Ann", "email": "ann@example.com", "password": "password123", "role": "MENTEE" });

    let res = send(test_app_with(config), request(Method::POST, "/api/auth/register", Auth::None, Some(payload))).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))?;
    let res = send(test_app(), req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await?["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let payload = json!({ "email": "  ", "password": "" });
    let res = send(test_app(), request(Method::POST, "/api/auth/login", Auth::None, Some(payload))).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn logout_expires_the_cookie() -> Result<()> {
    let res = send(test_app(), request(Method::POST, "/api/auth/logout", Auth::None, None)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("mb_token=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("HttpOnly"));

    assert_eq!(body_json(res).await?["data"]["redirect_to"], "/login");
    Ok(())
}

#[tokio::test]
async fn oversized_body_is_refused() -> Result<()> {
    let mut config = test_config();
    config.api.max_request_size_bytes = 64;
    let body = json!({ "email": "a@example.com", "password": "p".repeat(200) }).to_string();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))?;
    let res = send(test_app_with(config), req).await?;
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    Ok(())
}

#[tokio::test]
async fn area_handlers_validate_before_querying() -> Result<()> {
    let mentor = token(Role::Mentor, true);
    let res = send(
        test_app(),
        request(
            Method::PUT,
            "/api/mentor/connections/7f9c24e5-1c7a-4d3e-9a52-2b2f1c7b0a11",
            Auth::Bearer(&mentor),
            Some(json!({ "status": "maybe" })),
        ),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mentee = token(Role::Mentee, true);
    let res = send(
        test_app(),
        request(Method::GET, "/api/mentee/sessions?status=bogus", Auth::Bearer(&mentee), None),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        test_app(),
        request(
            Method::POST,
            "/api/mentee/connections",
            Auth::Cookie(&mentee),
            Some(json!({ "mentor_id": "7f9c24e5-1c7a-4d3e-9a52-2b2f1c7b0a11", "message": "x".repeat(1001) })),
        ),
    )
    .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn refresh_surfaces_store_outage_as_server_error() -> Result<()> {
    let mentee = token(Role::Mentee, true);
    let res = send(test_app(), request(Method::POST, "/api/auth/refresh", Auth::Bearer(&mentee), None)).await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(res).await?;
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    Ok(())
}
