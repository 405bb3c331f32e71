mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use common::{body_json, get, request, send, test_app, token, Auth};
use mentorbridge::types::Role;

#[tokio::test]
async fn anonymous_api_calls_are_unauthorized() -> Result<()> {
    for path in ["/api/admin/users", "/api/mentor/stats", "/api/mentee/progress"] {
        let res = get(path, Auth::None).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
        let body = body_json(res).await?;
        assert_eq!(body["error"], true);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn api_denials_are_forbidden_not_redirects() -> Result<()> {
    let cases = [
        (Role::Mentee, true, "/api/admin/stats"),
        (Role::Admin, true, "/api/mentor/stats"),
        (Role::Mentor, true, "/api/mentee/mentors"),
        (Role::Mentor, false, "/api/mentor/connections"),
    ];
    for (role, approved, path) in cases {
        let res = get(path, Auth::Bearer(&token(role, approved))).await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{role} {path}");
        assert!(res.headers().get("location").is_none());
    }
    Ok(())
}

#[tokio::test]
async fn shared_endpoints_require_a_credential() -> Result<()> {
    for path in ["/api/auth/me", "/api/profile", "/api/notifications", "/api/messages"] {
        let res = get(path, Auth::None).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn expired_bearer_is_unauthorized() -> Result<()> {
    let res = get("/api/admin/users", Auth::Bearer(&common::expired_token(Role::Admin))).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn router_reports_wrong_method_and_unknown_paths() -> Result<()> {
    let res = send(test_app(), request(Method::DELETE, "/api/auth/login", Auth::None, None)).await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = get("/api/nothing-here", Auth::None).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn health_reports_unreachable_database() -> Result<()> {
    let res = get("/health", Auth::None).await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(res).await?;
    assert_eq!(body["data"]["status"], "degraded");
    Ok(())
}
