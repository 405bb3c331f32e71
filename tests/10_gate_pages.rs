mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{body_text, expired_token, get, location, token, Auth};
use mentorbridge::types::Role;

#[tokio::test]
async fn anonymous_dashboard_redirects_to_login() -> Result<()> {
    for path in ["/dashboard", "/dashboard/admin", "/dashboard/mentor/sessions", "/dashboard/mentee"] {
        let res = get(path, Auth::None).await?;
        assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&res), Some("/login"), "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn wrong_role_is_sent_to_login() -> Result<()> {
    let mentee = token(Role::Mentee, true);
    let res = get("/dashboard/admin/users", Auth::Bearer(&mentee)).await?;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/login"));

    let admin = token(Role::Admin, true);
    let res = get("/dashboard/mentee", Auth::Cookie(&admin)).await?;
    assert_eq!(location(&res), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn unapproved_mentor_is_held_at_pending_page() -> Result<()> {
    let mentor = token(Role::Mentor, false);

    let res = get("/dashboard/mentor", Auth::Cookie(&mentor)).await?;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/pending-approval"));

    let res = get("/pending-approval", Auth::Cookie(&mentor)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn approved_mentor_sees_dashboard() -> Result<()> {
    let mentor = token(Role::Mentor, true);

    let res = get("/dashboard/mentor", Auth::Cookie(&mentor)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await?;
    assert!(html.contains("Mentor dashboard"));

    let res = get("/dashboard/mentor/requests", Auth::Bearer(&mentor)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await?.contains("<h2>requests</h2>"));
    Ok(())
}

#[tokio::test]
async fn dashboard_root_sends_each_role_home() -> Result<()> {
    for (role, target) in [
        (Role::Admin, "/dashboard/admin"),
        (Role::Mentor, "/dashboard/mentor"),
        (Role::Mentee, "/dashboard/mentee"),
    ] {
        let res = get("/dashboard", Auth::Cookie(&token(role, true))).await?;
        assert_eq!(location(&res), Some(target), "{role}");
    }
    Ok(())
}

#[tokio::test]
async fn login_page_redirects_signed_in_users() -> Result<()> {
    let res = get("/login", Auth::None).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = get("/login", Auth::Cookie(&token(Role::Mentee, true))).await?;
    assert_eq!(res.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&res), Some("/dashboard/mentee"));
    Ok(())
}

#[tokio::test]
async fn expired_credential_counts_as_none() -> Result<()> {
    let stale = expired_token(Role::Mentee);

    let res = get("/dashboard/mentee", Auth::Cookie(&stale)).await?;
    assert_eq!(location(&res), Some("/login"));

    let res = get("/login", Auth::Cookie(&stale)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn foreign_signature_counts_as_none() -> Result<()> {
    let mut other = mentorbridge::config::AppConfig::development().security;
    other.jwt_secret = "some-other-secret".to_string();
    let (forged, _) = mentorbridge::auth::issue_token(&common::user(Role::Admin, true), &other)?;

    let res = get("/dashboard/admin", Auth::Bearer(&forged)).await?;
    assert_eq!(location(&res), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn public_pages_are_open() -> Result<()> {
    for path in ["/", "/register", "/pending-approval"] {
        let res = get(path, Auth::None).await?;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }
    Ok(())
}
