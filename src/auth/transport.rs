use axum::http::{header, HeaderMap, HeaderValue};

use crate::config::SecurityConfig;

/// Token from `Authorization: Bearer`, falling back to the credential cookie
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_value(headers, cookie_name))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Looks through every Cookie header, first match wins
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(token: &str, security: &SecurityConfig) -> Option<HeaderValue> {
    let max_age = security.jwt_expiry_hours.saturating_mul(3600);
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        security.cookie_name, token, max_age
    );
    if security.require_https {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

pub fn clear_session_cookie(security: &SecurityConfig) -> Option<HeaderValue> {
    let mut cookie = format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT",
        security.cookie_name
    );
    if security.require_https {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn bearer_header_wins_over_cookie() {
        let map = headers(&[
            (header::AUTHORIZATION, "Bearer header-token"),
            (header::COOKIE, "mb_token=cookie-token"),
        ]);
        assert_eq!(extract_token(&map, "mb_token").as_deref(), Some("header-token"));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let map = headers(&[(header::COOKIE, "theme=dark; mb_token=abc.def.ghi; lang=en")]);
        assert_eq!(extract_token(&map, "mb_token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(extract_token(&map, "other"), None);
    }

    #[test]
    fn malformed_authorization_is_ignored() {
        let map = headers(&[(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")]);
        assert_eq!(extract_token(&map, "mb_token"), None);

        let map = headers(&[(header::AUTHORIZATION, "Bearer   ")]);
        assert_eq!(extract_token(&map, "mb_token"), None);
    }

    #[test]
    fn empty_cookie_is_absent() {
        let map = headers(&[(header::COOKIE, "mb_token=")]);
        assert_eq!(extract_token(&map, "mb_token"), None);
    }

    #[test]
    fn cookie_attributes_follow_config() {
        let mut security = AppConfig::development().security;
        let value = session_cookie("tok", &security).unwrap();
        let text = value.to_str().unwrap();
        assert!(text.starts_with("mb_token=tok;"));
        assert!(text.contains("HttpOnly"));
        assert!(!text.contains("Secure"));

        security.require_https = true;
        let cleared = clear_session_cookie(&security).unwrap();
        let text = cleared.to_str().unwrap();
        assert!(text.contains("Max-Age=0"));
        assert!(text.ends_with("; Secure"));
    }
}
