use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;
use crate::gate::Credential;
use crate::types::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub approved: bool,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Encode(jsonwebtoken::errors::Error),

    #[error("JWT rejected: {0}")]
    Decode(jsonwebtoken::errors::Error),

    #[error("JWT carries an out-of-range timestamp")]
    InvalidTimestamp,
}

impl Claims {
    pub fn for_user(user: &User, security: &SecurityConfig, now: DateTime<Utc>) -> Self {
        let exp = now + Duration::hours(security.jwt_expiry_hours as i64);
        Self {
            sub: user.id,
            role: user.role,
            approved: user.is_approved,
            iss: security.jwt_issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

impl TryFrom<Claims> for Credential {
    type Error = TokenError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(TokenError::InvalidTimestamp)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::InvalidTimestamp)?;
        Ok(Credential {
            subject_id: claims.sub,
            role: claims.role,
            is_approved: claims.approved,
            issued_at,
            expires_at,
        })
    }
}

/// Sign a credential for `user`, returning the token and what it encodes
pub fn issue_token(user: &User, security: &SecurityConfig) -> Result<(String, Credential), TokenError> {
    issue_token_at(user, security, Utc::now())
}

pub fn issue_token_at(
    user: &User,
    security: &SecurityConfig,
    now: DateTime<Utc>,
) -> Result<(String, Credential), TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let claims = Claims::for_user(user, security, now);
    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    let token = encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(TokenError::Encode)?;

    Ok((token, Credential::try_from(claims)?))
}

/// Verify signature, issuer and expiry. Any failure means "no credential".
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Credential, TokenError> {
    if security.jwt_secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[security.jwt_issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "iat", "iss", "sub"]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(TokenError::Decode)?;
    Credential::try_from(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn user(role: Role, is_approved: bool) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            password_hash: String::new(),
            name: "Someone".to_string(),
            role,
            is_approved,
            created_at: now,
            updated_at: now,
        }
    }

    fn security() -> SecurityConfig {
        AppConfig::development().security
    }

    #[test]
    fn issued_token_verifies_to_same_credential() {
        let user = user(Role::Mentor, false);
        let (token, issued) = issue_token(&user, &security()).unwrap();
        let verified = verify_token(&token, &security()).unwrap();

        assert_eq!(verified, issued);
        assert_eq!(verified.subject_id, user.id);
        assert_eq!(verified.role, Role::Mentor);
        assert!(!verified.is_approved);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued_at = Utc::now() - Duration::hours(24 * 8);
        let (token, credential) = issue_token_at(&user(Role::Admin, true), &security(), issued_at).unwrap();
        assert!(credential.expires_at < Utc::now());
        assert!(matches!(verify_token(&token, &security()), Err(TokenError::Decode(_))));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let mut other = security();
        other.jwt_secret = "another-secret".to_string();
        let (token, _) = issue_token(&user(Role::Mentee, true), &other).unwrap();
        assert!(verify_token(&token, &security()).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let mut other = security();
        other.jwt_issuer = "somebody-else".to_string();
        let (token, _) = issue_token(&user(Role::Mentee, true), &other).unwrap();
        assert!(verify_token(&token, &security()).is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        let now = Utc::now();
        let claims = serde_json::json!({
            "sub": Uuid::new_v4(),
            "role": "SUPERUSER",
            "approved": true,
            "iss": "mentorbridge",
            "iat": now.timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
        });
        let key = EncodingKey::from_secret(security().jwt_secret.as_bytes());
        let token = encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();
        assert!(verify_token(&token, &security()).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(verify_token("not-a-token", &security()).is_err());
        assert!(verify_token("", &security()).is_err());
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let mut broken = security();
        broken.jwt_secret.clear();
        assert!(matches!(
            issue_token(&user(Role::Admin, true), &broken),
            Err(TokenError::InvalidSecret)
        ));
    }
}
