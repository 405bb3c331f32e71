//! Credential issuing and verification: signed tokens, password hashes, and
//! how a token travels with a request.

pub mod password;
pub mod token;
pub mod transport;

pub use password::{hash_password, hash_password_blocking, verify_password, verify_password_blocking, PasswordError};
pub use token::{issue_token, issue_token_at, verify_token, Claims, TokenError};
pub use transport::{clear_session_cookie, extract_token, session_cookie};
