pub mod auth;
pub mod response;

pub use auth::{access_gate, AuthUser};
pub use response::{ApiJson, ApiResponse, ApiResult};
