// handlers/protected/auth/mod.rs - Session endpoints for signed-in users

pub mod me;
pub mod refresh;

pub use me::me_get;
pub use refresh::refresh_post;
