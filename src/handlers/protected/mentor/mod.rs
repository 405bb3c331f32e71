// handlers/protected/mentor/mod.rs - /api/mentor/* (approved mentors only)

pub mod connections;
pub mod sessions;
pub mod stats;

pub use connections::{connection_put, connections_get};
pub use sessions::{session_put, sessions_get, sessions_post};
pub use stats::stats_get;
