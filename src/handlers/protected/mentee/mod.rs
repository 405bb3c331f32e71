// handlers/protected/mentee/mod.rs - /api/mentee/*

pub mod connections;
pub mod mentors;
pub mod progress;
pub mod sessions;

pub use connections::{connections_get, connections_post};
pub use mentors::{mentor_get, mentors_get};
pub use progress::progress_get;
pub use sessions::{feedback_put, sessions_get};
