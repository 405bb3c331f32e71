pub mod mentors;
pub mod stats;
pub mod users;

pub use mentors::{approval_put, pending_get};
pub use stats::stats_get;
pub use users::{user_delete, users_get};
