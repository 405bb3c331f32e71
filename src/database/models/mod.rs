pub mod connection;
pub mod message;
pub mod notification;
pub mod profile;
pub mod session;
pub mod stats;
pub mod user;

pub use connection::{Connection, ConnectionView};
pub use message::Message;
pub use notification::Notification;
pub use profile::{MentorSummary, Profile};
pub use session::MentoringSession;
pub use stats::PlatformStats;
pub use user::User;
