pub mod admin;
pub mod feedback;

pub use admin::AdminSession;
pub use feedback::FeedbackMessage;
