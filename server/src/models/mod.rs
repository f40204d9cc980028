pub mod activity;
pub mod event;
pub mod feedback;
pub mod gallery;
pub mod material;
pub mod registration;
pub mod user;

pub use activity::ActivityLog;
pub use event::{Event, EventForm};
pub use feedback::{Feedback, FeedbackForm};
pub use gallery::GalleryPhoto;
pub use material::{Material, MaterialForm};
pub use registration::{EventRegistration, RegistrationForm};
pub use user::{LoginForm, User};
