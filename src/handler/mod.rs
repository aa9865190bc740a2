pub mod applications;
pub mod auth;
pub mod jobs;
pub mod messages;
pub mod notification_handler;
pub mod profiles;
pub mod users;
pub mod verification;
