pub mod application_workflow;
pub mod error;
pub mod notification_service;
pub mod policy;
pub mod verification_workflow;

#[cfg(test)]
mod tests;
