// Daily styling: photo description, outfit suggestions and feedback.

pub mod form;
pub mod handlers;
pub mod prompts;
pub mod service;
pub mod store;
pub mod suggestion;
pub mod vision;
