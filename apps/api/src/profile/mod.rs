// Style profile: questionnaire, summary, embedding and archetype reading.

pub mod archetype;
pub mod handlers;
pub mod prompts;
pub mod questionnaire;
pub mod service;
pub mod store;
pub mod summary;
