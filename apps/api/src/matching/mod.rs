// CV/JD matching: multipart intake, upload drop zone, prompt, completion, response.
// All model calls go through llm_client; nothing here talks to the completion API directly.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod uploads;
