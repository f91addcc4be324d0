// SEO chat assistant: multi-turn conversation with per-user history.

pub mod assistant;
pub mod handlers;
pub mod prompts;
