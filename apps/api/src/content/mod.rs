// Content engine: AI article generation, SEO translation, and the content
// records the dashboard lists and edits.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod translator;
