// Keyword research: intent clustering and per-keyword metrics records.

pub mod clustering;
pub mod handlers;
pub mod prompts;
