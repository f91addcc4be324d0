// Site audits: SERP snapshots, backlink audits, technical and local SEO
// reports, social-media impact and rank tracking. Each pulls provider data,
// asks the model for a structured reading where needed, and records the result.

pub mod backlinks;
pub mod handlers;
pub mod local;
pub mod prompts;
pub mod rankings;
pub mod social;
pub mod technical;
