// Dashboard: per-user summary over rank, backlink and content records.

pub mod handlers;
pub mod summary;
