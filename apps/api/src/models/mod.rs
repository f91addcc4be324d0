pub mod backlink;
pub mod chat;
pub mod content;
pub mod keyword;
pub mod ranking;
pub mod report;
