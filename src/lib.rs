pub mod config;
pub mod conversation;
pub mod core;
pub mod llm;
pub mod logging;
pub mod server;
pub mod sheets;
