// Library interface for the inspira client (for testing purposes)
pub mod announce;
pub mod api;
pub mod app;
pub mod config;
pub mod feed;
pub mod logging;
pub mod media;
pub mod session;
pub mod storage;
pub mod terminal;
pub mod ui;
