// Library exports for the gym console
// This allows testing of internal modules

pub mod api;
pub mod auth;
pub mod commands;
pub mod config;
pub mod context;
pub mod dialogs;
pub mod models;
pub mod storage;
pub mod summary;
pub mod ui;
