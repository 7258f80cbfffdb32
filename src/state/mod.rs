/// State management module
///
/// This module handles all application state, including:
/// - The in-memory capture session and the database row (data.rs)
/// - The SQLite record store (store.rs)
/// - The configuration file (config.rs)

pub mod config;
pub mod data;
pub mod store;
