pub mod api;
pub mod config;
pub mod copper;
pub mod models;
pub mod server;
