// lib.rs
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod panel;
pub mod utils;
