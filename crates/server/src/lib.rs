pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod manifest;
pub mod routes;
pub mod state;
