pub mod credential;
pub mod fields;
pub mod gateway;
pub mod links;
pub mod provider;
pub mod tmdb;
pub mod tvdb;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("not found")]
    NotFound,
    #[error("no access token available")]
    MissingToken,
}
