pub mod error;
pub mod meta;
pub mod request;
pub mod types;
