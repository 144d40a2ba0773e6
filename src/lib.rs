pub mod cascade;
pub mod config;
pub mod constants;
pub mod dates;
pub mod document;
pub mod error;
pub mod extractor;
pub mod input;
pub mod logging;
pub mod output;
pub mod types;

// Application use cases and the adapters behind their ports
pub mod app;
pub mod infra;
