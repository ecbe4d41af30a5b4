pub mod aggregate;
pub mod config;
pub mod error;
pub mod generate;
pub mod http;
pub mod registry;
pub mod render;
pub mod runtime;
