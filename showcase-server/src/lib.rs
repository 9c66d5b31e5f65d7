pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod registry;
pub mod routes;
pub mod scanner;
pub mod types;
