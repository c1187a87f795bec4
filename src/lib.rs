// Library exports for bloglet
// This allows integration tests and the binary to share the same modules

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod forms;
pub mod mail;
pub mod pagination;
pub mod routes;
pub mod state;
