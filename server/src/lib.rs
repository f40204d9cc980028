pub mod config;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod upload;
pub mod utils;
pub mod views;
