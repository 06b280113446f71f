pub mod config;
pub mod editor;
pub mod error;
pub mod lists;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
