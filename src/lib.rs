pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod qr;
pub mod services;
pub mod store;
pub mod templates_structs;
