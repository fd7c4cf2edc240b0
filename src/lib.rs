pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod gemini;
pub mod models;
pub mod prompt;
pub mod roadmap;
pub mod services;
pub mod state;
pub mod wizard;
