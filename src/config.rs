use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://roadmap.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Server settings read from the environment (and `.env`, loaded in `main`).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self::from_parts(database_url, &bind_addr)
    }

    fn from_parts(database_url: String, bind_addr: &str) -> Result<Self, AppError> {
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR {:?} is invalid: {}", bind_addr, e)))?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
