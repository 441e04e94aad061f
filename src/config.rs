use std::net::SocketAddr;

use anyhow::{Context, bail};

/// Minimum length accepted for the cookie signing secret.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub secret_key: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub tmdb_timeout_secs: u64,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 =
            var("PORT").unwrap_or_else(|| "3000".to_string()).parse().context("PORT")?;

        let secret_key = var("APP_SECRET_KEY").context("APP_SECRET_KEY must be set")?;
        if secret_key.len() < MIN_SECRET_LEN {
            bail!("APP_SECRET_KEY must be at least {MIN_SECRET_LEN} bytes long");
        }

        let tmdb_api_key = var("TMDB_API_KEY").context("TMDB_API_KEY must be set")?;
        if tmdb_api_key.trim().is_empty() {
            bail!("TMDB_API_KEY must not be blank");
        }

        let tmdb_base_url =
            var("TMDB_BASE_URL").unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_base_url = var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|| "https://image.tmdb.org/t/p/w500".to_string());

        let tmdb_timeout_secs: u64 =
            var("TMDB_TIMEOUT_SECS").and_then(|s| s.parse().ok()).unwrap_or(30);

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite://movies.db?mode=rwc".to_string());

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            secret_key,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_base_url,
            tmdb_timeout_secs,
            database_url,
        })
    }
}
