//! Environment-driven configuration.

use std::net::SocketAddr;

use warehouse_observability::LogFormat;

pub const BIND_ADDR_ENV: &str = "WAREHOUSE_BIND_ADDR";
pub const LOG_FORMAT_ENV: &str = "WAREHOUSE_LOG_FORMAT";
pub const SEED_CATEGORIES_ENV: &str = "WAREHOUSE_SEED_CATEGORIES";
pub const SEED_PARTS_ENV: &str = "WAREHOUSE_SEED_PARTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    /// Side categories (each under its own base category) created at start-up.
    pub seed_categories: usize,
    /// Parts (each in its own side category) created at start-up.
    pub seed_parts: usize,
    /// `KEY=value` entries that were set but did not parse.
    pub rejected: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::default(),
            seed_categories: 0,
            seed_parts: 0,
            rejected: Vec::new(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparsable values fall back to
    /// the default and are recorded in `rejected`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let mut rejected = Vec::new();
        Self {
            bind_addr: parse_or(&lookup, BIND_ADDR_ENV, defaults.bind_addr, &mut rejected),
            log_format: parse_or(&lookup, LOG_FORMAT_ENV, defaults.log_format, &mut rejected),
            seed_categories: parse_or(
                &lookup,
                SEED_CATEGORIES_ENV,
                defaults.seed_categories,
                &mut rejected,
            ),
            seed_parts: parse_or(&lookup, SEED_PARTS_ENV, defaults.seed_parts, &mut rejected),
            rejected,
        }
    }

    /// Warn about every rejected variable. Call once tracing is initialised.
    pub fn log_rejected(&self) {
        for entry in &self.rejected {
            tracing::warn!("{entry} is not valid; using the default");
        }
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    rejected: &mut Vec<String>,
) -> T
where
    T: core::str::FromStr,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            rejected.push(format!("{key}={raw:?}"));
            default
        }
    }
}
