// src/config.rs
//! Server configuration, read from the environment (a `.env` file is honored).
//!
//! - `PORT` - listen port (default: 3030)
//! - `ROI_TITLE` / `ROI_DESCRIPTION` - calculator heading and blurb
//! - `ROI_DEFAULT_TARGET_SUBSCRIBERS` - initial subscriber goal (default: 1000)
//! - `ROI_DEFAULT_MONTHLY_PRICE` - initial monthly price (default: 10)
//! - `ROI_DEFAULT_ESTIMATED_VISITORS` - initial traffic estimate (default: 50000)
//! - `ROI_RATE_TABLE_PATH` - JSON rate table replacing the built-in one
//! - `RUST_LOG` - log level, read by `env_logger`

use crate::services::calculator::{Calculator, CalculatorSettings};
use crate::services::rate_tables::RateTable;
use anyhow::{Context, Result};
use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub settings: CalculatorSettings,
    pub rate_table_path: Option<PathBuf>,
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has invalid value {:?}", key, raw)),
        None => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(_) => parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let defaults = CalculatorSettings::default();
        let mut default_input = defaults.default_input;
        default_input.target_subscribers = parse_or(
            &lookup,
            "ROI_DEFAULT_TARGET_SUBSCRIBERS",
            default_input.target_subscribers,
        )?;
        default_input.monthly_price =
            parse_or(&lookup, "ROI_DEFAULT_MONTHLY_PRICE", default_input.monthly_price)?;
        default_input.estimated_visitors = parse_or(
            &lookup,
            "ROI_DEFAULT_ESTIMATED_VISITORS",
            default_input.estimated_visitors,
        )?;
        default_input
            .validate()
            .context("invalid ROI_DEFAULT_* calculator defaults")?;

        let settings = CalculatorSettings {
            title: lookup("ROI_TITLE").unwrap_or(defaults.title),
            description: lookup("ROI_DESCRIPTION").unwrap_or(defaults.description),
            default_input,
        };

        let rate_table_path = lookup("ROI_RATE_TABLE_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(AppConfig {
            port,
            settings,
            rate_table_path,
        })
    }

    pub fn load_rate_table(&self) -> Result<RateTable> {
        match &self.rate_table_path {
            Some(path) => RateTable::from_json_file(path)
                .with_context(|| format!("failed to load rate table from {}", path.display())),
            None => Ok(RateTable::standard()),
        }
    }

    pub fn build_calculator(&self) -> Result<Calculator> {
        Ok(Calculator::new(self.settings.clone(), self.load_rate_table()?))
    }
}
