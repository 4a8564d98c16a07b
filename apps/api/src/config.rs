use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::prediction::batch::DEFAULT_MAX_CONCURRENT;
use crate::prediction::engine::PredictionWeights;

/// Application configuration loaded from environment variables.
/// Every key has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Worker count for batch analysis.
    pub batch_concurrency: usize,
    pub max_batch_size: usize,
    /// Per-text limit, in characters.
    pub max_text_length: usize,
    /// Industry applied to predictions when the request names none.
    pub default_industry: Option<String>,
    pub prediction_weights_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            batch_concurrency: DEFAULT_MAX_CONCURRENT,
            max_batch_size: 100,
            max_text_length: 50_000,
            default_industry: None,
            prediction_weights_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            batch_concurrency: parse_env("BATCH_CONCURRENCY", defaults.batch_concurrency)?,
            max_batch_size: parse_env("MAX_BATCH_SIZE", defaults.max_batch_size)?,
            max_text_length: parse_env("MAX_TEXT_LENGTH", defaults.max_text_length)?,
            default_industry: optional_env("DEFAULT_INDUSTRY"),
            prediction_weights_path: optional_env("PREDICTION_WEIGHTS_PATH"),
        })
    }

    /// Prediction weights from `PREDICTION_WEIGHTS_PATH`, or the baseline set.
    pub fn load_weights(&self) -> Result<PredictionWeights> {
        match &self.prediction_weights_path {
            Some(path) => read_weights(Path::new(path)),
            None => Ok(PredictionWeights::baseline()),
        }
    }
}

fn read_weights(path: &Path) -> Result<PredictionWeights> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read prediction weights from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid prediction weights JSON in {}", path.display()))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_baseline_weights_without_path() {
        let weights = Config::default().load_weights().unwrap();
        assert_eq!(weights, PredictionWeights::baseline());
    }

    #[test]
    fn test_weights_loaded_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"bias": 0.3, "industryWeights": {{"sales": 0.9}}}}"#).unwrap();

        let config = Config {
            prediction_weights_path: Some(file.path().display().to_string()),
            ..Config::default()
        };
        let weights = config.load_weights().unwrap();
        assert_eq!(weights.bias, 0.3);
        assert_eq!(weights.keyword_density, 0.0);
        assert_eq!(weights.industry_multiplier(Some("sales")), 0.9);
    }

    #[test]
    fn test_malformed_weights_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let config = Config {
            prediction_weights_path: Some(file.path().display().to_string()),
            ..Config::default()
        };
        let err = config.load_weights().unwrap_err();
        assert!(err.to_string().contains("Invalid prediction weights"));
    }

    #[test]
    fn test_missing_weights_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            prediction_weights_path: Some(dir.path().join("absent.json").display().to_string()),
            ..Config::default()
        };
        assert!(config.load_weights().is_err());
    }
}
