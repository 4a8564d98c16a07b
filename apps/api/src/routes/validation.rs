//! Request validation shared by the analysis and prediction handlers.

use crate::config::Config;
use crate::errors::AppError;

/// Rejects blank text and text over the configured character limit.
pub fn validate_text(field: &str, text: &str, config: &Config) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    let chars = text.chars().count();
    if chars > config.max_text_length {
        return Err(AppError::Validation(format!(
            "{field} is {chars} characters, limit is {}",
            config.max_text_length
        )));
    }
    Ok(())
}

/// Like [`validate_text`], but an absent or blank value is accepted.
pub fn validate_optional_text(
    field: &str,
    text: Option<&str>,
    config: &Config,
) -> Result<(), AppError> {
    match text {
        Some(text) if !text.trim().is_empty() => validate_text(field, text, config),
        _ => Ok(()),
    }
}

pub fn validate_batch_size(len: usize, config: &Config) -> Result<(), AppError> {
    if len == 0 {
        return Err(AppError::Validation("batch cannot be empty".to_string()));
    }
    if len > config.max_batch_size {
        return Err(AppError::Validation(format!(
            "batch has {len} items, limit is {}",
            config.max_batch_size
        )));
    }
    Ok(())
}
