//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;
use url::Url;

/// Validate the entire configuration.
///
/// Missing values are fine here; they are asked for interactively later.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(token) = &config.account.access_token {
        validate_token(token)?;
    }

    if let Some(resolution) = &config.options.resolution {
        validate_resolution(resolution)?;
    }

    if let Some(url) = &config.options.course_url {
        validate_course_url(url)?;
    }

    validate_range(config.options.start, config.options.end)?;
    validate_attempts("max_resolution_attempts", config.options.max_resolution_attempts)?;
    validate_attempts(
        "max_course_lookup_attempts",
        config.options.max_course_lookup_attempts,
    )?;

    if config.options.request_timeout_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "request_timeout_seconds".to_string(),
            message: "Timeout must be at least one second".to_string(),
        });
    }

    Url::parse(&config.options.api_base_url)?;

    Ok(())
}

/// Validate the access token.
pub fn validate_token(token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(Error::MissingConfig("access_token".to_string()));
    }

    // Check for placeholder values
    let token_lower = token.to_lowercase();
    if token_lower.contains("replaceme") || token_lower.contains("your_token") {
        return Err(Error::ConfigValidation {
            field: "access_token".to_string(),
            message: "Token appears to be a placeholder. Please provide your actual Udemy token."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate a resolution label such as `720` or `Auto`.
pub fn validate_resolution(resolution: &str) -> Result<()> {
    let label_pattern = Regex::new(r"^[0-9A-Za-z]{1,10}$").unwrap();

    if !label_pattern.is_match(resolution) {
        return Err(Error::ConfigValidation {
            field: "resolution".to_string(),
            message: format!(
                "Invalid resolution '{}'. Expected a label like 360, 480, 720 or 1080.",
                resolution
            ),
        });
    }

    Ok(())
}

/// Validate the lecture range bounds when given.
pub fn validate_range(start: Option<u32>, end: Option<u32>) -> Result<()> {
    if start == Some(0) {
        return Err(Error::ConfigValidation {
            field: "start".to_string(),
            message: "Lecture indices start at 1".to_string(),
        });
    }

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(Error::ConfigValidation {
                field: "end".to_string(),
                message: format!("End ({}) is before start ({})", end, start),
            });
        }
    }

    Ok(())
}

fn validate_attempts(field: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "At least one attempt is required".to_string(),
        });
    }
    Ok(())
}

/// Validate a course landing page URL.
pub fn validate_course_url(input: &str) -> Result<()> {
    let url = Url::parse(input.trim())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "course_url".to_string(),
            message: format!("Unsupported URL scheme: {}", url.scheme()),
        });
    }

    if !url.path().contains("/course/") {
        return Err(Error::ConfigValidation {
            field: "course_url".to_string(),
            message: format!("Not a course page URL: {}", input),
        });
    }

    Ok(())
}

/// Parse a course id typed by the user or read from a page.
pub fn parse_course_id(input: &str) -> Result<u64> {
    let input = input.trim();
    let id_pattern = Regex::new(r"^\d{1,19}$").unwrap();

    if id_pattern.is_match(input) {
        if let Ok(id) = input.parse::<u64>() {
            if id > 0 {
                return Ok(id);
            }
        }
    }

    Err(Error::ConfigValidation {
        field: "course_id".to_string(),
        message: format!("Invalid course ID: '{}'. Must be a positive number.", input),
    })
}
