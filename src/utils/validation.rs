use crate::utils::error::{BenchError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BenchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BenchError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BenchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BenchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BenchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(BenchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Must be at least {}", min_value),
        });
    }
    Ok(())
}

/// The target name doubles as the compose project name, so it has to satisfy
/// docker's project-name rules.
pub fn validate_project_name(field_name: &str, name: &str) -> Result<()> {
    static PROJECT_NAME_RE: OnceLock<Regex> = OnceLock::new();
    let re = PROJECT_NAME_RE.get_or_init(|| {
        Regex::new(r"^[a-z][a-z0-9_-]*$").expect("project name regex is valid")
    });

    if !re.is_match(name) {
        return Err(BenchError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must start with a lowercase letter and contain only [a-z0-9_-]".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_names() {
        assert!(validate_project_name("targets.name", "mssql_narrow").is_ok());
        assert!(validate_project_name("targets.name", "questdb").is_ok());
        assert!(validate_project_name("targets.name", "MSSQL").is_err());
        assert!(validate_project_name("targets.name", "1db").is_err());
        assert!(validate_project_name("targets.name", "").is_err());
        assert!(validate_project_name("targets.name", "db with spaces").is_err());
    }

    #[test]
    fn urls() {
        assert!(validate_url("readiness.url", "http://localhost:8086/ping").is_ok());
        assert!(validate_url("readiness.url", "ftp://localhost").is_err());
        assert!(validate_url("readiness.url", "").is_err());
    }

    #[test]
    fn positive_numbers() {
        assert!(validate_positive_number("runner.runs", 5, 1).is_ok());
        assert!(validate_positive_number("runner.runs", 0, 1).is_err());
    }
}
