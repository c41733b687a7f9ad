use crate::utils::error::{NoorError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(NoorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(NoorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(NoorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number<T>(field_name: &str, value: T, min_value: T) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min_value {
        return Err(NoorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| NoorError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NoorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不在任何範圍內
    if !(value >= min && value <= max) {
        return Err(NoorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("ai.endpoint", "https://openrouter.ai/api/v1").is_ok());
        assert!(validate_url("ai.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("ai.endpoint", "").is_err());
        assert!(validate_url("ai.endpoint", "invalid-url").is_err());
        assert!(validate_url("ai.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("ai.max_tokens", 1500u32, 1).is_ok());
        assert!(validate_positive_number("ai.max_tokens", 0u32, 1).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("latitude", 45.0, -90.0, 90.0).is_ok());
        assert!(validate_range("latitude", 90.5, -90.0, 90.0).is_err());
        assert!(validate_range("latitude", f64::NAN, -90.0, 90.0).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("key".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("ai.api_key", &present).unwrap(), "key");
        assert!(matches!(
            validate_required_field("ai.api_key", &missing),
            Err(NoorError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("goal", "Memorize Juz Amma").is_ok());
        assert!(validate_non_empty_string("goal", "   ").is_err());
    }
}
