use crate::utils::error::{GameplanError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GameplanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GameplanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(GameplanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
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
    if !(min <= value && value <= max) {
        return Err(GameplanError::InvalidConfigValueError {
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
    fn test_validate_path() {
        assert!(validate_path("teams_file", "teams.tsv").is_ok());
        assert!(validate_path("teams_file", "").is_err());
        assert!(validate_path("teams_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("start", 1, 1).is_ok());
        assert!(validate_positive_number("start", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("density.decay", 0.5, 0.0, 1.0).is_ok());
        assert!(validate_range("density.decay", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("density.decay", f64::NAN, 0.0, 1.0).is_err());
        assert!(validate_range("density.decay", f64::INFINITY, 0.0, 1.0).is_err());
    }
}
