use crate::utils::error::{CampusError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CampusError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CampusError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A report file name must be a bare file name, never a path.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(CampusError::InvalidConfigValue {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Expected a file name without directory components".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CampusError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CampusError::validation(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("report_file", "alldata.txt").is_ok());
        assert!(validate_file_name("report_file", "out/alldata.txt").is_err());
        assert!(validate_file_name("report_file", "..").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("last_name", "Ivanov").is_ok());
        assert!(validate_non_empty_string("last_name", "   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("course", 1, 1, 6).is_ok());
        assert!(validate_range("course", 6, 1, 6).is_ok());
        assert!(validate_range("course", 7, 1, 6).is_err());
        assert!(validate_range("course", 0, 1, 6).is_err());
    }
}
