use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Validation failed for {field} ({value:?}): {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid grade {value} for student {student}: grades must be between 2 and 5")]
    InvalidGrade { student: String, value: i64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {field} ({value:?}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Course {course} references unknown group {name:?}")]
    UnknownGroup { name: String, course: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CampusError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        CampusError::Validation {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CampusError::Validation { .. } | CampusError::InvalidGrade { .. } => ErrorCategory::Input,
            CampusError::ConfigParse { .. }
            | CampusError::InvalidConfigValue { .. }
            | CampusError::UnknownGroup { .. } => ErrorCategory::Configuration,
            CampusError::Io(_) | CampusError::Csv(_) | CampusError::Serialization(_) => {
                ErrorCategory::Storage
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A rejected grade leaves the roster untouched.
            CampusError::InvalidGrade { .. } => ErrorSeverity::Low,
            CampusError::Io(_) | CampusError::Csv(_) | CampusError::Serialization(_) => {
                ErrorSeverity::Medium
            }
            CampusError::Validation { .. }
            | CampusError::InvalidConfigValue { .. }
            | CampusError::UnknownGroup { .. } => ErrorSeverity::High,
            CampusError::ConfigParse { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CampusError::Validation { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            CampusError::InvalidGrade { student, value } => {
                format!("Grade {} is not valid for {}", value, student)
            }
            CampusError::Io(e) => format!("Could not access the file: {}", e),
            CampusError::Csv(e) => format!("Could not write CSV output: {}", e),
            CampusError::Serialization(e) => format!("Could not write JSON output: {}", e),
            CampusError::ConfigParse { message } => {
                format!("The roster file could not be read: {}", message)
            }
            CampusError::InvalidConfigValue { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            CampusError::UnknownGroup { name, course } => {
                format!("Course {} lists group {} which is not defined", course, name)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Grades range from 2 to 5; names and labels must not be empty",
            ErrorCategory::Configuration => {
                "Check the roster TOML file: every course must reference a [[groups]] entry by name"
            }
            ErrorCategory::Storage => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, CampusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_grade_is_low_severity_input() {
        let err = CampusError::InvalidGrade {
            student: "Ivanov".to_string(),
            value: 6,
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.to_string().contains("Ivanov"));
    }

    #[test]
    fn test_io_error_converts_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CampusError = io.into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.user_friendly_message().contains("denied"));
    }
}
