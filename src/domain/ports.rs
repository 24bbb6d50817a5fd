use crate::domain::model::Grade;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Human-readable summary ending in a separator line.
pub trait Describe {
    fn describe(&self) -> String;
}

/// Flattened mean over the students an entity covers; 0 when there are none.
pub trait Average {
    fn average(&self) -> f64;
}

pub trait GradeManager {
    fn add_grade(&mut self, value: i64) -> Result<Grade>;
    fn is_honor_roll(&self) -> bool;
    fn has_failing_grade(&self) -> bool;
}

pub trait Storage {
    /// Writes `data` to `name`, replacing any previous file, and returns the full path.
    fn write_file(&self, name: &str, data: &[u8]) -> Result<PathBuf>;
}

pub trait ConfigProvider {
    fn output_path(&self) -> &str;
    fn report_file(&self) -> &str;
    fn export_format(&self) -> ExportFormat;
    fn average_threshold(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
    Json,
}
