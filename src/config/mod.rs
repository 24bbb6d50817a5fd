pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, ExportFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_name, validate_path, validate_range, Validate};

#[cfg(feature = "cli")]
use crate::core::engine::MenuAction;
#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_REPORT_FILE: &str = "alldata.txt";
pub const DEFAULT_THRESHOLD: f64 = 3.5;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "campus-roll")]
#[command(about = "Student roster statistics: averages, honor roll and reports")]
pub struct CliConfig {
    /// Roster TOML file; the built-in sample roster is used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the report file is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Report file name
    #[arg(long)]
    pub report_file: Option<String>,

    /// Export format used by the save action
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Course average a course must exceed to be listed
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Run these actions in order and exit instead of showing the menu
    #[arg(long, value_enum)]
    pub run: Vec<MenuAction>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Command-line flags win over whatever the roster file configured.
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(path) = &self.output_path {
            settings.output_path = path.clone();
        }
        if let Some(file) = &self.report_file {
            settings.report_file = file.clone();
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(threshold) = self.threshold {
            settings.threshold = threshold;
        }
        settings
    }
}

/// Effective report settings after layering file and command line values.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_path: String,
    pub report_file: String,
    pub format: ExportFormat,
    pub threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            format: ExportFormat::Text,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ConfigProvider for Settings {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_file(&self) -> &str {
        &self.report_file
    }

    fn export_format(&self) -> ExportFormat {
        self.format
    }

    fn average_threshold(&self) -> f64 {
        self.threshold
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_file_name("report_file", &self.report_file)?;
        validate_range("threshold", self.threshold, 0.0, 5.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.report_file(), "alldata.txt");
        assert_eq!(settings.average_threshold(), 3.5);
    }

    #[test]
    fn test_invalid_settings() {
        let mut settings = Settings::default();
        settings.threshold = 7.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.report_file = "reports/alldata.txt".to_string();
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides() {
        let cli = CliConfig::parse_from([
            "campus-roll",
            "--report-file",
            "students.csv",
            "--format",
            "csv",
            "--run",
            "show-all",
            "--run",
            "save",
        ]);
        let settings = cli.apply_overrides(Settings::default());

        assert_eq!(settings.report_file, "students.csv");
        assert_eq!(settings.format, ExportFormat::Csv);
        assert_eq!(settings.output_path, ".");
        assert_eq!(cli.run, vec![MenuAction::ShowAll, MenuAction::Save]);
    }
}
