use crate::config::Settings;
use crate::core::seed::build_group;
use crate::core::ExportFormat;
use crate::domain::hierarchy::{Campus, Course, Institute, SharedGroup};
use crate::domain::model::{CourseNumber, Grade, InstituteLabel};
use crate::utils::error::{CampusError, Result};
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub report: Option<ReportConfig>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub institutes: Vec<InstituteConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: Option<String>,
    pub report_file: Option<String>,
    pub format: Option<ExportFormat>,
    pub threshold: Option<f64>,
}

/// A group and the enrollment its students carry on their record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,
    pub institute: String,
    pub course: u8,
    #[serde(default)]
    pub students: Vec<StudentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentConfig {
    pub last_name: String,
    #[serde(default)]
    pub grades: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstituteConfig {
    pub name: String,
    #[serde(default)]
    pub courses: Vec<CourseConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    pub number: u8,
    /// Names of `[[groups]]` entries; a group may be listed by several courses.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl RosterConfig {
    /// 從 TOML 檔案載入名冊
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CampusError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CampusError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Layers the `[report]` table over the defaults.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(report) = &self.report {
            if let Some(path) = &report.output_path {
                settings.output_path = path.clone();
            }
            if let Some(file) = &report.report_file {
                settings.report_file = file.clone();
            }
            if let Some(format) = report.format {
                settings.format = format;
            }
            if let Some(threshold) = report.threshold {
                settings.threshold = threshold;
            }
        }
        settings
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(report) = &self.report {
            if let Some(path) = &report.output_path {
                validate_path("report.output_path", path)?;
            }
            if let Some(file) = &report.report_file {
                validate_file_name("report.report_file", file)?;
            }
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            validate_non_empty_string("groups.name", &group.name)?;
            validate_non_empty_string("groups.institute", &group.institute)?;
            validate_range("groups.course", group.course, CourseNumber::MIN, CourseNumber::MAX)?;
            if !seen.insert(group.name.as_str()) {
                return Err(CampusError::InvalidConfigValue {
                    field: "groups.name".to_string(),
                    value: group.name.clone(),
                    reason: "Group names must be unique".to_string(),
                });
            }
            for student in &group.students {
                validate_non_empty_string("groups.students.last_name", &student.last_name)?;
                for &grade in &student.grades {
                    validate_range("groups.students.grades", grade, Grade::MIN, Grade::MAX)?;
                }
            }
        }

        for institute in &self.institutes {
            validate_non_empty_string("institutes.name", &institute.name)?;
            for course in &institute.courses {
                validate_range(
                    "institutes.courses.number",
                    course.number,
                    CourseNumber::MIN,
                    CourseNumber::MAX,
                )?;
                if let Some(name) = course.groups.iter().find(|n| !seen.contains(n.as_str())) {
                    return Err(CampusError::UnknownGroup {
                        name: name.clone(),
                        course: course.number,
                    });
                }
            }
        }

        Ok(())
    }

    /// Builds the hierarchy. Each `[[groups]]` entry becomes one shared group,
    /// so every course that names it sees the same students.
    pub fn build_campus(&self) -> Result<Campus> {
        self.validate_config()?;

        let mut groups: HashMap<&str, SharedGroup> = HashMap::new();
        for group in &self.groups {
            let built = build_group(
                &group.institute,
                group.course,
                &group.name,
                group
                    .students
                    .iter()
                    .map(|s| (s.last_name.as_str(), s.grades.clone())),
            )?;
            groups.insert(group.name.as_str(), built.shared());
        }

        let mut campus = Campus::default();
        for institute in &self.institutes {
            let mut courses = Vec::with_capacity(institute.courses.len());
            for course in &institute.courses {
                let members = course
                    .groups
                    .iter()
                    .map(|name| {
                        groups.get(name.as_str()).map(Rc::clone).ok_or_else(|| {
                            CampusError::UnknownGroup {
                                name: name.clone(),
                                course: course.number,
                            }
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                courses.push(Course::new(CourseNumber::new(course.number)?, members));
            }
            campus.push(Institute::new(InstituteLabel::new(institute.name.as_str())?, courses));
        }

        tracing::debug!(
            "Built roster with {} institutes and {} groups",
            campus.institutes().len(),
            groups.len()
        );
        Ok(campus)
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Average;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ROSTER: &str = r#"
[report]
report_file = "students.txt"
threshold = 4.0

[[groups]]
name = "G"
institute = "X"
course = 1

[[groups.students]]
last_name = "A"
grades = [5, 5, 5, 5]

[[groups.students]]
last_name = "B"
grades = [3, 4]

[[institutes]]
name = "X"

[[institutes.courses]]
number = 1
groups = ["G"]

[[institutes]]
name = "Y"

[[institutes.courses]]
number = 2
groups = ["G"]
"#;

    #[test]
    fn test_parse_roster() {
        let config = RosterConfig::from_toml_str(ROSTER).unwrap();
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.institutes.len(), 2);

        let settings = config.settings();
        assert_eq!(settings.report_file, "students.txt");
        assert_eq!(settings.threshold, 4.0);
        assert_eq!(settings.format, ExportFormat::Text);
    }

    #[test]
    fn test_build_campus_shares_groups_by_name() {
        let campus = RosterConfig::from_toml_str(ROSTER)
            .unwrap()
            .build_campus()
            .unwrap();

        let x = &campus.institutes()[0];
        let y = &campus.institutes()[1];
        assert_eq!(x.average(), 4.25);
        assert_eq!(y.average(), 4.25);
        assert!(Rc::ptr_eq(&x.courses()[0].groups()[0], &y.courses()[0].groups()[0]));
    }

    #[test]
    fn test_unknown_group_reference() {
        let toml = r#"
[[institutes]]
name = "X"

[[institutes.courses]]
number = 1
groups = ["missing"]
"#;
        let config = RosterConfig::from_toml_str(toml).unwrap();
        let err = config.build_campus().unwrap_err();
        assert!(matches!(err, CampusError::UnknownGroup { ref name, course: 1 } if name == "missing"));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let toml = r#"
[[groups]]
name = "G"
institute = "X"
course = 1

[[groups.students]]
last_name = "A"
grades = [5, 6]
"#;
        let config = RosterConfig::from_toml_str(toml).unwrap();
        assert!(config.validate().is_err());

        let toml = r#"
[[groups]]
name = "G"
institute = "X"
course = 9
"#;
        assert!(RosterConfig::from_toml_str(toml).unwrap().validate().is_err());
    }

    #[test]
    fn test_duplicate_group_names_rejected() {
        let toml = r#"
[[groups]]
name = "G"
institute = "X"
course = 1

[[groups]]
name = "G"
institute = "Y"
course = 2
"#;
        let err = RosterConfig::from_toml_str(toml).unwrap().validate().unwrap_err();
        assert!(matches!(err, CampusError::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = RosterConfig::from_toml_str("[[groups]\nname = ").unwrap_err();
        assert!(matches!(err, CampusError::ConfigParse { .. }));
    }

    #[test]
    fn test_roster_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(ROSTER.as_bytes()).unwrap();

        let config = RosterConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.groups[0].students.len(), 2);
    }
}
