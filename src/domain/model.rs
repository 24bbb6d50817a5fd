use crate::domain::ports::{Average, Describe, GradeManager};
use crate::utils::error::{CampusError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use std::fmt;

macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                validate_non_empty_string($field, &value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = CampusError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

label_type!(
    /// Student family name, never blank.
    LastName,
    "last_name"
);
label_type!(GroupLabel, "group");
label_type!(InstituteLabel, "institute");

/// Year of study, 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseNumber(u8);

impl CourseNumber {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(value: u8) -> Result<Self> {
        validate_range("course", value, Self::MIN, Self::MAX)?;
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// First and second year students.
    pub fn is_junior(self) -> bool {
        self.0 <= 2
    }
}

impl TryFrom<u8> for CourseNumber {
    type Error = CampusError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CourseNumber> for u8 {
    fn from(value: CourseNumber) -> u8 {
        value.0
    }
}

impl fmt::Display for CourseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self> {
        validate_range("grade", value, Self::MIN as i64, Self::MAX as i64)?;
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    last_name: LastName,
    course: CourseNumber,
    group: GroupLabel,
    institute: InstituteLabel,
    grades: Vec<u8>,
}

impl Student {
    /// Seed grades are taken as-is; only [`GradeManager::add_grade`] checks the range.
    pub fn new(
        last_name: LastName,
        course: CourseNumber,
        group: GroupLabel,
        institute: InstituteLabel,
        grades: Vec<u8>,
    ) -> Self {
        Self {
            last_name,
            course,
            group,
            institute,
            grades,
        }
    }

    pub fn last_name(&self) -> &LastName {
        &self.last_name
    }

    pub fn course(&self) -> CourseNumber {
        self.course
    }

    pub fn group(&self) -> &GroupLabel {
        &self.group
    }

    pub fn institute(&self) -> &InstituteLabel {
        &self.institute
    }

    pub fn grades(&self) -> &[u8] {
        &self.grades
    }

    pub fn grades_line(&self) -> String {
        self.grades
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn average_grade(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.grades.iter().map(|&g| u32::from(g)).sum();
        f64::from(sum) / self.grades.len() as f64
    }

    pub fn info(&self) -> String {
        format!(
            "{}, {}, {}, course {}",
            self.last_name, self.institute, self.group, self.course
        )
    }
}

impl Average for Student {
    fn average(&self) -> f64 {
        self.average_grade()
    }
}

impl GradeManager for Student {
    fn add_grade(&mut self, value: i64) -> Result<Grade> {
        let grade = Grade::new(value).map_err(|_| CampusError::InvalidGrade {
            student: self.last_name.to_string(),
            value,
        })?;
        self.grades.push(grade.value());
        tracing::debug!("Added grade {} to {}", grade, self.last_name);
        Ok(grade)
    }

    fn is_honor_roll(&self) -> bool {
        !self.grades.is_empty() && self.grades.iter().all(|&g| g == Grade::MAX)
    }

    fn has_failing_grade(&self) -> bool {
        self.grades.iter().any(|&g| g == Grade::MIN)
    }
}

impl Describe for Student {
    fn describe(&self) -> String {
        format!(
            "Student: {}\nGrades: {}\nAverage: {:.2}\nHonor roll: {}\n---\n",
            self.last_name,
            self.grades_line(),
            self.average_grade(),
            if self.is_honor_roll() { "Yes" } else { "No" }
        )
    }
}
