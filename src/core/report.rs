//! Depth-first rendering of the roster: institute, course, group, student,
//! each level in insertion order.

use crate::domain::hierarchy::Campus;
use crate::domain::ports::{Average, Describe, ExportFormat, GradeManager};
use crate::utils::error::Result;
use serde::Serialize;

/// One line of the flat student export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRow {
    pub institute: String,
    pub course: u8,
    pub group: String,
    pub last_name: String,
    pub grades: String,
    pub average: String,
    pub honor_roll: bool,
}

/// Every level's `describe()` in traversal order.
pub fn render_detailed(campus: &Campus) -> String {
    let mut out = String::new();
    for institute in campus.institutes() {
        out.push_str(&institute.describe());
        for course in institute.courses() {
            out.push_str(&course.describe());
            for group in course.groups() {
                let group = group.borrow();
                out.push_str(&group.describe());
                for student in group.students() {
                    out.push_str(&student.describe());
                }
            }
        }
    }
    out
}

/// The indented tree written by the text export.
pub fn render_outline(campus: &Campus) -> String {
    let mut out = String::new();
    for institute in campus.institutes() {
        out.push_str(&format!("Institute: {}\n", institute.name()));
        for course in institute.courses() {
            out.push_str(&format!(" Course: {}\n", course.number()));
            for group in course.groups() {
                let group = group.borrow();
                out.push_str(&format!(
                    "  Group: {} (average: {:.2})\n",
                    group.name(),
                    group.average()
                ));
                for student in group.students() {
                    out.push_str(&format!("   Student: {}\n", student.last_name()));
                    out.push_str(&format!("    Grades: {}\n", student.grades_line()));
                    out.push_str(&format!("    Average: {:.2}\n", student.average_grade()));
                    out.push_str(&format!("    Honor roll: {}\n", student.is_honor_roll()));
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Flattens the tree. Rows carry the path they were reached by, so a group
/// listed under two courses contributes its students twice.
pub fn student_rows(campus: &Campus) -> Vec<StudentRow> {
    let mut rows = Vec::new();
    for institute in campus.institutes() {
        for course in institute.courses() {
            for group in course.groups() {
                let group = group.borrow();
                for student in group.students() {
                    rows.push(StudentRow {
                        institute: institute.name().to_string(),
                        course: course.number().value(),
                        group: group.name().to_string(),
                        last_name: student.last_name().to_string(),
                        grades: student.grades_line(),
                        average: format!("{:.2}", student.average_grade()),
                        honor_roll: student.is_honor_roll(),
                    });
                }
            }
        }
    }
    rows
}

pub fn render_csv(campus: &Campus) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in student_rows(campus) {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::utils::error::CampusError::Io(e.into_error()))
}

pub fn render_json(campus: &Campus) -> Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(&student_rows(campus))?;
    data.push(b'\n');
    Ok(data)
}

pub fn render_export(campus: &Campus, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Text => Ok(render_outline(campus).into_bytes()),
        ExportFormat::Csv => render_csv(campus),
        ExportFormat::Json => render_json(campus),
    }
}
