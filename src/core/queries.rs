use crate::domain::hierarchy::{Campus, SharedGroup};
use crate::domain::model::Student;
use crate::domain::ports::{Average, GradeManager};
use std::rc::Rc;

/// A student together with the path it was reached by.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub institute: String,
    pub course: u8,
    pub group: String,
    pub student: Student,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseAverage {
    pub institute: String,
    pub course: u8,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupAverage {
    pub institute: String,
    pub course: u8,
    pub group: String,
    pub average: f64,
}

fn honor_roll_where(campus: &Campus, keep_course: impl Fn(u8) -> bool) -> Vec<Placement> {
    let mut found = Vec::new();
    for institute in campus.institutes() {
        for course in institute.courses() {
            if !keep_course(course.number().value()) {
                continue;
            }
            for group in course.groups() {
                let group = group.borrow();
                for student in group.students().iter().filter(|s| s.is_honor_roll()) {
                    found.push(Placement {
                        institute: institute.name().to_string(),
                        course: course.number().value(),
                        group: group.name().to_string(),
                        student: student.clone(),
                    });
                }
            }
        }
    }
    found
}

pub fn honor_roll(campus: &Campus) -> Vec<Placement> {
    honor_roll_where(campus, |_| true)
}

/// Honor roll restricted to first and second year courses.
pub fn junior_honor_roll(campus: &Campus) -> Vec<Placement> {
    honor_roll_where(campus, |course| course <= 2)
}

pub fn courses_above(campus: &Campus, threshold: f64) -> Vec<CourseAverage> {
    campus
        .institutes()
        .iter()
        .flat_map(|institute| {
            institute.courses().iter().filter_map(move |course| {
                let average = course.average();
                (average > threshold).then(|| CourseAverage {
                    institute: institute.name().to_string(),
                    course: course.number().value(),
                    average,
                })
            })
        })
        .collect()
}

/// Group averages of first and second year courses, best first.
pub fn junior_group_averages(campus: &Campus) -> Vec<GroupAverage> {
    let mut ranked: Vec<GroupAverage> = campus
        .institutes()
        .iter()
        .flat_map(|institute| {
            institute
                .courses()
                .iter()
                .filter(|course| course.number().is_junior())
                .flat_map(move |course| {
                    course.groups().iter().map(move |group| {
                        let group = group.borrow();
                        GroupAverage {
                            institute: institute.name().to_string(),
                            course: course.number().value(),
                            group: group.name().to_string(),
                            average: group.average(),
                        }
                    })
                })
        })
        .collect();
    ranked.sort_by(|a, b| b.average.total_cmp(&a.average));
    ranked
}

/// Finds the first student with `last_name` in traversal order, returning the
/// owning group and the student's index within it.
pub fn find_student(campus: &Campus, last_name: &str) -> Option<(SharedGroup, usize)> {
    for institute in campus.institutes() {
        for course in institute.courses() {
            for group in course.groups() {
                let index = group
                    .borrow()
                    .students()
                    .iter()
                    .position(|s| s.last_name().as_str() == last_name);
                if let Some(index) = index {
                    return Some((Rc::clone(group), index));
                }
            }
        }
    }
    None
}
