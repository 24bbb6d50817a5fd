//! Group, course, institute and campus aggregates.
//!
//! A course holds its groups by shared reference, so the same group may be
//! listed under several courses. Every average is an unweighted mean over the
//! individual averages of the students reached by walking down from the entity.

use crate::domain::model::{CourseNumber, GroupLabel, InstituteLabel, Student};
use crate::domain::ports::{Average, Describe, GradeManager};
use std::cell::RefCell;
use std::rc::Rc;

pub type SharedGroup = Rc<RefCell<Group>>;

fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[derive(Debug, Clone)]
pub struct Group {
    name: GroupLabel,
    students: Vec<Student>,
}

impl Group {
    pub fn new(name: GroupLabel, students: Vec<Student>) -> Self {
        Self { name, students }
    }

    pub fn shared(self) -> SharedGroup {
        Rc::new(RefCell::new(self))
    }

    pub fn name(&self) -> &GroupLabel {
        &self.name
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn students_mut(&mut self) -> &mut [Student] {
        &mut self.students
    }

    pub fn push(&mut self, student: Student) {
        self.students.push(student);
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn honor_roll_count(&self) -> usize {
        self.students.iter().filter(|s| s.is_honor_roll()).count()
    }

    pub fn failing_count(&self) -> usize {
        self.students.iter().filter(|s| s.has_failing_grade()).count()
    }
}

impl Average for Group {
    fn average(&self) -> f64 {
        mean(self.students.iter().map(Student::average_grade))
    }
}

impl Describe for Group {
    fn describe(&self) -> String {
        format!(
            "Group: {}\nStudents: {}\nGroup average: {:.2}\nHonor roll: {}\nWith failing grades: {}\n---\n",
            self.name,
            self.student_count(),
            self.average(),
            self.honor_roll_count(),
            self.failing_count()
        )
    }
}

#[derive(Debug, Clone)]
pub struct Course {
    number: CourseNumber,
    groups: Vec<SharedGroup>,
}

impl Course {
    pub fn new(number: CourseNumber, groups: Vec<SharedGroup>) -> Self {
        Self { number, groups }
    }

    pub fn number(&self) -> CourseNumber {
        self.number
    }

    pub fn groups(&self) -> &[SharedGroup] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn student_count(&self) -> usize {
        self.groups.iter().map(|g| g.borrow().student_count()).sum()
    }

    fn student_averages(&self) -> Vec<f64> {
        self.groups
            .iter()
            .flat_map(|g| {
                g.borrow()
                    .students()
                    .iter()
                    .map(Student::average_grade)
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Average for Course {
    fn average(&self) -> f64 {
        mean(self.student_averages())
    }
}

impl Describe for Course {
    fn describe(&self) -> String {
        format!(
            "Course: {}\nGroups: {}\nStudents: {}\nCourse average: {:.2}\n---\n",
            self.number,
            self.group_count(),
            self.student_count(),
            self.average()
        )
    }
}

#[derive(Debug, Clone)]
pub struct Institute {
    name: InstituteLabel,
    courses: Vec<Course>,
}

impl Institute {
    pub fn new(name: InstituteLabel, courses: Vec<Course>) -> Self {
        Self { name, courses }
    }

    pub fn name(&self) -> &InstituteLabel {
        &self.name
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn student_count(&self) -> usize {
        self.courses.iter().map(Course::student_count).sum()
    }

    fn student_averages(&self) -> Vec<f64> {
        self.courses.iter().flat_map(Course::student_averages).collect()
    }
}

impl Average for Institute {
    fn average(&self) -> f64 {
        mean(self.student_averages())
    }
}

impl Describe for Institute {
    fn describe(&self) -> String {
        format!(
            "Institute: {}\nCourses: {}\nStudents: {}\nInstitute average: {:.2}\n==========\n",
            self.name,
            self.course_count(),
            self.student_count(),
            self.average()
        )
    }
}

/// The whole roster, built once at startup and owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct Campus {
    institutes: Vec<Institute>,
}

impl Campus {
    pub fn new(institutes: Vec<Institute>) -> Self {
        Self { institutes }
    }

    pub fn institutes(&self) -> &[Institute] {
        &self.institutes
    }

    pub fn push(&mut self, institute: Institute) {
        self.institutes.push(institute);
    }

    pub fn is_empty(&self) -> bool {
        self.institutes.is_empty()
    }

    /// Counts a shared group once per course that lists it.
    pub fn student_count(&self) -> usize {
        self.institutes.iter().map(Institute::student_count).sum()
    }

    /// Group at `institute/course/group` by position, if present.
    pub fn group_at(&self, institute: usize, course: usize, group: usize) -> Option<SharedGroup> {
        self.institutes
            .get(institute)?
            .courses
            .get(course)?
            .groups
            .get(group)
            .cloned()
    }
}

impl Average for Campus {
    fn average(&self) -> f64 {
        mean(self.institutes.iter().flat_map(Institute::student_averages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::tests::student;

    fn course(number: u8, groups: Vec<SharedGroup>) -> Course {
        Course::new(CourseNumber::new(number).unwrap(), groups)
    }

    fn group(name: &str, students: Vec<Student>) -> Group {
        Group::new(GroupLabel::new(name).unwrap(), students)
    }

    #[test]
    fn test_single_institute_roll_up() {
        let g = group("G", vec![student("A", &[5, 5, 5, 5]), student("B", &[3, 4])]);
        assert_eq!(g.average(), 4.25);
        assert_eq!(g.honor_roll_count(), 1);
        assert!(g.students()[0].is_honor_roll());
        assert!(!g.students()[1].is_honor_roll());

        let c = course(1, vec![g.shared()]);
        assert_eq!(c.average(), 4.25);
        assert_eq!(c.student_count(), 2);

        let inst = Institute::new(InstituteLabel::new("X").unwrap(), vec![c]);
        assert_eq!(inst.average(), 4.25);
        assert_eq!(inst.course_count(), 1);
        assert_eq!(inst.student_count(), 2);
    }

    #[test]
    fn test_average_is_not_weighted_by_grade_count() {
        let g = group(
            "G",
            vec![student("A", &[4]), student("B", &[5, 5, 5, 5, 5, 5, 5, 5])],
        );
        assert_eq!(g.average(), 4.5);
    }

    #[test]
    fn test_course_average_is_flattened_over_students() {
        // Group averages 5.0 (one student) and 3.0 (three students).
        let g1 = group("G1", vec![student("A", &[5])]);
        let g2 = group(
            "G2",
            vec![student("B", &[3]), student("C", &[3]), student("D", &[3])],
        );
        let c = course(2, vec![g1.shared(), g2.shared()]);
        assert_eq!(c.average(), 3.5);
        assert_eq!(c.group_count(), 2);
    }

    #[test]
    fn test_empty_aggregates_average_zero() {
        assert_eq!(group("G", vec![]).average(), 0.0);
        assert_eq!(course(1, vec![]).average(), 0.0);
        assert_eq!(
            Institute::new(InstituteLabel::new("X").unwrap(), vec![]).average(),
            0.0
        );
        assert_eq!(Campus::default().average(), 0.0);
    }

    #[test]
    fn test_failing_count() {
        let g = group(
            "G",
            vec![student("A", &[2, 3]), student("B", &[5]), student("C", &[2])],
        );
        assert_eq!(g.failing_count(), 2);
        assert_eq!(g.honor_roll_count(), 1);
    }

    #[test]
    fn test_shared_group_mutation_visible_through_both_courses() {
        let shared = group("PHY-101", vec![student("Orlov", &[4, 4])]).shared();
        let it = course(1, vec![Rc::clone(&shared)]);
        let phys = course(1, vec![Rc::clone(&shared)]);

        shared.borrow_mut().students_mut()[0].add_grade(2).unwrap();

        for c in [&it, &phys] {
            let g = c.groups()[0].borrow();
            assert_eq!(g.students()[0].grades(), &[4, 4, 2]);
            assert_eq!(g.failing_count(), 1);
        }
        assert_eq!(it.average(), phys.average());
    }

    #[test]
    fn test_describe_ends_with_separator() {
        let g = group("G", vec![student("A", &[5, 5]), student("B", &[3, 4])]);
        assert_eq!(
            g.describe(),
            "Group: G\nStudents: 2\nGroup average: 4.25\nHonor roll: 1\nWith failing grades: 0\n---\n"
        );

        let c = course(1, vec![g.shared()]);
        assert!(c.describe().starts_with("Course: 1\nGroups: 1\nStudents: 2\n"));
        assert!(c.describe().ends_with("---\n"));

        let inst = Institute::new(InstituteLabel::new("X").unwrap(), vec![c]);
        assert!(inst.describe().ends_with("==========\n"));
    }
}
