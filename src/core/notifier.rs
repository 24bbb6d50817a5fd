//! Ordered, synchronous fan-out of a single student to a list of handlers.
//!
//! Handlers run in registration order against the same `&mut Student`; a
//! handler that appends a grade is observed by every handler after it. No
//! handler can stop the ones that follow.

use crate::domain::hierarchy::Group;
use crate::domain::model::Student;
use crate::domain::ports::GradeManager;

pub type Handler = Box<dyn Fn(&mut Student, &mut String)>;

#[derive(Default)]
pub struct Notifier {
    handlers: Vec<Handler>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut Student, &mut String) + 'static,
    {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn with<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Student, &mut String) + 'static,
    {
        self.register(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn invoke(&self, student: &mut Student, out: &mut String) {
        if self.handlers.is_empty() {
            return;
        }
        tracing::debug!(
            "Invoking {} handlers for {}",
            self.handlers.len(),
            student.last_name()
        );
        for handler in &self.handlers {
            handler(student, out);
        }
    }

    /// Invokes the notifier for every member of `group` in order. An empty
    /// notifier writes nothing, not even the group banner.
    pub fn apply_to_group(&self, group: &mut Group, out: &mut String) {
        if self.handlers.is_empty() {
            return;
        }
        out.push_str(&format!("Applying handlers to group {}:\n", group.name()));
        for student in group.students_mut() {
            self.invoke(student, out);
        }
    }

    /// The three handlers of the roster demonstration.
    pub fn demonstration() -> Self {
        Notifier::new()
            .with(basic_info)
            .with(classify_performance)
            .with(award_bonus)
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

pub fn basic_info(student: &mut Student, out: &mut String) {
    out.push_str(&format!(
        "Student: {}, average: {:.2}\n",
        student.last_name(),
        student.average_grade()
    ));
}

pub fn list_grades(student: &mut Student, out: &mut String) {
    out.push_str(&format!("Grades: {}\n", student.grades_line()));
}

pub fn classify_performance(student: &mut Student, out: &mut String) {
    let status = if student.is_honor_roll() {
        "HONOR ROLL"
    } else if student.has_failing_grade() {
        "HAS FAILING"
    } else {
        "STANDARD"
    };
    out.push_str(&format!("Performance: {} - {}\n", student.last_name(), status));
}

pub fn award_bonus(student: &mut Student, out: &mut String) {
    if !student.is_honor_roll() {
        return;
    }
    match student.add_grade(i64::from(crate::domain::model::Grade::MAX)) {
        Ok(grade) => out.push_str(&format!(
            "Bonus grade {} awarded to honor roll student {}\n",
            grade,
            student.last_name()
        )),
        Err(e) => tracing::warn!("Bonus grade rejected: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::tests::student;
    use crate::domain::model::GroupLabel;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            notifier.register(move |_, _| log.borrow_mut().push(tag));
        }

        let mut s = student("A", &[4]);
        notifier.invoke(&mut s, &mut String::new());
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_mutation_visible_to_later_handlers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_after = Rc::clone(&seen);
        let notifier = Notifier::new()
            .with(|s, _| {
                s.add_grade(3).unwrap();
            })
            .with(move |s, _| seen_after.borrow_mut().extend_from_slice(s.grades()));

        let mut s = student("A", &[5]);
        notifier.invoke(&mut s, &mut String::new());
        assert_eq!(*seen.borrow(), vec![5, 3]);
        assert_eq!(s.grades(), &[5, 3]);
    }

    #[test]
    fn test_empty_notifier_is_noop() {
        let notifier = Notifier::new();
        let mut s = student("A", &[5, 5]);
        let mut out = String::new();
        notifier.invoke(&mut s, &mut out);
        assert!(out.is_empty());
        assert_eq!(s.grades(), &[5, 5]);

        let mut group = Group::new(GroupLabel::new("G").unwrap(), vec![student("B", &[5])]);
        notifier.apply_to_group(&mut group, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_demonstration_awards_bonus_after_classification() {
        let notifier = Notifier::demonstration();
        assert_eq!(notifier.len(), 3);

        let mut s = student("Ivanov", &[5, 5, 5, 5]);
        let mut out = String::new();
        notifier.invoke(&mut s, &mut out);

        assert_eq!(s.grades(), &[5, 5, 5, 5, 5]);
        assert_eq!(
            out,
            "Student: Ivanov, average: 5.00\n\
             Performance: Ivanov - HONOR ROLL\n\
             Bonus grade 5 awarded to honor roll student Ivanov\n"
        );
    }

    #[test]
    fn test_demonstration_leaves_failing_student_alone() {
        let mut s = student("Andreev", &[2, 3, 3, 2]);
        let mut out = String::new();
        Notifier::demonstration().invoke(&mut s, &mut out);

        assert_eq!(s.grades(), &[2, 3, 3, 2]);
        assert!(out.contains("Andreev - HAS FAILING"));
        assert!(!out.contains("Bonus"));
    }

    #[test]
    fn test_apply_to_group_visits_members_in_order() {
        let mut group = Group::new(
            GroupLabel::new("IT-101").unwrap(),
            vec![student("A", &[4]), student("B", &[3])],
        );
        let mut out = String::new();
        Notifier::new().with(list_grades).apply_to_group(&mut group, &mut out);
        assert_eq!(out, "Applying handlers to group IT-101:\nGrades: 4\nGrades: 3\n");
    }
}
