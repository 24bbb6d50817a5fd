//! Built-in roster used when no TOML roster is supplied.

use crate::domain::hierarchy::{Campus, Course, Group, Institute, SharedGroup};
use crate::domain::model::{CourseNumber, GroupLabel, InstituteLabel, LastName, Student};
use crate::utils::error::Result;
use std::rc::Rc;

/// Builds a group whose students are enrolled in `institute`/`course`.
pub fn build_group<'a>(
    institute: &str,
    course: u8,
    name: &str,
    students: impl IntoIterator<Item = (&'a str, Vec<u8>)>,
) -> Result<Group> {
    let institute = InstituteLabel::new(institute)?;
    let course = CourseNumber::new(course)?;
    let label = GroupLabel::new(name)?;

    let students = students
        .into_iter()
        .map(|(last_name, grades)| {
            Ok(Student::new(
                LastName::new(last_name)?,
                course,
                label.clone(),
                institute.clone(),
                grades,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Group::new(label, students))
}

fn course(number: u8, groups: &[&SharedGroup]) -> Result<Course> {
    Ok(Course::new(
        CourseNumber::new(number)?,
        groups.iter().map(|g| Rc::clone(g)).collect(),
    ))
}

/// Two institutes; the physics group of the first course is listed under both.
pub fn sample_campus() -> Result<Campus> {
    const IT: &str = "Institute of Information Technology";
    const PHYSICS: &str = "Institute of Physics";

    let it_101 = build_group(
        IT,
        1,
        "IT-101",
        [
            ("Ivanov", vec![5, 5, 5, 5]),
            ("Petrov", vec![4, 5, 4, 4]),
            ("Sidorov", vec![3, 4, 3, 4]),
        ],
    )?
    .shared();

    let phy_101 = build_group(
        PHYSICS,
        1,
        "PHY-101",
        [
            ("Nikolaev", vec![5, 5, 5, 5]),
            ("Orlov", vec![4, 4, 4, 4]),
            ("Andreev", vec![2, 3, 3, 2]),
        ],
    )?
    .shared();

    let it_201 = build_group(
        IT,
        2,
        "IT-201",
        [
            ("Fedorov", vec![5, 5, 4, 5]),
            ("Zhukov", vec![5, 5, 5, 5]),
            ("Vinogradov", vec![3, 3, 4, 4]),
        ],
    )?
    .shared();

    let it = Institute::new(
        InstituteLabel::new(IT)?,
        vec![course(1, &[&it_101, &phy_101])?, course(2, &[&it_201])?],
    );
    let physics = Institute::new(InstituteLabel::new(PHYSICS)?, vec![course(1, &[&phy_101])?]);

    Ok(Campus::new(vec![it, physics]))
}

/// Institute X, course 1, group G with A [5,5,5,5] and B [3,4].
pub fn single_group_campus() -> Result<Campus> {
    let g = build_group("X", 1, "G", [("A", vec![5, 5, 5, 5]), ("B", vec![3, 4])])?.shared();
    Ok(Campus::new(vec![Institute::new(
        InstituteLabel::new("X")?,
        vec![course(1, &[&g])?],
    )]))
}
