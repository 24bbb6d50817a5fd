use crate::core::notifier::Notifier;
use crate::core::{queries, report, ConfigProvider, Storage};
use crate::domain::hierarchy::Campus;
use crate::domain::ports::{Average, Describe, GradeManager};
use crate::utils::error::Result;
use std::io::Write;

pub const MENU: &str = "\
1. Show all data
2. Show honor roll students
3. Interfaces and handlers demonstration
4. Courses with a high average
5. Honor roll of courses 1-2
6. Group averages of courses 1-2
7. List all students
8. Save all data to file
9. Add a grade
0. Exit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MenuAction {
    ShowAll,
    HonorRoll,
    Demo,
    HighAverage,
    JuniorHonorRoll,
    GroupAverages,
    ListStudents,
    Save,
    Exit,
}

impl MenuAction {
    /// Maps a numbered menu entry. Entry 9 needs extra input and is handled by
    /// the caller through [`RosterEngine::add_grade`].
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuAction::ShowAll),
            "2" => Some(MenuAction::HonorRoll),
            "3" => Some(MenuAction::Demo),
            "4" => Some(MenuAction::HighAverage),
            "5" => Some(MenuAction::JuniorHonorRoll),
            "6" => Some(MenuAction::GroupAverages),
            "7" => Some(MenuAction::ListStudents),
            "8" => Some(MenuAction::Save),
            "0" => Some(MenuAction::Exit),
            _ => None,
        }
    }
}

pub struct RosterEngine<S: Storage, C: ConfigProvider> {
    campus: Campus,
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> RosterEngine<S, C> {
    pub fn new(campus: Campus, storage: S, config: C) -> Self {
        Self {
            campus,
            storage,
            config,
        }
    }

    pub fn campus(&self) -> &Campus {
        &self.campus
    }

    pub fn run(&mut self, action: MenuAction, out: &mut dyn Write) -> Result<()> {
        tracing::debug!("Running {:?}", action);
        match action {
            MenuAction::ShowAll => self.show_all(out),
            MenuAction::HonorRoll => self.show_honor_roll(out),
            MenuAction::Demo => self.demonstrate(out),
            MenuAction::HighAverage => self.show_high_average(out),
            MenuAction::JuniorHonorRoll => self.show_junior_honor_roll(out),
            MenuAction::GroupAverages => self.show_group_averages(out),
            MenuAction::ListStudents => self.list_students(out),
            MenuAction::Save => self.save(out),
            MenuAction::Exit => Ok(()),
        }
    }

    fn show_all(&self, out: &mut dyn Write) -> Result<()> {
        if self.campus.is_empty() {
            writeln!(out, "No data.")?;
            return Ok(());
        }
        out.write_all(report::render_detailed(&self.campus).as_bytes())?;
        Ok(())
    }

    fn show_honor_roll(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "HONOR ROLL:\n==========")?;
        let found = queries::honor_roll(&self.campus);
        if found.is_empty() {
            writeln!(out, "No honor roll students found.")?;
        }
        for placement in found {
            out.write_all(placement.student.describe().as_bytes())?;
        }
        Ok(())
    }

    fn show_high_average(&self, out: &mut dyn Write) -> Result<()> {
        let threshold = self.config.average_threshold();
        writeln!(out, "Institutes and courses with average > {:.2}:", threshold)?;
        writeln!(out, "===========================================")?;
        let found = queries::courses_above(&self.campus, threshold);
        if found.is_empty() {
            writeln!(out, "No such institutes or courses found.")?;
        }
        for course in found {
            writeln!(
                out,
                "{}, course {}, average: {:.2}",
                course.institute, course.course, course.average
            )?;
        }
        Ok(())
    }

    fn show_junior_honor_roll(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Honor roll of courses 1-2:\n=====================")?;
        let found = queries::junior_honor_roll(&self.campus);
        if found.is_empty() {
            writeln!(out, "No honor roll students in courses 1-2.")?;
        }
        for placement in found {
            writeln!(
                out,
                "{}, course {}, group {}",
                placement.institute, placement.course, placement.group
            )?;
            out.write_all(placement.student.describe().as_bytes())?;
        }
        Ok(())
    }

    fn show_group_averages(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Group averages of courses 1-2:")?;
        let ranked = queries::junior_group_averages(&self.campus);
        if ranked.is_empty() {
            writeln!(out, "No groups in courses 1-2.")?;
        }
        for group in ranked {
            writeln!(
                out,
                "{}, {}, course {}: {:.2}",
                group.institute, group.group, group.course, group.average
            )?;
        }
        Ok(())
    }

    fn list_students(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "All students:")?;
        for institute in self.campus.institutes() {
            for course in institute.courses() {
                for group in course.groups() {
                    for student in group.borrow().students() {
                        writeln!(out, "{}, average: {:.2}", student.info(), student.average_grade())?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Export failures are reported on `out` and logged; they never end the session.
    fn save(&self, out: &mut dyn Write) -> Result<()> {
        let format = self.config.export_format();
        let written = report::render_export(&self.campus, format)
            .and_then(|data| self.storage.write_file(self.config.report_file(), &data));

        match written {
            Ok(path) => {
                tracing::info!("Saved {:?} report to {}", format, path.display());
                writeln!(out, "All data saved to '{}'", path.display())?;
            }
            Err(e) => {
                tracing::error!("Saving report failed: {} ({:?})", e, e.category());
                writeln!(out, "Error while saving: {}", e.user_friendly_message())?;
            }
        }
        Ok(())
    }

    /// Adds `value` to the first student named `last_name`. A rejected grade is
    /// reported and leaves the roster unchanged.
    pub fn add_grade(&mut self, last_name: &str, value: i64, out: &mut dyn Write) -> Result<()> {
        let Some((group, index)) = queries::find_student(&self.campus, last_name) else {
            writeln!(out, "Student {} not found.", last_name)?;
            return Ok(());
        };

        let mut group = group.borrow_mut();
        let student = &mut group.students_mut()[index];
        match student.add_grade(value) {
            Ok(grade) => writeln!(out, "Added grade {} to student {}", grade, student.last_name())?,
            Err(e) => {
                tracing::warn!("{}", e);
                writeln!(out, "Error: grade {} is not valid!", value)?;
            }
        }
        Ok(())
    }

    fn demonstrate(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "=== INTERFACES AND HANDLERS ===")?;
        let Some(first_group) = self.campus.group_at(0, 0, 0) else {
            writeln!(out, "No data.")?;
            return Ok(());
        };

        writeln!(out, "\n1. CAPABILITIES:")?;
        {
            let mut group = first_group.borrow_mut();
            if let Some(student) = group.students_mut().first_mut() {
                writeln!(out, "\n--- Describe ---")?;
                out.write_all(student.describe().as_bytes())?;

                writeln!(out, "\n--- Average ---")?;
                writeln!(out, "Average: {:.2}", student.average())?;

                writeln!(out, "\n--- GradeManager ---")?;
                writeln!(out, "Honor roll: {}", student.is_honor_roll())?;
                match student.add_grade(5) {
                    Ok(grade) => writeln!(out, "Added grade {} to student {}", grade, student.last_name())?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
                out.write_all(student.describe().as_bytes())?;
            }
        }

        writeln!(out, "\n--- Describe on aggregates ---")?;
        let institute = &self.campus.institutes()[0];
        let course = &institute.courses()[0];
        out.write_all(institute.describe().as_bytes())?;
        out.write_all(course.describe().as_bytes())?;
        out.write_all(first_group.borrow().describe().as_bytes())?;

        writeln!(out, "\n2. MULTICAST NOTIFIER:")?;
        let notifier = Notifier::demonstration();
        let mut transcript = String::new();
        notifier.apply_to_group(&mut first_group.borrow_mut(), &mut transcript);
        out.write_all(transcript.as_bytes())?;

        if let Some(group) = self.campus.group_at(1, 0, 0) {
            let mut group = group.borrow_mut();
            if let Some(student) = group.students_mut().get_mut(1) {
                writeln!(out, "\n--- Single student ---")?;
                let mut transcript = String::new();
                notifier.invoke(student, &mut transcript);
                out.write_all(transcript.as_bytes())?;
            }
        }
        Ok(())
    }
}
