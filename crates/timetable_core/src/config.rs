//! Static schedule configuration.
//!
//! # Responsibility
//! - Enumerate days, periods, subjects, teachers and selectable classes once.
//! - Reject incomplete teacher maps before any generation can run.
//!
//! # Invariants
//! - `days`, `subjects` and `class_names` are non-empty and contain no blank
//!   or duplicate labels.
//! - `periods_per_day >= 1`.
//! - Every subject maps to at least one non-blank teacher.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Teacher candidates keyed by subject name.
pub type TeacherMap = BTreeMap<String, Vec<String>>;

const STANDARD_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];
const STANDARD_PERIODS_PER_DAY: u32 = 8;
const STANDARD_CLASSES: [&str; 3] = ["Class 12", "Class 11", "Class 10"];
const STANDARD_TEACHERS: [(&str, &[&str]); 4] = [
    ("Math", &["Mr. Smith", "Ms. Johnson"]),
    ("Science", &["Mr. Brown", "Ms. Davis"]),
    ("History", &["Mr. Wilson"]),
    ("English", &["Ms. Miller"]),
];

/// Error returned when a schedule configuration is incomplete or ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NoDays,
    NoPeriods,
    NoSubjects,
    NoClasses,
    /// A day, subject or class label is empty after trimming.
    BlankLabel(&'static str),
    /// The same label appears twice in one list.
    DuplicateLabel { list: &'static str, label: String },
    /// A subject has no entry in the teacher map.
    MissingTeachers(String),
    /// A subject maps to an empty list or to a blank teacher name.
    NoTeachers(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDays => write!(f, "schedule needs at least one day"),
            Self::NoPeriods => write!(f, "schedule needs at least one period per day"),
            Self::NoSubjects => write!(f, "schedule needs at least one subject"),
            Self::NoClasses => write!(f, "schedule needs at least one class"),
            Self::BlankLabel(list) => write!(f, "blank label in {list}"),
            Self::DuplicateLabel { list, label } => {
                write!(f, "duplicate label `{label}` in {list}")
            }
            Self::MissingTeachers(subject) => {
                write!(f, "subject `{subject}` has no entry in the teacher map")
            }
            Self::NoTeachers(subject) => {
                write!(f, "subject `{subject}` has no usable teacher")
            }
        }
    }
}

impl Error for ConfigError {}

/// Validated description of one school week.
///
/// Construct with [`ScheduleConfig::try_new`] or [`ScheduleConfig::standard`];
/// fields are private so an unvalidated value cannot reach the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleConfig {
    days: Vec<String>,
    periods_per_day: u32,
    subjects: Vec<String>,
    teachers: TeacherMap,
    class_names: Vec<String>,
}

impl ScheduleConfig {
    /// Builds a configuration after checking every invariant listed above.
    ///
    /// # Errors
    /// - Returns the first [`ConfigError`] found, checking days, periods,
    ///   subjects, teachers and classes in that order.
    pub fn try_new(
        days: Vec<String>,
        periods_per_day: u32,
        subjects: Vec<String>,
        teachers: TeacherMap,
        class_names: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if days.is_empty() {
            return Err(ConfigError::NoDays);
        }
        check_labels("days", &days)?;
        if periods_per_day == 0 {
            return Err(ConfigError::NoPeriods);
        }
        if subjects.is_empty() {
            return Err(ConfigError::NoSubjects);
        }
        check_labels("subjects", &subjects)?;
        for subject in &subjects {
            let candidates = teachers
                .get(subject)
                .ok_or_else(|| ConfigError::MissingTeachers(subject.clone()))?;
            if candidates.is_empty() || candidates.iter().any(|t| t.trim().is_empty()) {
                return Err(ConfigError::NoTeachers(subject.clone()));
            }
        }
        if class_names.is_empty() {
            return Err(ConfigError::NoClasses);
        }
        check_labels("class_names", &class_names)?;

        Ok(Self {
            days,
            periods_per_day,
            subjects,
            teachers,
            class_names,
        })
    }

    /// The built-in school week: five weekdays, eight periods, four subjects.
    pub fn standard() -> Self {
        let teachers = STANDARD_TEACHERS
            .iter()
            .map(|(subject, names)| {
                (
                    (*subject).to_string(),
                    names.iter().map(|name| (*name).to_string()).collect(),
                )
            })
            .collect::<TeacherMap>();

        Self {
            days: to_owned_labels(&STANDARD_DAYS),
            periods_per_day: STANDARD_PERIODS_PER_DAY,
            subjects: STANDARD_TEACHERS
                .iter()
                .map(|(subject, _)| (*subject).to_string())
                .collect(),
            teachers,
            class_names: to_owned_labels(&STANDARD_CLASSES),
        }
    }

    pub fn days(&self) -> &[String] {
        &self.days
    }

    pub fn periods_per_day(&self) -> u32 {
        self.periods_per_day
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn teachers(&self) -> &TeacherMap {
        &self.teachers
    }

    /// Classes offered by the selector, in display order.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Pixel sizes and captions used by the grid view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewLayout {
    pub window_title: &'static str,
    /// Tall enough for two lines of cell text.
    pub row_height: f32,
    pub day_column_width: f32,
    pub period_column_width: f32,
}

impl ViewLayout {
    pub const STANDARD: Self = Self {
        window_title: "Timetable Generator",
        row_height: 40.0,
        day_column_width: 150.0,
        period_column_width: 100.0,
    };
}

impl Default for ViewLayout {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn check_labels(list: &'static str, labels: &[String]) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for label in labels {
        if label.trim().is_empty() {
            return Err(ConfigError::BlankLabel(list));
        }
        if !seen.insert(label.as_str()) {
            return Err(ConfigError::DuplicateLabel {
                list,
                label: label.clone(),
            });
        }
    }
    Ok(())
}

fn to_owned_labels(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_string()).collect()
}
