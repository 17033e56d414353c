//! Random timetable generation.
//!
//! Every (day, period) slot is filled independently: a subject is drawn
//! uniformly from the subject list, then a teacher uniformly from that
//! subject's candidates. There is no balancing and no conflict checking.

use crate::config::{ScheduleConfig, TeacherMap};
use crate::model::timetable::{Timetable, TimetableCell};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    NoDays,
    NoPeriods,
    NoSubjects,
    /// The same day label appears twice.
    DuplicateDay(String),
    /// The drawn subject has no entry in the teacher map.
    MissingTeachers(String),
    /// The drawn subject maps to an empty candidate list.
    NoTeachers(String),
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDays => write!(f, "cannot generate a timetable without days"),
            Self::NoPeriods => write!(f, "cannot generate a timetable without periods"),
            Self::NoSubjects => write!(f, "cannot generate a timetable without subjects"),
            Self::DuplicateDay(day) => write!(f, "day `{day}` is listed more than once"),
            Self::MissingTeachers(subject) => {
                write!(f, "subject `{subject}` is missing from the teacher map")
            }
            Self::NoTeachers(subject) => write!(f, "subject `{subject}` has no teachers"),
        }
    }
}

impl Error for GenerateError {}

/// Fills a fresh grid for `days` × `periods_per_day`.
///
/// # Errors
/// - Fails fast on empty inputs and on repeated day labels.
/// - Fails with the offending subject when a drawn subject has no teacher
///   candidates; no slot is ever left blank.
pub fn generate_timetable<S, R>(
    days: &[S],
    periods_per_day: u32,
    subjects: &[String],
    teachers: &TeacherMap,
    rng: &mut R,
) -> Result<Timetable, GenerateError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if days.is_empty() {
        return Err(GenerateError::NoDays);
    }
    if periods_per_day == 0 {
        return Err(GenerateError::NoPeriods);
    }
    let mut seen_days = BTreeSet::new();
    for day in days {
        if !seen_days.insert(day.as_ref()) {
            return Err(GenerateError::DuplicateDay(day.as_ref().to_string()));
        }
    }

    let started_at = Instant::now();
    let mut cells = Vec::new();

    for day in days {
        let day = day.as_ref();
        for period in 1..=periods_per_day {
            let subject = subjects.choose(rng).ok_or(GenerateError::NoSubjects)?;
            let candidates = teachers
                .get(subject)
                .ok_or_else(|| GenerateError::MissingTeachers(subject.clone()))?;
            let teacher = candidates
                .choose(rng)
                .ok_or_else(|| GenerateError::NoTeachers(subject.clone()))?;
            debug!("event=slot_fill module=generator day={day} period={period} subject={subject}");
            cells.push(TimetableCell {
                day: day.to_string(),
                period,
                subject: subject.clone(),
                teacher: teacher.clone(),
            });
        }
    }
    let grid = Timetable::from_cells(days, periods_per_day, cells);

    info!(
        "event=timetable_generate module=generator status=ok days={} periods={} duration_ms={}",
        days.len(),
        periods_per_day,
        started_at.elapsed().as_millis()
    );
    Ok(grid)
}

/// Generator bound to a validated [`ScheduleConfig`].
pub struct TimetableGenerator<'cfg> {
    config: &'cfg ScheduleConfig,
}

impl<'cfg> TimetableGenerator<'cfg> {
    pub fn new(config: &'cfg ScheduleConfig) -> Self {
        Self { config }
    }

    /// Produces a complete grid. Cannot fail for a config built through
    /// `ScheduleConfig::try_new`, but the error is still surfaced.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Timetable, GenerateError> {
        generate_timetable(
            self.config.days(),
            self.config.periods_per_day(),
            self.config.subjects(),
            self.config.teachers(),
            rng,
        )
    }
}
