//! In-memory timetable grid and the persisted row shape.
//!
//! # Responsibility
//! - Hold one generation run as ordered days × periods of optional
//!   assignments.
//! - Flatten to cells for persistence and reassemble from persisted rows.
//!
//! # Invariants
//! - Day order is the order the grid was created with.
//! - `period` is in `1..=periods_per_day` for every stored slot.

use log::debug;
use serde::{Deserialize, Serialize};

/// Subject and teacher placed into one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub subject: String,
    pub teacher: String,
}

impl Assignment {
    pub fn new(subject: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            teacher: teacher.into(),
        }
    }
}

/// One populated slot, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableCell {
    pub day: String,
    /// 1-based period number.
    pub period: u32,
    pub subject: String,
    pub teacher: String,
}

/// One row of the `timetable` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Stored in the `class` column.
    pub class_name: String,
    pub day: String,
    pub period: u32,
    pub subject: String,
    pub teacher: String,
}

impl ScheduleRow {
    /// Drops the class name, keeping the slot coordinates and assignment.
    pub fn into_cell(self) -> TimetableCell {
        TimetableCell {
            day: self.day,
            period: self.period,
            subject: self.subject,
            teacher: self.teacher,
        }
    }
}

/// Slot addressing failure for [`Timetable::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    UnknownDay(String),
    PeriodOutOfRange { period: u32, periods_per_day: u32 },
}

impl std::fmt::Display for SlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDay(day) => write!(f, "day `{day}` is not part of this timetable"),
            Self::PeriodOutOfRange {
                period,
                periods_per_day,
            } => write!(f, "period {period} is outside 1..={periods_per_day}"),
        }
    }
}

impl std::error::Error for SlotError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DaySlots {
    day: String,
    slots: Vec<Option<Assignment>>,
}

/// Day × period grid produced by one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    periods_per_day: u32,
    days: Vec<DaySlots>,
}

impl Timetable {
    /// Creates a grid with every slot unassigned.
    pub fn empty<S: AsRef<str>>(days: &[S], periods_per_day: u32) -> Self {
        let days = days
            .iter()
            .map(|day| DaySlots {
                day: day.as_ref().to_string(),
                slots: vec![None; periods_per_day as usize],
            })
            .collect();
        Self {
            periods_per_day,
            days,
        }
    }

    /// Rebuilds a grid from flattened cells.
    ///
    /// Cells for unknown days or out-of-range periods are dropped. When two
    /// cells address the same slot the first one wins, matching how the view
    /// picks the first persisted row for a slot.
    pub fn from_cells<S, I>(days: &[S], periods_per_day: u32, cells: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = TimetableCell>,
    {
        let mut grid = Self::empty(days, periods_per_day);
        for cell in cells {
            if grid.get(&cell.day, cell.period).is_some() {
                continue;
            }
            if let Err(err) = grid.set(
                &cell.day,
                cell.period,
                Assignment::new(cell.subject, cell.teacher),
            ) {
                debug!("event=cell_drop module=model status=skip reason={err}");
            }
        }
        grid
    }

    pub fn periods_per_day(&self) -> u32 {
        self.periods_per_day
    }

    /// Day labels in grid order.
    pub fn days(&self) -> impl Iterator<Item = &str> {
        self.days.iter().map(|entry| entry.day.as_str())
    }

    /// Places `assignment` into one slot, replacing whatever was there.
    pub fn set(&mut self, day: &str, period: u32, assignment: Assignment) -> Result<(), SlotError> {
        let periods_per_day = self.periods_per_day;
        if !self.days.iter().any(|entry| entry.day == day) {
            return Err(SlotError::UnknownDay(day.to_string()));
        }
        let slot = self
            .slot_mut(day, period)
            .ok_or(SlotError::PeriodOutOfRange {
                period,
                periods_per_day,
            })?;
        *slot = Some(assignment);
        Ok(())
    }

    pub fn get(&self, day: &str, period: u32) -> Option<&Assignment> {
        let index = period_index(period, self.periods_per_day)?;
        self.days
            .iter()
            .find(|entry| entry.day == day)
            .and_then(|entry| entry.slots[index].as_ref())
    }

    /// Populated slots in day order, then period order.
    pub fn cells(&self) -> Vec<TimetableCell> {
        let mut cells = Vec::new();
        for entry in &self.days {
            for (index, slot) in entry.slots.iter().enumerate() {
                if let Some(assignment) = slot {
                    cells.push(TimetableCell {
                        day: entry.day.clone(),
                        period: index as u32 + 1,
                        subject: assignment.subject.clone(),
                        teacher: assignment.teacher.clone(),
                    });
                }
            }
        }
        cells
    }

    pub fn populated_len(&self) -> usize {
        self.days
            .iter()
            .map(|entry| entry.slots.iter().filter(|slot| slot.is_some()).count())
            .sum()
    }

    /// Whether every (day, period) slot holds an assignment.
    pub fn is_complete(&self) -> bool {
        self.populated_len() == self.days.len() * self.periods_per_day as usize
    }

    fn slot_mut(&mut self, day: &str, period: u32) -> Option<&mut Option<Assignment>> {
        let index = period_index(period, self.periods_per_day)?;
        self.days
            .iter_mut()
            .find(|entry| entry.day == day)
            .map(|entry| &mut entry.slots[index])
    }
}

fn period_index(period: u32, periods_per_day: u32) -> Option<usize> {
    if period == 0 || period > periods_per_day {
        return None;
    }
    Some(period as usize - 1)
}
