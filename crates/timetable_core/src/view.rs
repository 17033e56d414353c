//! Grid projection of persisted rows for display.
//!
//! One row per period, one column per day, preceded by a `Period` label
//! column. A slot with no persisted row renders as [`EMPTY_CELL`].

use crate::model::timetable::{ScheduleRow, Timetable};
use serde::Serialize;

/// Text shown for a slot that has no persisted row.
pub const EMPTY_CELL: &str = "Empty";
/// Header of the leading period label column.
pub const PERIOD_HEADER: &str = "Period";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    /// `Period N`.
    pub label: String,
    /// One entry per day, `subject\nteacher` or [`EMPTY_CELL`].
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableView {
    pub class_name: String,
    /// `Period` followed by every day label.
    pub headers: Vec<String>,
    pub rows: Vec<ViewRow>,
}

impl TimetableView {
    /// Projects persisted rows onto the configured days and periods.
    ///
    /// Rows are matched by (day, period); when several rows share a slot the
    /// first one returned by the store is shown.
    pub fn from_rows<S: AsRef<str>>(
        class_name: &str,
        days: &[S],
        periods_per_day: u32,
        rows: Vec<ScheduleRow>,
    ) -> Self {
        let grid = Timetable::from_cells(
            days,
            periods_per_day,
            rows.into_iter().map(ScheduleRow::into_cell),
        );

        let headers = std::iter::once(PERIOD_HEADER.to_string())
            .chain(days.iter().map(|day| day.as_ref().to_string()))
            .collect();

        let rows = (1..=periods_per_day)
            .map(|period| ViewRow {
                label: format!("{PERIOD_HEADER} {period}"),
                cells: days
                    .iter()
                    .map(|day| match grid.get(day.as_ref(), period) {
                        Some(assignment) => {
                            format!("{}\n{}", assignment.subject, assignment.teacher)
                        }
                        None => EMPTY_CELL.to_string(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            class_name: class_name.to_string(),
            headers,
            rows,
        }
    }

    /// Day column headers without the leading period label.
    pub fn day_headers(&self) -> &[String] {
        self.headers.get(1..).unwrap_or_default()
    }

    /// Number of slots that are not [`EMPTY_CELL`].
    pub fn filled_slots(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|cell| cell.as_str() != EMPTY_CELL)
            .count()
    }
}
