//! Schedule repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Replace and load the rows of one class in the flat `timetable` table.
//!
//! # Invariants
//! - `replace_class_schedule` deletes and inserts inside one immediate
//!   transaction.
//! - Rows of other classes are never touched by a write for one class.
//! - Read paths reject rows with a non-positive period instead of masking
//!   them.

use crate::db::DbError;
use crate::model::timetable::{ScheduleRow, Timetable};
use log::{error, info};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const TIMETABLE_TABLE: &str = "timetable";
const TIMETABLE_COLUMNS: [&str; 5] = ["class", "day", "period", "subject", "teacher"];

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Class name is empty after trimming.
    InvalidClassName,
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidClassName => write!(f, "class name cannot be blank"),
            Self::InvalidData(message) => write!(f, "invalid persisted timetable row: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store operations for per-class schedules.
pub trait ScheduleRepository {
    /// Deletes every row for `class_name`, then inserts one row per populated
    /// slot of `grid`. Returns the number of rows inserted.
    fn replace_class_schedule(&mut self, class_name: &str, grid: &Timetable) -> RepoResult<usize>;
    /// Returns every row stored for `class_name` in insertion order.
    fn load_class_schedule(&self, class_name: &str) -> RepoResult<Vec<ScheduleRow>>;
    /// Distinct class names that currently have rows, sorted ascending.
    fn list_classes(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed schedule repository borrowing an open connection.
pub struct SqliteScheduleRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteScheduleRepository<'conn> {
    /// Wraps a connection after checking that the `timetable` table has the
    /// expected columns.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_timetable_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ScheduleRepository for SqliteScheduleRepository<'_> {
    fn replace_class_schedule(&mut self, class_name: &str, grid: &Timetable) -> RepoResult<usize> {
        ensure_class_name(class_name)?;
        let started_at = Instant::now();

        let result = write_class_rows(self.conn, class_name, grid);

        match result {
            Ok((deleted, inserted)) => {
                info!(
                    "event=schedule_replace module=repo status=ok class={class_name} deleted={deleted} inserted={inserted} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(inserted)
            }
            Err(err) => {
                error!(
                    "event=schedule_replace module=repo status=error class={class_name} duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn load_class_schedule(&self, class_name: &str) -> RepoResult<Vec<ScheduleRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT class, day, period, subject, teacher
             FROM timetable
             WHERE class = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([class_name])?;
        let mut schedule = Vec::new();
        while let Some(row) = rows.next()? {
            schedule.push(parse_schedule_row(row)?);
        }

        info!(
            "event=schedule_load module=repo status=ok class={class_name} rows={}",
            schedule.len()
        );
        Ok(schedule)
    }

    fn list_classes(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT class
             FROM timetable
             WHERE class IS NOT NULL
             ORDER BY class ASC;",
        )?;
        let classes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(classes)
    }
}

fn write_class_rows(
    conn: &mut Connection,
    class_name: &str,
    grid: &Timetable,
) -> RepoResult<(usize, usize)> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let deleted = tx.execute("DELETE FROM timetable WHERE class = ?1;", [class_name])?;

    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO timetable (class, day, period, subject, teacher)
             VALUES (?1, ?2, ?3, ?4, ?5);",
        )?;
        for cell in grid.cells() {
            inserted += stmt.execute(params![
                class_name,
                cell.day,
                cell.period,
                cell.subject,
                cell.teacher,
            ])?;
        }
    }

    tx.commit()?;
    Ok((deleted, inserted))
}

fn parse_schedule_row(row: &Row<'_>) -> RepoResult<ScheduleRow> {
    let period = match row.get::<_, Option<i64>>("period")? {
        Some(value) if value >= 1 => u32::try_from(value).map_err(|_| {
            RepoError::InvalidData(format!("period `{value}` does not fit in timetable.period"))
        })?,
        Some(value) => {
            return Err(RepoError::InvalidData(format!(
                "period `{value}` must be at least 1 in timetable.period"
            )));
        }
        None => {
            return Err(RepoError::InvalidData(
                "null period in timetable.period".to_string(),
            ));
        }
    };

    Ok(ScheduleRow {
        class_name: row.get("class")?,
        day: text_or_empty(row, "day")?,
        period,
        subject: text_or_empty(row, "subject")?,
        teacher: text_or_empty(row, "teacher")?,
    })
}

// Columns are nullable in the adopted schema.
fn text_or_empty(row: &Row<'_>, column: &str) -> RepoResult<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn ensure_class_name(class_name: &str) -> RepoResult<()> {
    if class_name.trim().is_empty() {
        return Err(RepoError::InvalidClassName);
    }
    Ok(())
}

fn ensure_timetable_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, TIMETABLE_TABLE)? {
        return Err(RepoError::MissingRequiredTable(TIMETABLE_TABLE));
    }
    for column in TIMETABLE_COLUMNS {
        if !table_has_column(conn, TIMETABLE_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: TIMETABLE_TABLE,
                column,
            });
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names.iter().any(|name| name == column))
}
