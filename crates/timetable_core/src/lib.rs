//! Core of the timetable generator.
//!
//! Random (subject, teacher) assignment into a day × period grid, per-class
//! persistence in SQLite, and the grid projection shown by the desktop app.

pub mod config;
pub mod db;
pub mod generator;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{ConfigError, ScheduleConfig, TeacherMap, ViewLayout};
pub use generator::{generate_timetable, GenerateError, TimetableGenerator};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::timetable::{Assignment, ScheduleRow, SlotError, Timetable, TimetableCell};
pub use repo::schedule_repo::{
    RepoError, RepoResult, ScheduleRepository, SqliteScheduleRepository,
};
pub use service::schedule_service::{
    GenerateOutcome, ScheduleService, ScheduleServiceError, ServiceResult,
    NO_CLASS_SELECTED_MESSAGE,
};
pub use view::{TimetableView, ViewRow, EMPTY_CELL};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
