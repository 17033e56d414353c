//! Use-case orchestration for the timetable form.
//!
//! # Responsibility
//! - Run generate → replace → reload → project as one action.
//! - Keep the UI layer free of SQL and generation details.

pub mod schedule_service;
