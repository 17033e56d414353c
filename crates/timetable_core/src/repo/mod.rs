//! Persistence contracts for class schedules.
//!
//! # Responsibility
//! - Define the store operations the service layer relies on.
//! - Keep SQL inside the core crate.
//!
//! # Invariants
//! - For one class there is at most one row per (day, period); this is kept
//!   by replacing a class's rows wholesale, not by a table constraint.

pub mod schedule_repo;
