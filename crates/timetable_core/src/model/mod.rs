//! Value types shared by the generator, the store and the view.
//!
//! # Invariants
//! - Periods are 1-based everywhere.
//! - A `Timetable` never outlives one generate → persist → render cycle.

pub mod timetable;
