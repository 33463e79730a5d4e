//! # daybook-core
//!
//! Core types and client-side rules for Daybook.
//!
//! This crate performs no I/O against the backend. It provides:
//! - Entity structs for every backend resource (entries, blocks, habits,
//!   logs, questions, reflections, statistics)
//! - Enums shared across crates, including the session state machine
//! - The ordered content-block list used to compose diary entries
//! - Grouping of entries by local calendar day
//! - Habit completion and daily progress
//! - Assembly of reflection submissions from answers
//! - Cross-cutting error types and the error taxonomy
//! - CLI response types

pub mod answers;
pub mod blocks;
pub mod calendar;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod habits;
pub mod identity;
pub mod responses;
