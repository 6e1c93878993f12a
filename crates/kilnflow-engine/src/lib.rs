//! # kilnflow-engine
//!
//! Deterministic timeslot collision detection for shared kiln schedules.
//!
//! Pottery studios hand out kiln time under scheduling rules: a one-off
//! firing date, or a weekly pattern over selected weekdays, bounded by an
//! end date or open-ended. A kiln loaded at its cutoff stays occupied for a
//! full firing cycle, so two rules on the same kiln conflict when their load
//! times land within 24 hours of each other, directly or across adjacent
//! weekdays. The engine takes a candidate rule plus a snapshot of the kiln's
//! existing rules and reports every conflict with stable warning codes;
//! whether a warned submission still saves is the booking layer's decision.
//!
//! # Design Principle
//!
//! The engine is a pure function of its inputs: no clock access, no storage,
//! no side effects. The caller fetches the existing rules (one consistent
//! read, scoped to a single kiln) and serializes concurrent writes at the
//! storage layer; the engine only reports conflicts against the snapshot it
//! was given.
//!
//! # Modules
//!
//! - [`rule`] — Scheduling rule model, validity invariants, recurrence spans
//! - [`weekday`] — Weekday sets and resolution from anchor dates
//! - [`proximity`] — 24-hour separation and adjacent-day load-time checks
//! - [`conflict`] — The collision detector and its warning taxonomy
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod proximity;
pub mod rule;
pub mod weekday;

pub use conflict::{detect_collisions, Collision, Warning};
pub use error::RuleError;
pub use proximity::{adjacent_load_conflict, too_close, within_window};
pub use rule::{Recurrence, Span, TimeslotRule};
pub use weekday::{parse_weekday, resolve_weekdays, weekday_name, WeekdaySet};
