//! Timeslot scheduling rules and their validity invariants.
//!
//! A [`TimeslotRule`] describes when a kiln may be loaded: a one-off date, or
//! a weekly pattern over selected weekdays, bounded by an end date or
//! open-ended. The engine treats rules as read-only input; the booking layer
//! owns creation and storage.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleError};
use crate::weekday::{resolve_weekdays, weekday_name, WeekdaySet};

/// How a timeslot rule repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    /// A single occurrence on the rule's start date only.
    Once,
    /// Repeats weekly on the selected weekdays, from the start date through
    /// the end date.
    WeeklyUntil,
    /// Repeats weekly on the selected weekdays from the start date, with no
    /// end.
    WeeklyForever,
}

/// A kiln booking rule: when the kiln may be loaded, and how that repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotRule {
    /// The kiln this rule governs. Collision checks only make sense between
    /// rules sharing a kiln; the caller scopes the existing set accordingly.
    pub kiln_id: String,
    pub recurrence: Recurrence,
    /// Sole occurrence date for [`Recurrence::Once`]; first recurrence date
    /// otherwise.
    pub start_date: NaiveDate,
    /// Last recurrence date. Required for [`Recurrence::WeeklyUntil`] and
    /// ignored otherwise (the booking form clears it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Weekdays the rule applies to. Ignored for [`Recurrence::Once`], where
    /// the weekday is derived from `start_date`.
    #[serde(default, skip_serializing_if = "WeekdaySet::is_empty")]
    pub weekdays: WeekdaySet,
    /// The cutoff after which the kiln may be loaded on an applicable day.
    pub load_after: NaiveTime,
}

/// A rule's combined date-time boundaries, classified by recurrence.
///
/// Each boundary is the rule's date at its load-after time; collision
/// comparisons all run on these combined values. Building a `Span` validates
/// the rule's shape, so the detector can dispatch on the variant pair without
/// re-checking field presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// One occurrence.
    Once { start: NaiveDateTime },
    /// Weekly between two bounds.
    Until {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Weekly, open-ended.
    Forever { start: NaiveDateTime },
}

impl Span {
    /// The rule's first load datetime.
    pub fn start(&self) -> NaiveDateTime {
        match *self {
            Span::Once { start } | Span::Until { start, .. } | Span::Forever { start } => start,
        }
    }
}

impl TimeslotRule {
    /// A one-off rule for a single date.
    pub fn once(kiln_id: impl Into<String>, date: NaiveDate, load_after: NaiveTime) -> Self {
        TimeslotRule {
            kiln_id: kiln_id.into(),
            recurrence: Recurrence::Once,
            start_date: date,
            end_date: None,
            weekdays: WeekdaySet::EMPTY,
            load_after,
        }
    }

    /// A weekly rule bounded by an end date.
    pub fn weekly_until(
        kiln_id: impl Into<String>,
        weekdays: WeekdaySet,
        start_date: NaiveDate,
        end_date: NaiveDate,
        load_after: NaiveTime,
    ) -> Self {
        TimeslotRule {
            kiln_id: kiln_id.into(),
            recurrence: Recurrence::WeeklyUntil,
            start_date,
            end_date: Some(end_date),
            weekdays,
            load_after,
        }
    }

    /// A weekly rule with no end date.
    pub fn weekly_forever(
        kiln_id: impl Into<String>,
        weekdays: WeekdaySet,
        start_date: NaiveDate,
        load_after: NaiveTime,
    ) -> Self {
        TimeslotRule {
            kiln_id: kiln_id.into(),
            recurrence: Recurrence::WeeklyForever,
            start_date,
            end_date: None,
            weekdays,
            load_after,
        }
    }

    /// The rule's [`Span`], validating the data-model invariants on the way.
    ///
    /// # Errors
    ///
    /// Recurring rules need a non-empty weekday set containing the weekday of
    /// `start_date`; [`Recurrence::WeeklyUntil`] additionally needs an
    /// `end_date` strictly after the start whose weekday is also selected.
    pub fn span(&self) -> Result<Span> {
        let start = self.start_date.and_time(self.load_after);
        match self.recurrence {
            Recurrence::Once => Ok(Span::Once { start }),
            Recurrence::WeeklyUntil => {
                self.check_pattern_day(self.start_date, "start date")?;
                let end_date = self.end_date.ok_or_else(|| {
                    RuleError::MissingEndDate(format!(
                        "bounded weekly rule on kiln '{}' has no end date",
                        self.kiln_id
                    ))
                })?;
                if end_date <= self.start_date {
                    return Err(RuleError::EndNotAfterStart(format!(
                        "{} .. {}",
                        self.start_date, end_date
                    )));
                }
                self.check_pattern_day(end_date, "end date")?;
                Ok(Span::Until {
                    start,
                    end: end_date.and_time(self.load_after),
                })
            }
            Recurrence::WeeklyForever => {
                self.check_pattern_day(self.start_date, "start date")?;
                Ok(Span::Forever { start })
            }
        }
    }

    /// Check the rule against the data-model invariants.
    pub fn validate(&self) -> Result<()> {
        self.span().map(|_| ())
    }

    /// The rule's applicable weekdays, derived from `start_date` when no
    /// explicit set is given.
    pub fn resolved_weekdays(&self) -> WeekdaySet {
        resolve_weekdays(self.weekdays, self.start_date)
    }

    fn check_pattern_day(&self, date: NaiveDate, which: &str) -> Result<()> {
        if self.weekdays.is_empty() {
            return Err(RuleError::MissingWeekdays(format!(
                "weekly rule on kiln '{}' selects no weekdays",
                self.kiln_id
            )));
        }
        let day = date.weekday();
        if !self.weekdays.contains(day) {
            return Err(RuleError::DateOffPattern(format!(
                "{which} {date} falls on {}, not one of {}",
                weekday_name(day),
                self.weekdays
            )));
        }
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
