//! Collision detection between a candidate rule and a kiln's existing rules.
//!
//! The detector is a pure function: it reads the candidate and a snapshot of
//! the kiln's stored rules and reports every conflicting pair with stable
//! warning codes. It never decides acceptance; whether a warned submission
//! still saves is the booking layer's call.
//!
//! Each pairing of recurrence classes gets its own dispatch arm, composed
//! from the shared primitives: a universal start-vs-start proximity rule,
//! per-arm boundary proximity checks, and a containment gate deciding
//! whether the weekday-overlap and load-time checks apply at all.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::proximity::{adjacent_load_conflict, too_close};
use crate::rule::{Span, TimeslotRule};
use crate::weekday::WeekdaySet;

/// A collision warning, identified by a stable code.
///
/// Serializes as a `snake_case` identifier so callers can filter or localize
/// without matching on display text; [`Warning::message`] carries the
/// ready-made English wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// The two rules' dates (or start dates) load within 24 hours of each
    /// other. Checked for every pair regardless of recurrence.
    StartProximity,
    /// The candidate's end date loads within 24 hours of the existing rule's
    /// date.
    EndVsStartProximity,
    /// The candidate's recurring weekdays cover the existing rule's single
    /// date.
    WeekdayOverlapVsSingleDate,
    /// The candidate's recurring weekdays overlap the existing rule's.
    WeekdayOverlapVsRecurring,
    /// The candidate's date (or start date) loads within 24 hours of the
    /// existing rule's end date.
    StartVsEndProximity,
    /// The candidate's single date lands on one of the existing rule's
    /// recurring weekdays.
    SingleDateOverlapVsRecurringWeekdays,
    /// The candidate's end date loads within 24 hours of the existing rule's
    /// opposite boundary.
    EndVsStartProximityReverse,
    /// The two rules' load-after times fall within 24 hours of each other
    /// across adjacent weekdays.
    LoadTimeAdjacency,
}

impl Warning {
    /// The stable identifier, identical to the serde representation.
    pub fn code(self) -> &'static str {
        match self {
            Warning::StartProximity => "start_proximity",
            Warning::EndVsStartProximity => "end_vs_start_proximity",
            Warning::WeekdayOverlapVsSingleDate => "weekday_overlap_vs_single_date",
            Warning::WeekdayOverlapVsRecurring => "weekday_overlap_vs_recurring",
            Warning::StartVsEndProximity => "start_vs_end_proximity",
            Warning::SingleDateOverlapVsRecurringWeekdays => {
                "single_date_overlap_vs_recurring_weekdays"
            }
            Warning::EndVsStartProximityReverse => "end_vs_start_proximity_reverse",
            Warning::LoadTimeAdjacency => "load_time_adjacency",
        }
    }

    /// Ready-made English wording for direct display to a studio owner.
    pub fn message(self) -> &'static str {
        match self {
            Warning::StartProximity => {
                "The submitted date (or start date) is within 24 hours of this timeslot's date (or start date)."
            }
            Warning::EndVsStartProximity => {
                "The submitted end date is within 24 hours of this timeslot's date."
            }
            Warning::WeekdayOverlapVsSingleDate => {
                "The submitted recurring weekdays would cover this timeslot's date."
            }
            Warning::WeekdayOverlapVsRecurring => {
                "The submitted recurring weekdays overlap (some of) this timeslot's recurring weekdays."
            }
            Warning::StartVsEndProximity => {
                "The submitted date (or start date) is within 24 hours of this timeslot's end date."
            }
            Warning::SingleDateOverlapVsRecurringWeekdays => {
                "The submitted date lands on one of this timeslot's recurring weekdays."
            }
            Warning::EndVsStartProximityReverse => {
                "The submitted end date is within 24 hours of this timeslot's start date."
            }
            Warning::LoadTimeAdjacency => {
                "The submitted load-after time is within 24 hours of this timeslot's load-after time."
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One conflicting existing rule together with every warning it triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    /// Warnings in the order the checks emitted them. Not deduplicated.
    pub warnings: Vec<Warning>,
    /// The stored rule the candidate collides with.
    pub rule: TimeslotRule,
}

/// Check a candidate rule against a kiln's existing rules.
///
/// Returns one [`Collision`] per conflicting existing rule, in the order the
/// existing rules were supplied; an empty report means the candidate is safe
/// to persist. The caller supplies a snapshot already scoped to one
/// (studio, kiln) pair; the detector trusts the input and does not filter
/// by kiln itself.
///
/// # Errors
///
/// Returns a [`crate::RuleError`] if the candidate or any existing rule
/// violates the data-model invariants. Every rule is validated up front, so
/// no comparisons run against invalid input.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use kilnflow_engine::{detect_collisions, TimeslotRule, Warning};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let load = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
/// let candidate = TimeslotRule::once("kiln-1", date, load);
/// let existing = vec![TimeslotRule::once("kiln-1", date, load)];
///
/// let report = detect_collisions(&candidate, &existing).unwrap();
/// assert_eq!(report[0].warnings, vec![Warning::StartProximity]);
/// ```
pub fn detect_collisions(
    candidate: &TimeslotRule,
    existing: &[TimeslotRule],
) -> Result<Vec<Collision>> {
    let cand_span = candidate.span()?;
    let cand_days = candidate.resolved_weekdays();
    let spans: Vec<Span> = existing
        .iter()
        .map(TimeslotRule::span)
        .collect::<Result<_>>()?;

    let mut report = Vec::new();
    for (saved, saved_span) in existing.iter().zip(spans) {
        let saved_days = saved.resolved_weekdays();
        let mut warnings = Vec::new();

        // Universal rule: start dates may never load within a day of each
        // other, whatever the recurrence classes.
        if too_close(cand_span.start(), saved_span.start()) {
            warnings.push(Warning::StartProximity);
        }

        match (cand_span, saved_span) {
            (Span::Once { .. }, Span::Once { .. }) => {}

            (
                Span::Until {
                    start: cand_start,
                    end: cand_end,
                },
                Span::Once { start: saved_start },
            ) => {
                if too_close(cand_end, saved_start) {
                    warnings.push(Warning::EndVsStartProximity);
                }
                if saved_start > cand_start && saved_start < cand_end {
                    gated_checks(
                        Warning::WeekdayOverlapVsSingleDate,
                        cand_days,
                        candidate.load_after,
                        saved_days,
                        saved.load_after,
                        &mut warnings,
                    );
                }
            }

            (Span::Forever { start: cand_start }, Span::Once { start: saved_start }) => {
                if saved_start > cand_start {
                    gated_checks(
                        Warning::WeekdayOverlapVsSingleDate,
                        cand_days,
                        candidate.load_after,
                        saved_days,
                        saved.load_after,
                        &mut warnings,
                    );
                }
            }

            (
                Span::Once { start: cand_start },
                Span::Until {
                    start: saved_start,
                    end: saved_end,
                },
            ) => {
                if too_close(cand_start, saved_end) {
                    warnings.push(Warning::StartVsEndProximity);
                }
                if cand_start > saved_start && cand_start < saved_end {
                    gated_checks(
                        Warning::SingleDateOverlapVsRecurringWeekdays,
                        cand_days,
                        candidate.load_after,
                        saved_days,
                        saved.load_after,
                        &mut warnings,
                    );
                }
            }

            (
                Span::Until {
                    start: cand_start,
                    end: cand_end,
                },
                Span::Until {
                    start: saved_start,
                    end: saved_end,
                },
            ) => {
                if too_close(cand_start, saved_end) {
                    warnings.push(Warning::StartVsEndProximity);
                }
                if too_close(cand_end, saved_end) {
                    warnings.push(Warning::EndVsStartProximityReverse);
                }
                if cand_start > saved_start || cand_end > saved_end {
                    gated_checks(
                        Warning::WeekdayOverlapVsRecurring,
                        cand_days,
                        candidate.load_after,
                        saved_days,
                        saved.load_after,
                        &mut warnings,
                    );
                }
            }

            (
                Span::Forever { start: cand_start },
                Span::Until {
                    start: saved_start,
                    end: saved_end,
                },
            ) => {
                if too_close(cand_start, saved_end) {
                    warnings.push(Warning::StartVsEndProximity);
                }
                if cand_start > saved_start && cand_start < saved_end {
                    gated_checks(
                        Warning::WeekdayOverlapVsRecurring,
                        cand_days,
                        candidate.load_after,
                        saved_days,
                        saved.load_after,
                        &mut warnings,
                    );
                }
            }

            (Span::Once { start: cand_start }, Span::Forever { start: saved_start }) => {
                if cand_start > saved_start {
                    gated_checks(
                        Warning::SingleDateOverlapVsRecurringWeekdays,
                        cand_days,
                        candidate.load_after,
                        saved_days,
                        saved.load_after,
                        &mut warnings,
                    );
                }
            }

            (
                Span::Until {
                    start: cand_start,
                    end: cand_end,
                },
                Span::Forever { start: saved_start },
            ) => {
                if too_close(cand_end, saved_start) {
                    warnings.push(Warning::EndVsStartProximityReverse);
                }
                if cand_start > saved_start || cand_end > saved_start {
                    gated_checks(
                        Warning::WeekdayOverlapVsRecurring,
                        cand_days,
                        candidate.load_after,
                        saved_days,
                        saved.load_after,
                        &mut warnings,
                    );
                }
            }

            // Two open-ended weekly patterns always coexist eventually, so
            // the weekday and load-time checks run unconditionally.
            (Span::Forever { .. }, Span::Forever { .. }) => {
                gated_checks(
                    Warning::WeekdayOverlapVsRecurring,
                    cand_days,
                    candidate.load_after,
                    saved_days,
                    saved.load_after,
                    &mut warnings,
                );
            }
        }

        if !warnings.is_empty() {
            report.push(Collision {
                warnings,
                rule: saved.clone(),
            });
        }
    }

    Ok(report)
}

/// The containment-gated pair of checks shared by every recurring arm: a
/// weekday-overlap warning (whose code depends on the arm) plus the
/// adjacent-day load-time check.
fn gated_checks(
    overlap_warning: Warning,
    candidate_days: WeekdaySet,
    candidate_load: NaiveTime,
    existing_days: WeekdaySet,
    existing_load: NaiveTime,
    warnings: &mut Vec<Warning>,
) {
    if candidate_days.intersects(existing_days) {
        warnings.push(overlap_warning);
    }
    if adjacent_load_conflict(candidate_days, candidate_load, existing_days, existing_load) {
        warnings.push(Warning::LoadTimeAdjacency);
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
