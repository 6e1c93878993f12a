//! Weekday sets and resolution from anchor dates.
//!
//! Recurring rules carry their applicable weekdays as a [`WeekdaySet`]; a
//! one-off rule carries none and resolves to the weekday of its own date via
//! [`resolve_weekdays`]. One lookup table covers naming, parsing, and the
//! serde representation. Indexing follows the ISO convention (Monday = 0),
//! matching `Weekday::num_days_from_monday`.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Weekdays in Monday-first order, aligned with [`DAY_NAMES`].
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English day names, Monday-first.
const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// The full English name of a weekday (e.g. `"Monday"`).
pub fn weekday_name(day: Weekday) -> &'static str {
    DAY_NAMES[day.num_days_from_monday() as usize]
}

/// Parse a full English day name (case-insensitive).
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    DAY_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(s.trim()))
        .map(|i| WEEKDAYS[i])
}

/// A set of weekdays, stored as a bitmask (bit *n* set = *n* days from Monday).
///
/// Serializes as a list of full English day names, the representation rules
/// travel in on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The empty set.
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    /// The set containing only `day`.
    pub fn single(day: Weekday) -> Self {
        WeekdaySet(bit(day))
    }

    /// Add a day to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    /// Whether `day` is in the set.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the two sets share at least one day.
    pub fn intersects(&self, other: WeekdaySet) -> bool {
        self.0 & other.0 != 0
    }

    /// Days in the set, Monday-first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> {
        let set = *self;
        WEEKDAYS.into_iter().filter(move |day| set.contains(*day))
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(weekday_name(day))?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for day in self.iter() {
            seq.serialize_element(weekday_name(day))?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DayListVisitor;

        impl<'de> Visitor<'de> for DayListVisitor {
            type Value = WeekdaySet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of weekday names")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<WeekdaySet, A::Error> {
                let mut set = WeekdaySet::EMPTY;
                while let Some(name) = seq.next_element::<String>()? {
                    let day = parse_weekday(&name)
                        .ok_or_else(|| de::Error::custom(format!("unknown weekday: '{name}'")))?;
                    set.insert(day);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(DayListVisitor)
    }
}

/// Normalize a rule's weekdays against its anchor date.
///
/// A non-empty set is already concrete and passes through unchanged. An empty
/// set (a one-off rule) resolves to the weekday of `reference` alone. The
/// result is never empty.
pub fn resolve_weekdays(days: WeekdaySet, reference: NaiveDate) -> WeekdaySet {
    if days.is_empty() {
        WeekdaySet::single(reference.weekday())
    } else {
        days
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
