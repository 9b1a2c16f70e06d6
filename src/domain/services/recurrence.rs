use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::AppError;

/// Which occurrence of a weekday within a month a MonthlyNth series targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordinal {
    First,
    Second,
    Third,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceRule {
    Weekly,
    BiweeklyOdd,
    BiweeklyEven,
    MonthlyNth(Ordinal),
}

impl RecurrenceRule {
    pub fn parse(rule: &str) -> Result<Self, AppError> {
        match rule {
            "weekly" => Ok(Self::Weekly),
            "biweekly_odd" => Ok(Self::BiweeklyOdd),
            "biweekly_even" => Ok(Self::BiweeklyEven),
            "first" => Ok(Self::MonthlyNth(Ordinal::First)),
            "second" => Ok(Self::MonthlyNth(Ordinal::Second)),
            "third" => Ok(Self::MonthlyNth(Ordinal::Third)),
            "last" => Ok(Self::MonthlyNth(Ordinal::Last)),
            other => Err(AppError::Validation(format!("unknown recurrence rule: {}", other))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiweeklyOdd => "biweekly_odd",
            Self::BiweeklyEven => "biweekly_even",
            Self::MonthlyNth(Ordinal::First) => "first",
            Self::MonthlyNth(Ordinal::Second) => "second",
            Self::MonthlyNth(Ordinal::Third) => "third",
            Self::MonthlyNth(Ordinal::Last) => "last",
        }
    }

    pub fn matches(&self, date: NaiveDate, days: &[Weekday]) -> bool {
        let weekday_ok = days.contains(&date.weekday());
        match self {
            Self::Weekly => weekday_ok,
            Self::BiweeklyOdd => weekday_ok && date.iso_week().week() % 2 == 1,
            Self::BiweeklyEven => weekday_ok && date.iso_week().week() % 2 == 0,
            Self::MonthlyNth(ordinal) => {
                weekday_ok
                    && resolve_ordinal(date.year(), date.month(), date.weekday(), *ordinal)
                        == Some(date)
            }
        }
    }
}

/// The n-th (1-based) occurrence of `weekday` within a month, or None when
/// the month has fewer than n of them.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let to_first = (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
    NaiveDate::from_ymd_opt(year, month, 1 + to_first + 7 * (n - 1))
}

/// A "last Tuesday" is the fifth when the month has one, otherwise the
/// fourth. Unresolvable combinations yield None, never an error.
pub fn resolve_ordinal(year: i32, month: u32, weekday: Weekday, ordinal: Ordinal) -> Option<NaiveDate> {
    match ordinal {
        Ordinal::First => nth_weekday_of_month(year, month, weekday, 1),
        Ordinal::Second => nth_weekday_of_month(year, month, weekday, 2),
        Ordinal::Third => nth_weekday_of_month(year, month, weekday, 3),
        Ordinal::Last => nth_weekday_of_month(year, month, weekday, 5)
            .or_else(|| nth_weekday_of_month(year, month, weekday, 4)),
    }
}

/// Distinct (year, month) pairs covered by the date range, in order.
fn months_spanned(start: NaiveDate, end: NaiveDate) -> Vec<(i32, u32)> {
    let mut months = Vec::new();
    let mut cursor = (start.year(), start.month());
    let last = (end.year(), end.month());
    while cursor <= last {
        months.push(cursor);
        cursor = match cursor.1 {
            12 => (cursor.0 + 1, 1),
            m => (cursor.0, m + 1),
        };
    }
    months
}

/// Expand a rule into the concrete dates that still need an event.
///
/// Weekly and biweekly rules scan every day of the range; monthly rules
/// resolve one date per (month, weekday) via the ordinal. All candidates
/// pass the same filter: not before `today`, within [start, expiry], and
/// not already materialized. The result is ascending and duplicate-free.
pub fn generate_dates(
    rule: &RecurrenceRule,
    days: &[Weekday],
    start: NaiveDate,
    expiry: NaiveDate,
    today: NaiveDate,
    materialized: &BTreeSet<NaiveDate>,
) -> Vec<NaiveDate> {
    let admissible = |date: NaiveDate| {
        date >= today && date >= start && date <= expiry && !materialized.contains(&date)
    };

    let mut out = BTreeSet::new();
    match rule {
        RecurrenceRule::MonthlyNth(ordinal) => {
            for (year, month) in months_spanned(start, expiry) {
                for day in days {
                    if let Some(date) = resolve_ordinal(year, month, *day, *ordinal)
                        && admissible(date)
                    {
                        out.insert(date);
                    }
                }
            }
        }
        _ => {
            let mut cursor = start;
            while cursor <= expiry {
                if rule.matches(cursor, days) && admissible(cursor) {
                    out.insert(cursor);
                }
                let Some(next) = cursor.succ_opt() else { break };
                cursor = next;
            }
        }
    }
    out.into_iter().collect()
}
