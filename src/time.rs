// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar helpers shared by aggregation, goals and insights.
//!
//! Every function takes `now` explicitly; nothing here reads the clock.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

const SECONDS_PER_DAY: i64 = 86_400;

/// Named window used to filter transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            "all" => Ok(Period::All),
            other => Err(Error::InvalidInput(format!(
                "Unknown period '{}', expected today|week|month|year|all",
                other
            ))),
        }
    }
}

/// Calendar months from `a` to `b`; day-of-month is ignored.
pub fn month_diff(a: NaiveDate, b: NaiveDate) -> i32 {
    (b.year() - a.year()) * 12 + (b.month() as i32 - a.month() as i32)
}

/// Instant a deadline date starts at.
pub fn deadline_instant(deadline: NaiveDate) -> NaiveDateTime {
    deadline.and_time(NaiveTime::MIN)
}

/// Whole days until `deadline`, rounded up. Negative when overdue, `None`
/// without a deadline.
pub fn days_remaining(deadline: Option<NaiveDate>, now: NaiveDateTime) -> Option<i64> {
    let deadline = deadline?;
    let secs = (deadline_instant(deadline) - now).num_seconds();
    Some((secs + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY))
}

/// True once the deadline instant lies strictly before `now`.
pub fn is_past(deadline: NaiveDate, now: NaiveDateTime) -> bool {
    deadline_instant(deadline) < now
}

/// Deadline lies in `(now, now + days]`.
pub fn due_within(deadline: NaiveDate, now: NaiveDateTime, days: i64) -> bool {
    let at = deadline_instant(deadline);
    at > now && at <= now + Duration::days(days)
}

pub fn period_start(period: Period, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date();
    match period {
        Period::Today => today.and_time(NaiveTime::MIN),
        Period::Week => now - Duration::days(7),
        Period::Month => first_of_month(today.year(), today.month()).and_time(NaiveTime::MIN),
        Period::Year => first_of_month(today.year(), 1).and_time(NaiveTime::MIN),
        Period::All => NaiveDateTime::MIN,
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Move `delta` months away from `(year, month)`; returns `(year, month)`.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let idx = year * 12 + (month as i32 - 1) + delta;
    (idx.div_euclid(12), (idx.rem_euclid(12) + 1) as u32)
}

/// Last calendar day of the month.
pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = shift_month(year, month, 1);
    NaiveDate::from_ymd_opt(ny, nm, 1).and_then(|d| d.pred_opt())
}

/// `YYYY-MM` label used for month buckets.
pub fn month_label(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}
