//! How long an account has existed, as "X years, Y months, Z days".
//!
//! chrono has no calendar year/month/day difference. Whole months are counted
//! first, then the remaining days from the date those months land on.

use chrono::{DateTime, Datelike, Months, NaiveDate};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountAge {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl AccountAge {
    /// `None` when `since` lies after `today`.
    pub fn between(since: NaiveDate, today: NaiveDate) -> Option<Self> {
        if since > today {
            return None;
        }

        let mut months = (today.year() - since.year()) * 12 + today.month() as i32
            - since.month() as i32;
        if today.day() < since.day() {
            months -= 1;
        }

        // Adding months clamps to the end of shorter months (Jan 31 + 1 month = Feb 28/29).
        let anchor = since.checked_add_months(Months::new(months.max(0) as u32))?;
        let days = (today - anchor).num_days() as i32;

        let years = months / 12;
        let months = months % 12;

        Some(Self {
            years,
            months,
            days,
        })
    }

    /// Age of an account created at the RFC 3339 timestamp `created_at`.
    pub fn from_created_at(created_at: &str, today: NaiveDate) -> Option<Self> {
        let created = DateTime::parse_from_rfc3339(created_at).ok()?;
        Self::between(created.date_naive(), today)
    }
}

impl Display for AccountAge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: i32) -> &'static str {
    if n == 1 { "" } else { "s" }
}
