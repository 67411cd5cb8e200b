use chrono::{Duration, NaiveDate};

use crate::error::CoreError;
use crate::models::cycle::{CycleProfile, Phase};
use crate::models::prediction::FertileWindow;

/// Days from ovulation to the next period.
pub const LUTEAL_DAYS: i64 = 14;
/// Days before ovulation that count as fertile.
pub const FERTILE_LEAD_DAYS: i64 = 5;

/// `date` moved by `days`, or an error when the result leaves chrono's range.
pub fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, CoreError> {
    Duration::try_days(days)
        .and_then(|d| date.checked_add_signed(d))
        .ok_or_else(|| CoreError::DateOutOfRange(format!("{date} shifted by {days} days")))
}

/// Whole days from `today` to `next_period`; negative once the period started.
pub fn days_until(today: NaiveDate, next_period: NaiveDate) -> i64 {
    (next_period - today).num_days()
}

/// Phase for a given number of days until the next period.
///
/// Anything not covered by the first three arms, including a period that
/// started `period_length` or more days ago, is luteal.
pub fn phase_for_days_until(days_until: i64, period_length: u32) -> Phase {
    let period_length = i64::from(period_length);
    if days_until <= 0 && days_until > -period_length {
        Phase::Menstrual
    } else if days_until > LUTEAL_DAYS {
        Phase::Follicular
    } else if days_until > 8 && days_until <= LUTEAL_DAYS {
        Phase::Ovulation
    } else {
        Phase::Luteal
    }
}

/// Classify the phase on `today` given the predicted next period.
pub fn classify_phase(today: NaiveDate, next_period: NaiveDate, profile: &CycleProfile) -> Phase {
    phase_for_days_until(days_until(today, next_period), profile.period_length)
}

/// Ovulation 14 days before the next period; fertile from five days before
/// ovulation through the day after it.
pub fn fertile_window(next_period: NaiveDate) -> Result<FertileWindow, CoreError> {
    let ovulation = shift_days(next_period, -LUTEAL_DAYS)?;
    Ok(FertileWindow {
        ovulation,
        start: shift_days(ovulation, -FERTILE_LEAD_DAYS)?,
        end: shift_days(ovulation, 1)?,
    })
}
