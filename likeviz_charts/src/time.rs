// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time tick generation and formatting helpers.
//!
//! Time is a numeric value in **seconds** since the Unix epoch (UTC). Ticks land on whole
//! seconds, minutes, hours, days, Sundays, or the first of a month, depending on the span.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use chrono::{DateTime, Datelike, NaiveDate};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
/// Steps at or above this are counted in calendar months.
const MONTHISH: f64 = 28.0 * DAY;
/// Day 3 of the epoch (1970-01-04) was a Sunday.
const FIRST_SUNDAY: f64 = 3.0 * DAY;

/// Returns tick timestamps inside `[min, max]`, about `count` of them.
pub fn nice_time_ticks_seconds(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    let span = max - min;
    let step = nice_time_step_seconds(span / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }
    if step >= MONTHISH {
        return month_ticks(min, max, months_for_step(step));
    }

    let origin = if step % WEEK == 0.0 { FIRST_SUNDAY } else { 0.0 };
    let i0 = ((min - origin) / step).ceil();
    let i1 = ((max - origin) / step).floor();
    let n_f = i1 - i0;
    if n_f.is_nan() || n_f < 0.0 {
        return Vec::new();
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "non-negative and capped at 10k"
    )]
    let n = n_f.min(10_000.0) as u64;

    (0..=n).map(|i| origin + (i0 + i as f64) * step).collect()
}

fn nice_time_step_seconds(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }

    const STEPS: &[f64] = &[
        1.0,
        5.0,
        15.0,
        30.0,
        MINUTE,
        5.0 * MINUTE,
        15.0 * MINUTE,
        30.0 * MINUTE,
        HOUR,
        3.0 * HOUR,
        6.0 * HOUR,
        12.0 * HOUR,
        DAY,
        2.0 * DAY,
        WEEK,
        30.0 * DAY,
        91.0 * DAY,
        365.0 * DAY,
    ];

    // Pick the candidate closest to the raw step on a log scale.
    let mut best = STEPS[0];
    for &s in STEPS {
        if s > step {
            if s / step < step / best {
                best = s;
            }
            return best;
        }
        best = s;
    }
    let years = (step / (365.0 * DAY)).ceil();
    years.max(1.0) * 365.0 * DAY
}

fn months_for_step(step: f64) -> u32 {
    let months = (step / (30.0 * DAY)).round();
    if months <= 1.0 {
        1
    } else if months <= 3.0 {
        3
    } else if months <= 6.0 {
        6
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "positive and capped at 10k years"
        )]
        let years = (months / 12.0).ceil().min(10_000.0) as u32;
        years.max(1) * 12
    }
}

fn month_ticks(min: f64, max: f64, months: u32) -> Vec<f64> {
    let mut out = Vec::new();
    let Some(start) = timestamp_to_datetime(min) else {
        return out;
    };
    let Ok(months) = i32::try_from(months) else {
        return out;
    };
    let Ok(month0) = i32::try_from(start.month0()) else {
        return out;
    };
    let mut ym = (start.year() * 12 + month0).div_euclid(months) * months;
    for _ in 0..10_000 {
        let year = ym.div_euclid(12);
        let Ok(month) = u32::try_from(ym.rem_euclid(12) + 1) else {
            break;
        };
        let Some(t) = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc().timestamp() as f64)
        else {
            break;
        };
        if t > max {
            break;
        }
        if t >= min {
            out.push(t);
        }
        ym += months;
    }
    out
}

fn is_multiple(v: f64, unit: f64) -> bool {
    (v / unit).floor() * unit == v
}

fn timestamp_to_datetime(v: f64) -> Option<DateTime<chrono::Utc>> {
    let secs_f = v.floor().clamp(i64::MIN as f64, i64::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i64 range")]
    let secs = secs_f as i64;
    DateTime::from_timestamp(secs, 0)
}

/// Formats a tick value (seconds) given the tick step (seconds).
///
/// Labels name the coarsest calendar unit that changes at the tick: `2024` for year steps,
/// `March` for month steps, `Mar 03` for week steps, `Fri 01` for day steps and for
/// midnights within finer steps, and a UTC clock time (`13:30`, `13:30:15`) otherwise.
pub fn format_time_seconds(v: f64, step: f64) -> String {
    let Some(dt) = timestamp_to_datetime(v).filter(|_| v.is_finite()) else {
        return alloc::format!("{v}");
    };

    let step = step.abs();
    let midnight = is_multiple(v, DAY);
    let pattern = if step >= 365.0 * DAY {
        "%Y"
    } else if step >= MONTHISH {
        "%B"
    } else if step >= WEEK {
        "%b %d"
    } else if step >= DAY || midnight {
        "%a %d"
    } else if step >= MINUTE && is_multiple(v, MINUTE) {
        "%H:%M"
    } else {
        "%H:%M:%S"
    };
    dt.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const MAR_01_2024: f64 = 1_709_251_200.0;

    #[test]
    fn time_ticks_choose_minute_steps_for_minute_spans() {
        let ticks = nice_time_ticks_seconds(0.0, 300.0, 5);
        assert!(ticks.len() >= 2, "{ticks:?}");
        let step = (ticks[1] - ticks[0]).abs();
        assert_eq!(step, 60.0);
    }

    #[test]
    fn a_week_of_daily_points_gets_daily_ticks() {
        let ticks = nice_time_ticks_seconds(MAR_01_2024, MAR_01_2024 + 6.0 * DAY, 7);
        assert_eq!(ticks.len(), 7, "{ticks:?}");
        assert_eq!(ticks[0], MAR_01_2024);
        assert_eq!(ticks[6], MAR_01_2024 + 6.0 * DAY);
    }

    #[test]
    fn week_ticks_land_on_sundays() {
        let ticks = nice_time_ticks_seconds(MAR_01_2024, MAR_01_2024 + 60.0 * DAY, 8);
        assert!(!ticks.is_empty());
        for t in ticks {
            let dt = timestamp_to_datetime(t).expect("in range");
            assert_eq!(dt.weekday(), chrono::Weekday::Sun, "{dt}");
        }
    }

    #[test]
    fn month_ticks_land_on_the_first() {
        let jan_01_2024 = 1_704_067_200.0;
        let ticks = nice_time_ticks_seconds(jan_01_2024, jan_01_2024 + 300.0 * DAY, 4);
        assert_eq!(ticks.first(), Some(&jan_01_2024));
        for t in &ticks {
            let dt = timestamp_to_datetime(*t).expect("in range");
            assert_eq!(dt.day(), 1, "{dt}");
        }
    }

    #[test]
    fn time_format_clock_steps() {
        assert_eq!(format_time_seconds(MAR_01_2024 + 5.0, 1.0), "00:00:05");
        assert_eq!(format_time_seconds(MAR_01_2024 + 13.5 * HOUR, 30.0 * MINUTE), "13:30");
        assert_eq!(format_time_seconds(MAR_01_2024 + 3723.0, MINUTE), "01:02:03");
        assert_eq!(format_time_seconds(MAR_01_2024, 12.0 * HOUR), "Fri 01");
        assert_eq!(format_time_seconds(f64::NAN, DAY), "NaN");
    }

    #[test]
    fn time_format_calendar_steps() {
        assert_eq!(format_time_seconds(MAR_01_2024, DAY), "Fri 01");
        assert_eq!(format_time_seconds(MAR_01_2024 + 2.0 * DAY, WEEK), "Mar 03");
        assert_eq!(format_time_seconds(MAR_01_2024, 30.0 * DAY), "March");
        assert_eq!(format_time_seconds(MAR_01_2024, 365.0 * DAY), "2024");
    }
}
