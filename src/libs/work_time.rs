//! Worked-time calculation for a single day.
//!
//! Given canonical clock-in and clock-out times, [`BreakRule::compute`]
//! returns elapsed minutes split into worked time and a deducted unpaid
//! break. A clock-out earlier than the clock-in is treated as an overnight
//! shift that wraps past midnight.
//!
//! Overtime is reported as zero. No overtime policy exists yet; the field
//! is carried so that the record shape matches the history the server
//! returns.

use crate::api::ApiError;
use crate::libs::config::AttendanceConfig;
use crate::libs::formatter::{format_break, format_overtime, format_work_duration, parse_clock_time};
use crate::libs::messages::Message;
use chrono::Timelike;
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Result of a work-duration calculation, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkDuration {
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub overtime_minutes: i64,
}

impl WorkDuration {
    /// `"7h 45m"` style worked time.
    pub fn work_label(&self) -> String {
        format_work_duration(self.work_minutes)
    }

    /// `"1h"` style break.
    pub fn break_label(&self) -> String {
        format_break(self.break_minutes)
    }

    pub fn overtime_label(&self) -> String {
        format_overtime(self.overtime_minutes)
    }
}

/// Fixed unpaid-break deduction: shifts longer than `threshold_minutes`
/// lose `break_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakRule {
    pub threshold_minutes: i64,
    pub break_minutes: i64,
}

impl Default for BreakRule {
    fn default() -> Self {
        Self {
            threshold_minutes: 360,
            break_minutes: 60,
        }
    }
}

impl From<&AttendanceConfig> for BreakRule {
    fn from(config: &AttendanceConfig) -> Self {
        Self {
            threshold_minutes: config.break_threshold(),
            break_minutes: config.break_length(),
        }
    }
}

impl BreakRule {
    pub fn compute(&self, clock_in: &str, clock_out: &str) -> Result<WorkDuration, ApiError> {
        let in_minutes = minutes_since_midnight(clock_in)?;
        let mut out_minutes = minutes_since_midnight(clock_out)?;

        if out_minutes < in_minutes {
            out_minutes += MINUTES_PER_DAY;
        }

        let raw_minutes = out_minutes - in_minutes;
        let break_minutes = if raw_minutes > self.threshold_minutes { self.break_minutes } else { 0 };

        Ok(WorkDuration {
            work_minutes: raw_minutes - break_minutes,
            break_minutes,
            overtime_minutes: 0,
        })
    }
}

/// Computes worked time with the default 6h/60m break rule.
pub fn compute_duration(clock_in: &str, clock_out: &str) -> Result<WorkDuration, ApiError> {
    BreakRule::default().compute(clock_in, clock_out)
}

fn minutes_since_midnight(time: &str) -> Result<i64, ApiError> {
    let parsed = parse_clock_time(time).ok_or_else(|| ApiError::Validation(Message::InvalidTime(time.to_string()).to_string()))?;
    Ok(parsed.hour() as i64 * 60 + parsed.minute() as i64)
}
