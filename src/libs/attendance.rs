use crate::libs::work_time::WorkDuration;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_SCHEDULED_TIME: &str = "09:00 - 18:00 (8h)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Working,
    Complete,
    Breaking,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Working => "working",
            AttendanceStatus::Complete => "complete",
            AttendanceStatus::Breaking => "breaking",
        }
    }

    /// Human label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Working => "Working",
            AttendanceStatus::Complete => "Not working",
            AttendanceStatus::Breaking => "On break",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "working" => Ok(AttendanceStatus::Working),
            "complete" => Ok(AttendanceStatus::Complete),
            "breaking" => Ok(AttendanceStatus::Breaking),
            other => Err(format!("unknown attendance status '{}'", other)),
        }
    }
}

/// Today's attendance as the client sees it.
///
/// `clock_out` is only meaningful together with `clock_in`, and the status
/// is `Working` exactly when there is a clock-in without a clock-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    pub duration: WorkDuration,
    pub status: AttendanceStatus,
    pub scheduled_time: String,
}

impl AttendanceRecord {
    /// Nothing recorded yet for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            clock_in: None,
            clock_out: None,
            duration: WorkDuration::default(),
            status: AttendanceStatus::Complete,
            scheduled_time: DEFAULT_SCHEDULED_TIME.to_string(),
        }
    }

    pub fn working(date: NaiveDate, clock_in: String) -> Self {
        Self {
            clock_in: Some(clock_in),
            status: AttendanceStatus::Working,
            ..Self::empty(date)
        }
    }

    pub fn is_working(&self) -> bool {
        self.status == AttendanceStatus::Working
    }
}
