//! Wire types exchanged with the attendance REST API.
//!
//! Field names follow the server's camelCase JSON. Where the server has
//! shipped more than one name for the same field over time, serde aliases
//! accept both.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role string the server uses for administrators.
pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// `GET /api/attendance/{userId}/status`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatusResponse {
    #[serde(default)]
    pub working: bool,
    #[serde(default)]
    pub clock_in: Option<String>,
    #[serde(default)]
    pub clock_out: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Generic acknowledgement body. Most mutating endpoints reply with an
/// optional human-readable message and nothing else.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply to a correction request submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClockInKind {
    Work,
    Remote,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockInRequest {
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: ClockInKind,
}

/// `POST /api/attendance/update/{userId}` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub user_id: i64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// One past day as returned by the monthly history endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub date: String,
    #[serde(default)]
    pub clock_in: Option<String>,
    #[serde(default)]
    pub clock_out: Option<String>,
    #[serde(default, alias = "totalWorkMin")]
    pub total_work_minutes: Option<i64>,
    #[serde(default, alias = "overtime")]
    pub overtime_minutes: Option<i64>,
    #[serde(default, alias = "totalBreakMin")]
    pub total_break_minutes: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScheduleKind {
    Work,
    Remote,
    Holiday,
}

impl ScheduleKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleKind::Work => "Work",
            ScheduleKind::Remote => "Remote",
            ScheduleKind::Holiday => "Holiday",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDay {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Body for both `save` and `submit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub user_id: i64,
    pub month: String,
    pub days: Vec<ScheduleDay>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedSchedule {
    pub id: i64,
    pub month: String,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub creator: Option<String>,
}

/// Create/update body for a work location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[serde(alias = "APPROVED")]
    Approved,
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "REJECTED")]
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequestStatus::Approved => "approved",
            RequestStatus::Pending => "pending",
            RequestStatus::Rejected => "rejected",
        };
        write!(f, "{}", label)
    }
}

/// `POST /api/attendance/edit-requests` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionRequest {
    pub user_id: i64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum HolidayKind {
    Paid,
    Special,
    Sick,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRequest {
    pub user_id: i64,
    pub holiday_date: NaiveDate,
    pub holiday_type: HolidayKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRequest {
    pub user_id: i64,
    pub target_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub reason: String,
}
