//! Attendance backend seam.
//!
//! Everything the client needs from the server goes through the
//! [`AttendanceBackend`] trait. The production implementation is
//! [`RestBackend`]; tests substitute an in-memory double.
//!
//! ## Error classes
//!
//! - [`ApiError::Validation`]: rejected locally before any request is made
//! - [`ApiError::Backend`]: the server answered with a non-2xx status
//! - [`ApiError::Network`]: the request never produced a usable response
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kintai::api::{AttendanceBackend, RestBackend};
//! use kintai::libs::config::Config;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let backend = RestBackend::from_config(&Config::read()?)?;
//! let status = backend.attendance_status(1).await?;
//! println!("working: {}", status.working);
//! # Ok(())
//! # }
//! ```

pub mod rest;
pub mod types;

pub use rest::RestBackend;
pub use types::*;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("{0}")]
    Network(String),
}

impl ApiError {
    /// Message the server put in the response body, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Backend { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

/// Operations the attendance server exposes to the client.
#[allow(async_fn_in_trait)]
pub trait AttendanceBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError>;

    async fn attendance_status(&self, user_id: i64) -> Result<AttendanceStatusResponse, ApiError>;

    async fn clock_in(&self, user_id: i64, kind: ClockInKind) -> Result<ActionResponse, ApiError>;

    async fn clock_out(&self, user_id: i64) -> Result<ActionResponse, ApiError>;

    async fn update_attendance(&self, update: &AttendanceUpdate) -> Result<ActionResponse, ApiError>;

    /// History rows for `month` (`YYYY-MM`), oldest first as the server sends them.
    async fn monthly_history(&self, user_id: i64, month: &str) -> Result<Vec<HistoryRecord>, ApiError>;

    async fn submit_correction(&self, request: &CorrectionRequest) -> Result<RequestAck, ApiError>;

    async fn schedule(&self, user_id: i64, month_start: NaiveDate) -> Result<Vec<ScheduleDay>, ApiError>;

    async fn save_schedule(&self, draft: &ScheduleDraft) -> Result<ActionResponse, ApiError>;

    async fn submit_schedule(&self, draft: &ScheduleDraft) -> Result<ActionResponse, ApiError>;

    async fn submitted_schedules(&self, user_id: i64) -> Result<Vec<SubmittedSchedule>, ApiError>;

    async fn locations(&self) -> Result<Vec<Location>, ApiError>;

    async fn create_location(&self, input: &LocationInput) -> Result<Location, ApiError>;

    async fn update_location(&self, id: i64, input: &LocationInput) -> Result<Location, ApiError>;

    async fn delete_location(&self, id: i64) -> Result<(), ApiError>;

    async fn submit_holiday(&self, request: &HolidayRequest) -> Result<ActionResponse, ApiError>;

    async fn submit_overtime(&self, request: &OvertimeRequest) -> Result<ActionResponse, ApiError>;
}
