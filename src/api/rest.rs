use super::types::*;
use super::{ApiError, AttendanceBackend};
use crate::libs::config::Config;
use crate::libs::formatter::format_to_canonical;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug};
use chrono::NaiveDate;
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const LOGIN_URL: &str = "api/auth/login";
const CLOCK_IN_URL: &str = "api/attendance/clockin";
const CLOCK_OUT_URL: &str = "api/attendance/clock-out";
const UPDATE_URL: &str = "api/attendance/update";
const MONTHLY_URL: &str = "api/attendance/monthly";
const EDIT_REQUESTS_URL: &str = "api/attendance/edit-requests";
const SCHEDULE_WEEK_URL: &str = "api/schedule/week";
const SCHEDULE_SAVE_URL: &str = "api/schedule/save";
const SCHEDULE_SUBMIT_URL: &str = "api/schedule/submit";
const SCHEDULE_SUBMITTED_URL: &str = "api/schedule/submitted";
const LOCATIONS_URL: &str = "api/locations";
const HOLIDAY_REQUESTS_URL: &str = "api/holidays/requests";
const OVERTIME_REQUESTS_URL: &str = "api/overtime/requests";

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Schedule row as the server sends it. Older servers only report
/// `isWorkDay`; newer ones send the `type` directly.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleDayWire {
    date: NaiveDate,
    #[serde(default, rename = "type")]
    kind: Option<ScheduleKind>,
    #[serde(default)]
    is_work_day: Option<bool>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
}

impl ScheduleDayWire {
    fn into_day(self) -> Option<ScheduleDay> {
        let kind = self.kind.or(match self.is_work_day {
            Some(true) => Some(ScheduleKind::Work),
            Some(false) => Some(ScheduleKind::Holiday),
            None => None,
        })?;
        Some(ScheduleDay {
            date: self.date,
            kind,
            start_time: format_to_canonical(self.start_time.as_deref()),
            end_time: format_to_canonical(self.end_time.as_deref()),
        })
    }
}

/// HTTP implementation of [`AttendanceBackend`].
///
/// Every request carries `Authorization: Bearer <token>` once a token has
/// been attached with [`RestBackend::with_token`]. Non-2xx replies become
/// [`ApiError::Backend`] with the body's `message` field when present.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestBackend {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Builds a client from the effective configuration.
    ///
    /// # Errors
    ///
    /// Fails when no API URL is configured.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let Some(api_url) = config.api_url() else {
            msg_bail_anyhow!(Message::ServerNotConfigured);
        };
        Self::new(&api_url, config.timeout())
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        msg_debug!(format!("{} {}", method, url));
        let builder = self.client.request(method, url).header(header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_raw(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let res = builder.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = res.status();
        let body = res.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(status, body)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send_raw(builder).await?;
        parse_body(&body)
    }
}

/// Passes a 2xx body through. Anything else becomes [`ApiError::Backend`]
/// carrying the body's `message`, or an empty message when there is none.
fn check_status(status: StatusCode, body: String) -> Result<String, ApiError> {
    if status.is_success() {
        return Ok(body);
    }

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_default();
    Err(ApiError::Backend {
        status: status.as_u16(),
        message,
    })
}

/// Decodes a success body. An empty body is read as `{}` (or `[]` for lists)
/// since several endpoints reply 200 with nothing.
fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    if body.trim().is_empty() {
        return serde_json::from_str("{}")
            .or_else(|_| serde_json::from_str("[]"))
            .map_err(|e| ApiError::Network(e.to_string()));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Network(e.to_string()))
}

impl AttendanceBackend for RestBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        self.send(self.request(Method::POST, LOGIN_URL).json(credentials)).await
    }

    async fn attendance_status(&self, user_id: i64) -> Result<AttendanceStatusResponse, ApiError> {
        let path = format!("api/attendance/{}/status", user_id);
        self.send(self.request(Method::GET, &path)).await
    }

    async fn clock_in(&self, user_id: i64, kind: ClockInKind) -> Result<ActionResponse, ApiError> {
        let body = ClockInRequest { user_id, kind };
        self.send(self.request(Method::POST, CLOCK_IN_URL).json(&body)).await
    }

    async fn clock_out(&self, user_id: i64) -> Result<ActionResponse, ApiError> {
        let path = format!("{}/{}", CLOCK_OUT_URL, user_id);
        self.send(self.request(Method::POST, &path)).await
    }

    async fn update_attendance(&self, update: &AttendanceUpdate) -> Result<ActionResponse, ApiError> {
        let path = format!("{}/{}", UPDATE_URL, update.user_id);
        self.send(self.request(Method::POST, &path).json(update)).await
    }

    async fn monthly_history(&self, user_id: i64, month: &str) -> Result<Vec<HistoryRecord>, ApiError> {
        let path = format!("{}/{}", MONTHLY_URL, user_id);
        self.send(self.request(Method::GET, &path).query(&[("month", month)])).await
    }

    async fn submit_correction(&self, request: &CorrectionRequest) -> Result<RequestAck, ApiError> {
        self.send(self.request(Method::POST, EDIT_REQUESTS_URL).json(request)).await
    }

    async fn schedule(&self, user_id: i64, month_start: NaiveDate) -> Result<Vec<ScheduleDay>, ApiError> {
        let start = month_start.format("%Y-%m-%d").to_string();
        let query = [("userId", user_id.to_string()), ("start", start)];
        let days: Vec<ScheduleDayWire> = self.send(self.request(Method::GET, SCHEDULE_WEEK_URL).query(&query)).await?;
        Ok(days.into_iter().filter_map(ScheduleDayWire::into_day).collect())
    }

    async fn save_schedule(&self, draft: &ScheduleDraft) -> Result<ActionResponse, ApiError> {
        self.send(self.request(Method::POST, SCHEDULE_SAVE_URL).json(draft)).await
    }

    async fn submit_schedule(&self, draft: &ScheduleDraft) -> Result<ActionResponse, ApiError> {
        self.send(self.request(Method::POST, SCHEDULE_SUBMIT_URL).json(draft)).await
    }

    async fn submitted_schedules(&self, user_id: i64) -> Result<Vec<SubmittedSchedule>, ApiError> {
        let query = [("userId", user_id.to_string())];
        self.send(self.request(Method::GET, SCHEDULE_SUBMITTED_URL).query(&query)).await
    }

    async fn locations(&self) -> Result<Vec<Location>, ApiError> {
        self.send(self.request(Method::GET, LOCATIONS_URL)).await
    }

    async fn create_location(&self, input: &LocationInput) -> Result<Location, ApiError> {
        self.send(self.request(Method::POST, LOCATIONS_URL).json(input)).await
    }

    async fn update_location(&self, id: i64, input: &LocationInput) -> Result<Location, ApiError> {
        let path = format!("{}/{}", LOCATIONS_URL, id);
        self.send(self.request(Method::PUT, &path).json(input)).await
    }

    async fn delete_location(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("{}/{}", LOCATIONS_URL, id);
        self.send_raw(self.request(Method::DELETE, &path)).await.map(|_| ())
    }

    async fn submit_holiday(&self, request: &HolidayRequest) -> Result<ActionResponse, ApiError> {
        self.send(self.request(Method::POST, HOLIDAY_REQUESTS_URL).json(request)).await
    }

    async fn submit_overtime(&self, request: &OvertimeRequest) -> Result<ActionResponse, ApiError> {
        self.send(self.request(Method::POST, OVERTIME_REQUESTS_URL).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_reads_as_default() {
        let status: AttendanceStatusResponse = parse_body("").unwrap();
        assert!(!status.working);
        let history: Vec<HistoryRecord> = parse_body("  ").unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_field_aliases() {
        let body = r#"[{"date":"2025-05-01","clockIn":"2025-05-01T09:00:00","totalWorkMin":480,"overtime":15}]"#;
        let history: Vec<HistoryRecord> = parse_body(body).unwrap();
        assert_eq!(history[0].total_work_minutes, Some(480));
        assert_eq!(history[0].overtime_minutes, Some(15));
        assert_eq!(history[0].total_break_minutes, None);
    }

    #[test]
    fn test_schedule_row_from_work_day_flag() {
        let body = r#"[{"date":"2025-07-01","isWorkDay":true,"startTime":"09:00:00"},{"date":"2025-07-02","isWorkDay":false},{"date":"2025-07-03"}]"#;
        let rows: Vec<ScheduleDayWire> = parse_body(body).unwrap();
        let days: Vec<ScheduleDay> = rows.into_iter().filter_map(ScheduleDayWire::into_day).collect();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].kind, ScheduleKind::Work);
        assert_eq!(days[0].start_time.as_deref(), Some("09:00"));
        assert_eq!(days[1].kind, ScheduleKind::Holiday);
    }

    #[test]
    fn test_error_status_carries_server_message() {
        let err = check_status(StatusCode::CONFLICT, r#"{"message":"Already clocked in today"}"#.to_string()).unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 409,
                message: "Already clocked in today".to_string(),
            }
        );
        assert_eq!(err.server_message(), Some("Already clocked in today"));
    }

    #[test]
    fn test_error_status_without_message() {
        for body in ["", "<html>Bad Gateway</html>", r#"{"error":"boom"}"#] {
            let err = check_status(StatusCode::BAD_GATEWAY, body.to_string()).unwrap_err();
            assert_eq!(
                err,
                ApiError::Backend {
                    status: 502,
                    message: String::new(),
                }
            );
            assert_eq!(err.server_message(), None);
        }
    }

    #[test]
    fn test_success_body_passes_through() {
        let body = check_status(StatusCode::OK, r#"{"working":true}"#.to_string()).unwrap();
        let status: AttendanceStatusResponse = parse_body(&body).unwrap();
        assert!(status.working);
    }

    #[test]
    fn test_unreadable_success_body_is_a_network_error() {
        let result: Result<AttendanceStatusResponse, ApiError> = parse_body("<html>maintenance</html>");
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
