#![allow(dead_code)]
//! In-memory attendance server and fixtures shared by the integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use kintai::api::*;
use kintai::libs::clock::{Clock, ManualClock};
use parking_lot::Mutex;
use std::sync::Arc;

pub const USER_ID: i64 = 7;

pub fn at(date: (i32, u32, u32), h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// 2025-05-26, the day most scenarios run on.
pub fn monday(h: u32, m: u32, s: u32) -> NaiveDateTime {
    at((2025, 5, 26), h, m, s)
}

#[derive(Debug, Default)]
pub struct ServerState {
    pub working: bool,
    pub clock_in: Option<String>,
    pub date: Option<String>,
    pub history: Vec<HistoryRecord>,
    pub schedule: Vec<ScheduleDay>,
    pub locations: Vec<Location>,
    pub status_error: Option<ApiError>,
    pub clock_in_error: Option<ApiError>,
    pub clock_out_error: Option<ApiError>,
    pub update_error: Option<ApiError>,
    pub history_error: Option<ApiError>,
    pub clock_in_message: Option<String>,
    pub calls: Vec<&'static str>,
    pub updates: Vec<AttendanceUpdate>,
    pub saved_drafts: Vec<ScheduleDraft>,
    pub corrections: Vec<CorrectionRequest>,
}

/// Answers like the attendance server would, driven by a [`ManualClock`].
#[derive(Clone)]
pub struct MockBackend {
    pub state: Arc<Mutex<ServerState>>,
    clock: ManualClock,
}

impl MockBackend {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            state: Arc::new(Mutex::new(ServerState::default())),
            clock,
        }
    }

    /// Server already has the user clocked in at `time` today.
    pub fn working_since(&self, time: &str) {
        let today = self.clock.today();
        let mut state = self.state.lock();
        state.working = true;
        state.clock_in = Some(format!("{}T{}:00", today, time));
        state.date = Some(today.to_string());
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: &'static str) {
        self.state.lock().calls.push(call);
    }
}

impl AttendanceBackend for MockBackend {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        self.record("login");
        Ok(LoginResponse {
            token: Some("header.payload.signature".to_string()),
            user_id: USER_ID,
            username: credentials.username.clone(),
            role: Some("USER".to_string()),
        })
    }

    async fn attendance_status(&self, _user_id: i64) -> Result<AttendanceStatusResponse, ApiError> {
        self.record("status");
        let state = self.state.lock();
        if let Some(error) = &state.status_error {
            return Err(error.clone());
        }
        Ok(AttendanceStatusResponse {
            working: state.working,
            clock_in: state.clock_in.clone(),
            clock_out: None,
            date: state.date.clone(),
        })
    }

    async fn clock_in(&self, _user_id: i64, _kind: ClockInKind) -> Result<ActionResponse, ApiError> {
        self.record("clock_in");
        if let Some(error) = self.state.lock().clock_in_error.clone() {
            return Err(error);
        }
        let now = self.clock.now();
        let mut state = self.state.lock();
        state.working = true;
        state.clock_in = Some(now.format("%Y-%m-%dT%H:%M:%S").to_string());
        state.date = Some(now.date().to_string());
        Ok(ActionResponse {
            message: state.clock_in_message.clone(),
        })
    }

    async fn clock_out(&self, _user_id: i64) -> Result<ActionResponse, ApiError> {
        self.record("clock_out");
        let mut state = self.state.lock();
        if let Some(error) = state.clock_out_error.clone() {
            return Err(error);
        }
        state.working = false;
        state.clock_in = None;
        Ok(ActionResponse::default())
    }

    async fn update_attendance(&self, update: &AttendanceUpdate) -> Result<ActionResponse, ApiError> {
        self.record("update");
        let mut state = self.state.lock();
        if let Some(error) = state.update_error.clone() {
            return Err(error);
        }
        if let Some(start) = &update.start_time {
            state.clock_in = Some(format!("{}T{}:00", update.date, start));
        }
        state.updates.push(update.clone());
        Ok(ActionResponse::default())
    }

    async fn monthly_history(&self, _user_id: i64, _month: &str) -> Result<Vec<HistoryRecord>, ApiError> {
        self.record("history");
        let state = self.state.lock();
        match &state.history_error {
            Some(error) => Err(error.clone()),
            None => Ok(state.history.clone()),
        }
    }

    async fn submit_correction(&self, request: &CorrectionRequest) -> Result<RequestAck, ApiError> {
        self.record("correction");
        self.state.lock().corrections.push(request.clone());
        Ok(RequestAck {
            success: true,
            message: None,
        })
    }

    async fn schedule(&self, _user_id: i64, _month_start: NaiveDate) -> Result<Vec<ScheduleDay>, ApiError> {
        self.record("schedule");
        Ok(self.state.lock().schedule.clone())
    }

    async fn save_schedule(&self, draft: &ScheduleDraft) -> Result<ActionResponse, ApiError> {
        self.record("save_schedule");
        let mut state = self.state.lock();
        state.schedule = draft.days.clone();
        state.saved_drafts.push(draft.clone());
        Ok(ActionResponse::default())
    }

    async fn submit_schedule(&self, _draft: &ScheduleDraft) -> Result<ActionResponse, ApiError> {
        self.record("submit_schedule");
        Ok(ActionResponse::default())
    }

    async fn submitted_schedules(&self, _user_id: i64) -> Result<Vec<SubmittedSchedule>, ApiError> {
        self.record("submitted");
        Ok(Vec::new())
    }

    async fn locations(&self) -> Result<Vec<Location>, ApiError> {
        self.record("locations");
        Ok(self.state.lock().locations.clone())
    }

    async fn create_location(&self, input: &LocationInput) -> Result<Location, ApiError> {
        self.record("create_location");
        let mut state = self.state.lock();
        let location = Location {
            id: state.locations.len() as i64 + 1,
            name: input.name.clone(),
            start_time: input.start_time.clone(),
            end_time: input.end_time.clone(),
            creator: None,
        };
        state.locations.push(location.clone());
        Ok(location)
    }

    async fn update_location(&self, id: i64, input: &LocationInput) -> Result<Location, ApiError> {
        self.record("update_location");
        let mut state = self.state.lock();
        let Some(location) = state.locations.iter_mut().find(|l| l.id == id) else {
            return Err(ApiError::Backend {
                status: 404,
                message: "Location not found".to_string(),
            });
        };
        location.name = input.name.clone();
        location.start_time = input.start_time.clone();
        location.end_time = input.end_time.clone();
        Ok(location.clone())
    }

    async fn delete_location(&self, id: i64) -> Result<(), ApiError> {
        self.record("delete_location");
        self.state.lock().locations.retain(|l| l.id != id);
        Ok(())
    }

    async fn submit_holiday(&self, _request: &HolidayRequest) -> Result<ActionResponse, ApiError> {
        self.record("holiday");
        Ok(ActionResponse::default())
    }

    async fn submit_overtime(&self, _request: &OvertimeRequest) -> Result<ActionResponse, ApiError> {
        self.record("overtime");
        Ok(ActionResponse::default())
    }
}

/// Clock shared by the test and the code under test.
pub fn shared_clock(clock: &ManualClock) -> Arc<dyn Clock> {
    Arc::new(clock.clone())
}
