//! Today's attendance, cached locally and reconciled against the server.
//!
//! The cached record in the client state is only a fast path: it is shown
//! before the server answers. [`AttendanceStore::reconcile`] always replaces
//! it with what the server reports. If the server says the user is working,
//! its clock-in is adopted and the edit window is re-armed from it;
//! otherwise (including failures and empty replies) the record is reset to
//! the empty `complete` state and the window is cleared.
//!
//! Mutations (`record_clock_in`, `record_clock_out`, `record_correction`)
//! only touch local state after the backend call succeeded.
//!
//! A successful correction is remembered (date and corrected time) so that
//! reconciling the same session afterwards does not open the edit window
//! again. Only a new clock-in, or a session the server reports with a
//! different start, arms it.

use crate::api::{ActionResponse, ApiError, AttendanceBackend, AttendanceUpdate, ClockInKind};
use crate::db::client_state::{ClientState, StateKey};
use crate::libs::attendance::{AttendanceRecord, AttendanceStatus};
use crate::libs::clock::Clock;
use crate::libs::config::AttendanceConfig;
use crate::libs::edit_window::EditWindow;
use crate::libs::formatter::{format_clock_time, format_to_canonical, parse_clock_time};
use crate::libs::messages::Message;
use crate::libs::work_time::BreakRule;
use crate::msg_debug;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

const DATE_FORMAT: &str = "%Y-%m-%d";
const CORRECTED_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub struct AttendanceStore<B> {
    backend: B,
    clock: Arc<dyn Clock>,
    state: ClientState,
    user_id: Option<i64>,
    record: AttendanceRecord,
    window: EditWindow,
    corrected: Option<NaiveDateTime>,
    break_rule: BreakRule,
}

impl<B: AttendanceBackend> AttendanceStore<B> {
    pub fn new(backend: B, clock: Arc<dyn Clock>, state: ClientState, user_id: Option<i64>, config: &AttendanceConfig) -> Self {
        let today = clock.today();
        Self {
            backend,
            clock,
            state,
            user_id,
            record: AttendanceRecord::empty(today),
            window: EditWindow::new(config.edit_window()),
            corrected: None,
            break_rule: BreakRule::from(config),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn record(&self) -> &AttendanceRecord {
        &self.record
    }

    pub fn window(&self) -> &EditWindow {
        &self.window
    }

    pub fn is_edit_allowed(&self) -> bool {
        self.window.is_allowed(self.clock.now())
    }

    fn require_user(&self) -> Result<i64, ApiError> {
        self.user_id.ok_or_else(|| ApiError::Validation(Message::UserIdMissing.to_string()))
    }

    fn now_label(&self) -> String {
        format_clock_time(&self.clock.time())
    }

    /// Start of the session whose clock-in was last corrected, if any.
    pub fn corrected(&self) -> Option<NaiveDateTime> {
        self.corrected
    }

    /// Reads the cached record and original clock-in. A cache from another
    /// day is discarded.
    pub fn restore_cached(&mut self) {
        let today = self.clock.today();
        self.record = AttendanceRecord::empty(today);
        self.window.disarm();
        self.corrected = self
            .read(StateKey::CorrectedClockIn)
            .and_then(|corrected| NaiveDateTime::parse_from_str(&corrected, CORRECTED_FORMAT).ok());

        let cached_date = self
            .read(StateKey::CurrentAttendanceDate)
            .and_then(|date| NaiveDate::parse_from_str(&date, DATE_FORMAT).ok());
        if cached_date != Some(today) {
            msg_debug!(format!("discarding attendance cache from {:?}", cached_date));
            self.persist();
            return;
        }

        let clock_in = format_to_canonical(self.read(StateKey::CurrentClockIn).as_deref());
        let clock_out = format_to_canonical(self.read(StateKey::CurrentClockOut).as_deref());
        let status = self
            .read(StateKey::CurrentAttendanceStatus)
            .and_then(|status| status.parse::<AttendanceStatus>().ok());

        if let (Some(clock_in), Some(status)) = (clock_in, status) {
            let duration = clock_out
                .as_deref()
                .and_then(|clock_out| self.break_rule.compute(&clock_in, clock_out).ok())
                .unwrap_or_default();
            self.record = AttendanceRecord {
                clock_in: Some(clock_in),
                clock_out,
                duration,
                status,
                ..AttendanceRecord::empty(today)
            };
        }

        if let Some(original) = format_to_canonical(self.read(StateKey::OriginalClockInTime).as_deref()) {
            self.window.arm_on(today, &original);
        }
    }

    /// Replaces local state with the server's view of today.
    ///
    /// A failed request still resets local state; the error is returned so
    /// the caller can tell the user.
    pub async fn reconcile(&mut self) -> Result<&AttendanceRecord, ApiError> {
        let user_id = self.require_user()?;
        let today = self.clock.today();

        match self.backend.attendance_status(user_id).await {
            Ok(status) if status.working => {
                let clock_in = format_to_canonical(status.clock_in.as_deref());
                let date = status
                    .clock_in
                    .as_deref()
                    .and_then(session_date)
                    .or_else(|| status.date.as_deref().and_then(session_date))
                    .unwrap_or(self.record.date);

                self.record = AttendanceRecord {
                    date,
                    clock_in: clock_in.clone(),
                    clock_out: None,
                    duration: Default::default(),
                    status: AttendanceStatus::Working,
                    scheduled_time: self.record.scheduled_time.clone(),
                };
                let start = clock_in.as_deref().and_then(parse_clock_time).map(|time| date.and_time(time));
                match (clock_in, start) {
                    (Some(clock_in), Some(start)) if self.corrected != Some(start) => self.window.arm_on(date, &clock_in),
                    _ => self.window.disarm(),
                }
                msg_debug!(format!("reconciled: working since {:?}", self.record.clock_in));
                self.persist();
                Ok(&self.record)
            }
            Ok(_) => {
                self.corrected = None;
                self.reset(today);
                msg_debug!("reconciled: not working");
                Ok(&self.record)
            }
            Err(e) => {
                self.reset(today);
                msg_debug!(format!("reconciliation failed: {}", e));
                Err(e)
            }
        }
    }

    /// Fast path then reconciliation.
    pub async fn load(&mut self) -> Result<&AttendanceRecord, ApiError> {
        self.restore_cached();
        self.reconcile().await
    }

    pub async fn record_clock_in(&mut self, kind: ClockInKind) -> Result<ActionResponse, ApiError> {
        let user_id = self.require_user()?;
        let now = self.now_label();

        let response = self.backend.clock_in(user_id, kind).await?;

        let today = self.clock.today();
        self.record = AttendanceRecord::working(today, now.clone());
        self.window.arm_on(today, &now);
        self.corrected = None;
        self.persist();
        Ok(response)
    }

    pub async fn record_clock_out(&mut self) -> Result<ActionResponse, ApiError> {
        let user_id = self.require_user()?;
        let Some(clock_in) = self.record.clock_in.clone() else {
            return Err(ApiError::Validation(Message::NotClockedIn.to_string()));
        };
        let now = self.now_label();

        let response = self.backend.clock_out(user_id).await?;

        self.record.duration = self.break_rule.compute(&clock_in, &now)?;
        self.record.clock_out = Some(now);
        self.record.status = AttendanceStatus::Complete;
        self.window.disarm();
        self.persist();
        Ok(response)
    }

    /// Sends a corrected clock-in for the current session. On success the
    /// window is cleared and stays cleared for this session.
    pub async fn record_correction(&mut self, new_clock_in: &str) -> Result<ActionResponse, ApiError> {
        let user_id = self.require_user()?;
        let new_time = parse_clock_time(new_clock_in)
            .ok_or_else(|| ApiError::Validation(Message::InvalidTime(new_clock_in.to_string()).to_string()))?;
        let new_clock_in = format_clock_time(&new_time);
        let date = self.record.date;

        let update = AttendanceUpdate {
            user_id,
            date,
            start_time: Some(new_clock_in.clone()),
            end_time: None,
        };
        let response = self.backend.update_attendance(&update).await?;

        if let Some(clock_out) = self.record.clock_out.as_deref() {
            self.record.duration = self.break_rule.compute(&new_clock_in, clock_out)?;
        }
        self.record.clock_in = Some(new_clock_in);
        self.window.disarm();
        self.corrected = Some(date.and_time(new_time));
        self.persist();
        Ok(response)
    }

    fn reset(&mut self, today: NaiveDate) {
        self.record = AttendanceRecord::empty(today);
        self.window.disarm();
        self.persist();
    }

    fn read(&self, key: StateKey) -> Option<String> {
        match self.state.get(key) {
            Ok(value) => value,
            Err(e) => {
                msg_debug!(format!("reading {} failed: {}", key.as_str(), e));
                None
            }
        }
    }

    /// Writes the record and the original clock-in to the client state.
    /// Failures are logged only: the server remains the source of truth.
    fn persist(&self) {
        let date = self.record.date.format(DATE_FORMAT).to_string();
        let has_clock_in = self.record.clock_in.is_some();
        let corrected = self.corrected.map(|corrected| corrected.format(CORRECTED_FORMAT).to_string());
        let writes = [
            (StateKey::CurrentClockIn, self.record.clock_in.as_deref()),
            (StateKey::CurrentClockOut, self.record.clock_out.as_deref().filter(|_| has_clock_in)),
            (StateKey::CurrentAttendanceStatus, Some(self.record.status.as_str()).filter(|_| has_clock_in)),
            (StateKey::CurrentAttendanceDate, Some(date.as_str())),
            (StateKey::OriginalClockInTime, self.window.original()),
            (StateKey::CorrectedClockIn, corrected.as_deref()),
        ];

        for (key, value) in writes {
            if let Err(e) = self.state.put(key, value) {
                msg_debug!(format!("writing {} failed: {}", key.as_str(), e));
            }
        }
    }
}

/// Date of a server timestamp such as `2025-05-25T23:50:00` or `2025-05-25`.
fn session_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.get(..10)?, DATE_FORMAT).ok()
}
