//! Attendance screen controller.
//!
//! [`AttendanceScreen`] sits between the commands and the
//! [`AttendanceStore`]. For every user action it:
//!
//! 1. clears the previous banner and checks the guards (logged in, not
//!    already working, actually working, still inside the edit window);
//! 2. calls the store;
//! 3. on success sets a success banner, waits the reconciliation delay and
//!    then refreshes the month's history and today's status;
//! 4. on failure sets an error banner and reconciles right away.
//!
//! The edit-window ticker is restarted whenever the original clock-in
//! changes and is cancelled by [`AttendanceScreen::close`]. Dropping the
//! screen drops the ticker, which aborts it as well.

use crate::api::{ApiError, AttendanceBackend, ClockInKind, HistoryRecord};
use crate::db::client_state::ClientState;
use crate::libs::attendance::AttendanceRecord;
use crate::libs::banner::{Banner, BannerMessage};
use crate::libs::clock::Clock;
use crate::libs::config::AttendanceConfig;
use crate::libs::edit_window::{EditWindowState, EditWindowTicker};
use crate::libs::formatter::{format_clock_time, format_month, format_to_canonical, parse_clock_time, parse_month};
use crate::libs::messages::Message;
use crate::libs::store::AttendanceStore;
use crate::libs::work_time::WorkDuration;
use crate::msg_debug;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::sleep;

/// Break minutes assumed for a history row the server sent without one.
pub const DEFAULT_HISTORY_BREAK_MINUTES: i64 = 60;

/// Messages for one kind of action: `failed` for a server rejection,
/// `error` for a transport failure.
struct ActionTexts {
    failed: Message,
    error: Message,
}

pub struct AttendanceScreen<B: AttendanceBackend> {
    store: AttendanceStore<B>,
    config: AttendanceConfig,
    banner: Banner,
    history: Vec<HistoryRecord>,
    history_error: Option<ApiError>,
    selected_month: String,
    ticker: Option<EditWindowTicker>,
}

impl<B: AttendanceBackend> AttendanceScreen<B> {
    pub fn new(backend: B, clock: Arc<dyn Clock>, state: ClientState, user_id: Option<i64>, config: AttendanceConfig) -> Self {
        let selected_month = format_month(&clock.today());
        let banner = Banner::new(config.message_ttl());
        let store = AttendanceStore::new(backend, clock, state, user_id, &config);

        Self {
            store,
            config,
            banner,
            history: Vec::new(),
            history_error: None,
            selected_month,
            ticker: None,
        }
    }

    pub fn record(&self) -> &AttendanceRecord {
        self.store.record()
    }

    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Why the last history load failed, if it did.
    pub fn history_error(&self) -> Option<&ApiError> {
        self.history_error.as_ref()
    }

    pub fn selected_month(&self) -> &str {
        &self.selected_month
    }

    pub fn banner(&self) -> Option<&BannerMessage> {
        self.banner.current()
    }

    pub fn store(&self) -> &AttendanceStore<B> {
        &self.store
    }

    /// Whether the edit option is shown right now.
    pub fn is_edit_allowed(&self) -> bool {
        match &self.ticker {
            Some(ticker) => ticker.is_allowed() && self.store.is_edit_allowed(),
            None => self.store.is_edit_allowed(),
        }
    }

    pub fn edit_state(&self) -> EditWindowState {
        self.store.window().state(self.store.clock().now())
    }

    /// `HH:MM` at which the edit option disappears, while it is shown.
    pub fn edit_deadline(&self) -> Option<String> {
        if !self.is_edit_allowed() {
            return None;
        }
        self.store.window().deadline_label(self.store.clock().now())
    }

    /// Receiver that changes whenever the ticker re-evaluates the window.
    pub fn edit_updates(&self) -> Option<watch::Receiver<bool>> {
        self.ticker.as_ref().map(|ticker| ticker.subscribe())
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|ticker| ticker.is_running())
    }

    /// Initial load: cached state, then history and reconciliation.
    pub async fn open(&mut self) {
        if self.store.user_id().is_none() {
            self.banner.error(Message::UserIdMissing.to_string());
            return;
        }

        self.store.restore_cached();
        self.restart_ticker();
        self.refresh().await;
    }

    pub async fn clock_in(&mut self, kind: ClockInKind) -> Result<(), ApiError> {
        self.banner.clear();
        self.require_user()?;

        if self.store.record().is_working() {
            return Err(self.reject(Message::AlreadyWorking));
        }

        let texts = match kind {
            ClockInKind::Work => ActionTexts {
                failed: Message::ClockInFailed,
                error: Message::ClockInError,
            },
            ClockInKind::Remote => ActionTexts {
                failed: Message::RemoteClockInFailed,
                error: Message::RemoteClockInError,
            },
        };

        match self.store.record_clock_in(kind).await {
            Ok(response) => {
                let time = self.store.record().clock_in.clone().unwrap_or_default();
                let fallback = match kind {
                    ClockInKind::Work => Message::ClockInCompleted(time),
                    ClockInKind::Remote => Message::RemoteClockInCompleted(time),
                };
                let text = response.message.filter(|m| !m.is_empty()).unwrap_or_else(|| fallback.to_string());
                self.succeed(text).await;
                Ok(())
            }
            Err(e) => Err(self.fail(e, texts).await),
        }
    }

    /// Clocks out and returns the worked time computed for the day. The
    /// follow-up reconciliation resets today's record, so the duration is
    /// only available from this return value.
    pub async fn clock_out(&mut self) -> Result<WorkDuration, ApiError> {
        self.banner.clear();
        self.require_user()?;

        if !self.store.record().is_working() {
            return Err(self.reject(Message::NotClockedIn));
        }

        let texts = ActionTexts {
            failed: Message::ClockOutFailed,
            error: Message::ClockOutError,
        };

        match self.store.record_clock_out().await {
            Ok(_) => {
                let duration = self.store.record().duration;
                let time = self.store.record().clock_out.clone().unwrap_or_default();
                self.succeed(Message::ClockOutCompleted(time).to_string()).await;
                Ok(duration)
            }
            Err(e) => Err(self.fail(e, texts).await),
        }
    }

    /// Corrects today's clock-in. Only offered inside the edit window.
    pub async fn edit_clock_in(&mut self, new_time: &str) -> Result<(), ApiError> {
        self.banner.clear();
        self.require_user()?;

        if !self.is_edit_allowed() {
            return Err(self.reject(Message::EditWindowClosed(self.config.window_minutes())));
        }

        let Some(new_time) = parse_clock_time(new_time).map(|time| format_clock_time(&time)) else {
            return Err(self.reject(Message::InvalidTime(new_time.to_string())));
        };

        let texts = ActionTexts {
            failed: Message::ClockTimeEditFailed,
            error: Message::ClockTimeEditError,
        };

        match self.store.record_correction(&new_time).await {
            Ok(_) => {
                self.succeed(Message::ClockTimeEdited(new_time).to_string()).await;
                Ok(())
            }
            Err(e) => Err(self.fail(e, texts).await),
        }
    }

    /// Switches the history table to `month` (`YYYY-MM`).
    pub async fn change_month(&mut self, month: &str) -> Result<(), ApiError> {
        let Some(start) = parse_month(month) else {
            return Err(self.reject(Message::InvalidMonth(month.to_string())));
        };
        self.selected_month = format_month(&start);
        self.load_history().await;
        Ok(())
    }

    /// Stops the edit-window ticker.
    pub fn close(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.close();
        }
    }

    /// History for the selected month, then today's status.
    pub async fn refresh(&mut self) {
        self.load_history().await;
        self.reconcile().await;
    }

    async fn load_history(&mut self) {
        let Some(user_id) = self.store.user_id() else {
            return;
        };

        match self.store.backend().monthly_history(user_id, &self.selected_month).await {
            Ok(records) => {
                self.history = records.into_iter().map(normalize_history).collect();
                self.history_error = None;
            }
            Err(e) => {
                msg_debug!(format!("history load failed: {}", e));
                let message = match &e {
                    ApiError::Network(_) => Message::HistoryLoadError,
                    _ => Message::HistoryLoadFailed,
                };
                self.banner.error(message.to_string());
                self.history.clear();
                self.history_error = Some(e);
            }
        }
    }

    async fn reconcile(&mut self) {
        let result = self.store.reconcile().await.map(|_| ());
        if let Err(e) = result {
            // Keep the action's own error visible if there is one.
            if !self.banner.is_error() {
                msg_debug!(format!("status fetch failed: {}", e));
                self.banner.error(Message::TodayStatusFetchFailed.to_string());
            }
        }
        self.restart_ticker();
    }

    async fn succeed(&mut self, text: String) {
        self.banner.success(text);
        self.restart_ticker();
        sleep(self.config.reconcile_delay()).await;
        self.refresh().await;
    }

    async fn fail(&mut self, error: ApiError, texts: ActionTexts) -> ApiError {
        let text = match &error {
            ApiError::Validation(message) => message.clone(),
            ApiError::Backend { .. } => error.server_message().map(str::to_string).unwrap_or_else(|| texts.failed.to_string()),
            ApiError::Network(_) => texts.error.to_string(),
        };
        self.banner.error(text);
        self.reconcile().await;
        error
    }

    fn reject(&mut self, message: Message) -> ApiError {
        let text = message.to_string();
        self.banner.error(text.clone());
        ApiError::Validation(text)
    }

    fn require_user(&mut self) -> Result<i64, ApiError> {
        match self.store.user_id() {
            Some(user_id) => Ok(user_id),
            None => Err(self.reject(Message::UserIdMissing)),
        }
    }

    fn restart_ticker(&mut self) {
        self.close();
        if self.store.window().original().is_some() {
            self.ticker = Some(EditWindowTicker::start(self.store.clock(), self.store.window(), self.config.tick_interval()));
        }
    }
}

/// Canonical times and the default break for a server history row.
pub fn normalize_history(record: HistoryRecord) -> HistoryRecord {
    HistoryRecord {
        clock_in: format_to_canonical(record.clock_in.as_deref()),
        clock_out: format_to_canonical(record.clock_out.as_deref()),
        total_break_minutes: record.total_break_minutes.or(Some(DEFAULT_HISTORY_BREAK_MINUTES)),
        ..record
    }
}
