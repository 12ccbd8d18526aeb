#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === ATTENDANCE MESSAGES ===
    ClockInCompleted(String),       // time
    RemoteClockInCompleted(String), // time
    ClockOutCompleted(String),      // time
    ClockTimeEdited(String),        // new time
    ClockInFailed,
    RemoteClockInFailed,
    ClockOutFailed,
    ClockTimeEditFailed,
    ClockInError,
    RemoteClockInError,
    ClockOutError,
    ClockTimeEditError,
    NotClockedIn,
    AlreadyWorking,
    EditWindowClosed(i64), // window length in minutes
    EditAllowedUntil(String),
    EditNotAllowed,
    UserIdMissing,
    TodayStatusFetchFailed,
    HistoryLoadFailed,
    HistoryLoadError,
    HistoryEmpty(String), // month
    TodayHeader,
    HistoryHeader(String), // month
    WatchStarted,
    WatchStopped,
    WorkSummary { work: String, break_time: String },

    // === VALIDATION MESSAGES ===
    InvalidTime(String),
    InvalidDate(String),
    InvalidMonth(String),
    ReasonRequired,

    // === AUTHENTICATION MESSAGES ===
    LoginSucceeded(String), // username
    LoginFailed,
    LoginNoToken,
    ServerCommunicationFailed,
    SessionExpired,
    SessionUnreadable,
    LoggedOut,
    NotLoggedIn,
    LoggedInAs { username: String, department: String },
    LastActiveScreen(String),
    PromptUsername,
    PromptPassword,
    ConfirmLogout,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleServer,
    ConfigModuleAttendance,
    PromptSelectModules,
    PromptApiUrl,
    PromptTimeoutSecs,
    PromptEditWindowMinutes,
    PromptTickIntervalMs,
    PromptReconcileDelayMs,
    PromptMessageTtlSecs,
    PromptBreakThresholdMinutes,
    PromptBreakMinutes,
    ServerNotConfigured,

    // === SCHEDULE MESSAGES ===
    ScheduleHeader(String), // month
    ScheduleStats {
        work: usize,
        remote: usize,
        holiday: usize,
        unset: usize,
        total: usize,
    },
    ScheduleSaveFailed,
    ScheduleSubmitted,
    ScheduleSubmitFailed,
    ScheduleIncomplete(usize), // unset days
    ScheduleLoadFailed,
    SubmittedSchedulesLoadFailed,
    SubmittedSchedulesHeader,
    NoSubmittedSchedules,
    ScheduleDayOutsideMonth(String),
    ScheduleTimeOrder,
    ScheduleDaySet(String, String), // date, kind
    ScheduleDayCleared(String),
    ScheduleBatchApplied(usize),
    ScheduleWeekdaysSet(usize),
    ScheduleCleared,

    // === LOCATION MESSAGES ===
    LocationsHeader,
    NoLocations,
    LocationCreated(String), // name
    LocationUpdated(i64),
    LocationDeleted(i64),
    LocationsLoadFailed,
    LocationSaveFailed,
    LocationDeleteFailed,
    LocationNameEmpty,
    LocationTimeOrder,
    ConfirmDeleteLocation(i64),

    // === REQUEST MESSAGES ===
    CorrectionRequestSubmitted,
    CorrectionRequestFailed,
    CorrectionRequestNoTimes,
    HolidayRequestSubmitted(String), // date
    HolidayRequestFailed,
    OvertimeRequestSubmitted(String), // date
    OvertimeRequestFailed,
    OvertimeEndBeforeStart,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === GENERIC ===
    OperationCancelled,
}
