//! Display implementation for kintai application messages.
//!
//! All user-facing text lives here, in one match over [`Message`]. Adding a
//! variant forces an explicit wording decision at compile time, and call
//! sites never build strings of their own.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === ATTENDANCE MESSAGES ===
            Message::ClockInCompleted(time) => format!("Clock-in completed: {}", time),
            Message::RemoteClockInCompleted(time) => format!("Remote clock-in completed: {}", time),
            Message::ClockOutCompleted(time) => format!("Clock-out completed: {}", time),
            Message::ClockTimeEdited(time) => format!("Clock-in time corrected to {}", time),
            Message::ClockInFailed => "Clock-in failed".to_string(),
            Message::RemoteClockInFailed => "Remote clock-in failed".to_string(),
            Message::ClockOutFailed => "Clock-out failed".to_string(),
            Message::ClockTimeEditFailed => "Failed to correct the clock-in time".to_string(),
            Message::ClockInError => "An error occurred while clocking in".to_string(),
            Message::RemoteClockInError => "An error occurred while clocking in remotely".to_string(),
            Message::ClockOutError => "An error occurred while clocking out".to_string(),
            Message::ClockTimeEditError => "An error occurred while correcting the clock-in time".to_string(),
            Message::NotClockedIn => "You have not clocked in yet.".to_string(),
            Message::AlreadyWorking => "You are already clocked in.".to_string(),
            Message::EditWindowClosed(minutes) => {
                format!("The clock-in time can only be corrected within {} minutes of clocking in.", minutes)
            }
            Message::EditAllowedUntil(time) => format!("Clock-in time can be corrected until {}", time),
            Message::EditNotAllowed => "Clock-in time correction is not available".to_string(),
            Message::UserIdMissing => "User ID not found. Please log in again.".to_string(),
            Message::TodayStatusFetchFailed => "A network error occurred while fetching today's attendance.".to_string(),
            Message::HistoryLoadFailed => "Failed to load attendance history.".to_string(),
            Message::HistoryLoadError => "An error occurred while loading attendance history.".to_string(),
            Message::HistoryEmpty(month) => format!("No attendance records for {}", month),
            Message::TodayHeader => "Today's attendance".to_string(),
            Message::HistoryHeader(month) => format!("Attendance history for {}", month),
            Message::WatchStarted => "Watching attendance status. Press Ctrl-C to stop.".to_string(),
            Message::WatchStopped => "Stopped watching attendance status.".to_string(),
            Message::WorkSummary { work, break_time } => format!("Worked {} (break {})", work, break_time),

            // === VALIDATION MESSAGES ===
            Message::InvalidTime(value) => format!("Invalid time '{}', expected HH:MM", value),
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),
            Message::InvalidMonth(value) => format!("Invalid month '{}', expected YYYY-MM", value),
            Message::ReasonRequired => "A reason is required.".to_string(),

            // === AUTHENTICATION MESSAGES ===
            Message::LoginSucceeded(username) => format!("Logged in as {}", username),
            Message::LoginFailed => "Login failed.".to_string(),
            Message::LoginNoToken => "Login failed: the server did not return a token.".to_string(),
            Message::ServerCommunicationFailed => "An error occurred while communicating with the server.".to_string(),
            Message::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            Message::SessionUnreadable => "The saved session could not be read. Please log in again.".to_string(),
            Message::LoggedOut => "Logged out.".to_string(),
            Message::NotLoggedIn => "You are not logged in. Run `kintai login` first.".to_string(),
            Message::LoggedInAs { username, department } => format!("{} ({})", username, department),
            Message::LastActiveScreen(screen) => format!("Last active screen: {}", screen),
            Message::PromptUsername => "Username".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::ConfirmLogout => "Log out?".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleAttendance => "Attendance settings".to_string(),
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptApiUrl => "Enter the attendance API URL".to_string(),
            Message::PromptTimeoutSecs => "Enter request timeout (seconds)".to_string(),
            Message::PromptEditWindowMinutes => "Enter clock-in edit window (minutes)".to_string(),
            Message::PromptTickIntervalMs => "Enter edit window check interval (milliseconds)".to_string(),
            Message::PromptReconcileDelayMs => "Enter delay before refreshing after an action (milliseconds)".to_string(),
            Message::PromptMessageTtlSecs => "Enter how long messages stay visible (seconds)".to_string(),
            Message::PromptBreakThresholdMinutes => "Enter worked minutes after which a break is deducted".to_string(),
            Message::PromptBreakMinutes => "Enter deducted break length (minutes)".to_string(),
            Message::ServerNotConfigured => "The attendance API URL is not configured. Run `kintai init`.".to_string(),

            // === SCHEDULE MESSAGES ===
            Message::ScheduleHeader(month) => format!("Schedule for {}", month),
            Message::ScheduleStats {
                work,
                remote,
                holiday,
                unset,
                total,
            } => format!(
                "Work: {} | Remote: {} | Holiday: {} | Unset: {} | Total: {}",
                work, remote, holiday, unset, total
            ),
            Message::ScheduleSaveFailed => "Failed to save the schedule".to_string(),
            Message::ScheduleSubmitted => "Schedule submitted".to_string(),
            Message::ScheduleSubmitFailed => "Failed to submit the schedule".to_string(),
            Message::ScheduleIncomplete(unset) => {
                format!("Set a schedule for every day before submitting ({} day(s) unset)", unset)
            }
            Message::ScheduleLoadFailed => "Failed to load schedule data.".to_string(),
            Message::SubmittedSchedulesLoadFailed => "Failed to load submitted schedules.".to_string(),
            Message::SubmittedSchedulesHeader => "Submitted schedules".to_string(),
            Message::NoSubmittedSchedules => "No schedules submitted yet".to_string(),
            Message::ScheduleDayOutsideMonth(date) => format!("{} is not in the selected month", date),
            Message::ScheduleTimeOrder => "Start time must be before end time.".to_string(),
            Message::ScheduleDaySet(date, kind) => format!("{} set to {}", date, kind),
            Message::ScheduleDayCleared(date) => format!("{} cleared", date),
            Message::ScheduleBatchApplied(count) => format!("Applied to {} days", count),
            Message::ScheduleWeekdaysSet(count) => format!("{} weekdays set as work days", count),
            Message::ScheduleCleared => "Schedule cleared".to_string(),

            // === LOCATION MESSAGES ===
            Message::LocationsHeader => "Work locations".to_string(),
            Message::NoLocations => "No work locations registered".to_string(),
            Message::LocationCreated(name) => format!("Location '{}' registered", name),
            Message::LocationUpdated(id) => format!("Location {} updated", id),
            Message::LocationDeleted(id) => format!("Location {} deleted", id),
            Message::LocationsLoadFailed => "Failed to load work locations.".to_string(),
            Message::LocationSaveFailed => "Failed to save the work location".to_string(),
            Message::LocationDeleteFailed => "Failed to delete the work location".to_string(),
            Message::LocationNameEmpty => "Location name must not be empty.".to_string(),
            Message::LocationTimeOrder => "Location start time must be before its end time.".to_string(),
            Message::ConfirmDeleteLocation(id) => format!("Delete location {}?", id),

            // === REQUEST MESSAGES ===
            Message::CorrectionRequestSubmitted => "Attendance correction request submitted".to_string(),
            Message::CorrectionRequestFailed => "Failed to submit the attendance correction request".to_string(),
            Message::CorrectionRequestNoTimes => "Specify a corrected start time, end time, or both.".to_string(),
            Message::HolidayRequestSubmitted(date) => format!("Holiday request for {} submitted", date),
            Message::HolidayRequestFailed => "Failed to submit the holiday request".to_string(),
            Message::OvertimeRequestSubmitted(date) => format!("Overtime request for {} submitted", date),
            Message::OvertimeRequestFailed => "Failed to submit the overtime request".to_string(),
            Message::OvertimeEndBeforeStart => "Overtime end time must be after its start time.".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),

            // === GENERIC ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };

        write!(f, "{}", text)
    }
}
