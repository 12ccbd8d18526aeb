//! Schedule screen.
//!
//! Works on one month, the next one unless `--month` says otherwise. Every
//! change is saved as a draft right away; `submit` hands the month in and
//! is refused while any day is still unset.

use super::{api_failure, screens, AppContext};
use crate::api::{AttendanceBackend, ScheduleKind};
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::formatter::parse_month;
use crate::libs::messages::Message;
use crate::libs::requests::parse_date;
use crate::libs::schedule::{default_month, ScheduleMonth};
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_print, msg_success};
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ScheduleArgs {
    /// Month to work on (YYYY-MM), next month by default
    #[arg(short, long, global = true)]
    month: Option<String>,

    #[command(subcommand)]
    command: Option<ScheduleCommand>,
}

#[derive(Debug, Subcommand)]
enum ScheduleCommand {
    /// Show the month (default)
    Show,
    /// Set one day; setting a day to the kind it already has clears it
    Set {
        /// Day (YYYY-MM-DD)
        date: String,
        #[arg(value_enum)]
        kind: ScheduleKind,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Apply one kind and shift to a range of days
    Batch {
        /// First day (YYYY-MM-DD)
        from: String,
        /// Last day (YYYY-MM-DD)
        to: String,
        #[arg(value_enum)]
        kind: ScheduleKind,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Mark Monday to Friday as work days
    Weekdays,
    /// Clear one day, or the whole month without --date
    Clear {
        #[arg(long)]
        date: Option<String>,
    },
    /// Submit the month
    Submit,
    /// List submitted schedules
    Submitted,
}

pub async fn cmd(schedule_args: ScheduleArgs) -> Result<()> {
    let context = AppContext::load(screens::SCHEDULE)?;
    let user_id = context.require_identity()?.user_id;
    let backend = &context.backend;

    let month = match schedule_args.month.as_deref() {
        Some(month) => match parse_month(month) {
            Some(start) => start,
            None => msg_bail_anyhow!(Message::InvalidMonth(month.to_string())),
        },
        None => default_month(SystemClock.today()),
    };

    if let Some(ScheduleCommand::Submitted) = schedule_args.command {
        let schedules = backend
            .submitted_schedules(user_id)
            .await
            .map_err(|e| api_failure(e, Message::SubmittedSchedulesLoadFailed))?;
        msg_print!(Message::SubmittedSchedulesHeader, true);
        if schedules.is_empty() {
            msg_print!(Message::NoSubmittedSchedules);
        } else {
            View::submitted_schedules(&schedules)?;
        }
        return Ok(());
    }

    let days = backend
        .schedule(user_id, month)
        .await
        .map_err(|e| api_failure(e, Message::ScheduleLoadFailed))?;
    let mut schedule = ScheduleMonth::from_days(month, days);

    let changed = match schedule_args.command.unwrap_or(ScheduleCommand::Show) {
        ScheduleCommand::Show | ScheduleCommand::Submitted => None,
        ScheduleCommand::Set { date, kind, start, end } => {
            let date = parse_date(&date)?;
            let message = if start.is_some() || end.is_some() {
                schedule.set(date, kind, start.as_deref(), end.as_deref())?;
                Message::ScheduleDaySet(date.to_string(), kind.to_string())
            } else {
                match schedule.toggle(date, kind)? {
                    Some(kind) => Message::ScheduleDaySet(date.to_string(), kind.to_string()),
                    None => Message::ScheduleDayCleared(date.to_string()),
                }
            };
            Some(message)
        }
        ScheduleCommand::Batch { from, to, kind, start, end } => {
            let dates = date_range(parse_date(&from)?, parse_date(&to)?);
            let count = schedule.apply_batch(&dates, kind, start.as_deref(), end.as_deref())?;
            Some(Message::ScheduleBatchApplied(count))
        }
        ScheduleCommand::Weekdays => Some(Message::ScheduleWeekdaysSet(schedule.set_weekdays_work())),
        ScheduleCommand::Clear { date: Some(date) } => {
            let date = parse_date(&date)?;
            schedule.clear_day(date);
            Some(Message::ScheduleDayCleared(date.to_string()))
        }
        ScheduleCommand::Clear { date: None } => {
            schedule.clear();
            Some(Message::ScheduleCleared)
        }
        ScheduleCommand::Submit => {
            schedule.ensure_complete()?;
            let response = backend
                .submit_schedule(&schedule.draft(user_id))
                .await
                .map_err(|e| api_failure(e, Message::ScheduleSubmitFailed))?;
            msg_success!(response.message.filter(|m| !m.is_empty()).unwrap_or_else(|| Message::ScheduleSubmitted.to_string()));
            None
        }
    };

    if let Some(message) = changed {
        backend
            .save_schedule(&schedule.draft(user_id))
            .await
            .map_err(|e| api_failure(e, Message::ScheduleSaveFailed))?;
        msg_success!(message);
    }

    msg_print!(Message::ScheduleHeader(schedule.month()), true);
    View::schedule(&schedule)?;
    msg_print!(schedule.stats().message());
    Ok(())
}

/// Every date from `from` to `to`, both included. Empty when reversed.
fn date_range(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|date| *date <= to).collect()
}
