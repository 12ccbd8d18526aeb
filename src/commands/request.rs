//! Correction, holiday and overtime requests.
//!
//! Input is validated locally first; nothing is sent for a request that
//! would be rejected for its shape.

use super::{api_failure, screens, AppContext};
use crate::api::{AttendanceBackend, HolidayKind};
use crate::libs::messages::Message;
use crate::libs::requests::{correction_request, holiday_request, overtime_request};
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct RequestArgs {
    #[command(subcommand)]
    command: RequestCommand,
}

#[derive(Debug, Subcommand)]
enum RequestCommand {
    /// Ask for a past day's attendance to be corrected
    Correction {
        /// Day to correct (YYYY-MM-DD)
        date: String,
        /// Corrected clock-in (HH:MM)
        #[arg(long)]
        start: Option<String>,
        /// Corrected clock-out (HH:MM)
        #[arg(long)]
        end: Option<String>,
        #[arg(short, long)]
        reason: String,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Request a day off
    Holiday {
        /// Day off (YYYY-MM-DD)
        date: String,
        #[arg(short, long, value_enum, default_value = "paid")]
        kind: HolidayKind,
        #[arg(short, long)]
        reason: String,
    },
    /// Request overtime for a day
    Overtime {
        /// Day (YYYY-MM-DD)
        date: String,
        /// Start (HH:MM)
        start: String,
        /// End (HH:MM)
        end: String,
        #[arg(short, long)]
        reason: String,
    },
}

pub async fn cmd(request_args: RequestArgs) -> Result<()> {
    let context = AppContext::load(screens::REQUEST)?;
    let user_id = context.require_identity()?.user_id;
    let backend = &context.backend;

    match request_args.command {
        RequestCommand::Correction {
            date,
            start,
            end,
            reason,
            comment,
        } => {
            let request = correction_request(user_id, &date, start.as_deref(), end.as_deref(), &reason, comment.as_deref())?;
            let ack = backend
                .submit_correction(&request)
                .await
                .map_err(|e| api_failure(e, Message::CorrectionRequestFailed))?;
            if !ack.success {
                match ack.message.filter(|m| !m.is_empty()) {
                    Some(message) => msg_bail_anyhow!(message),
                    None => msg_bail_anyhow!(Message::CorrectionRequestFailed),
                }
            }
            msg_success!(ack.message.filter(|m| !m.is_empty()).unwrap_or_else(|| Message::CorrectionRequestSubmitted.to_string()));
        }
        RequestCommand::Holiday { date, kind, reason } => {
            let request = holiday_request(user_id, &date, kind, &reason)?;
            let response = backend
                .submit_holiday(&request)
                .await
                .map_err(|e| api_failure(e, Message::HolidayRequestFailed))?;
            let fallback = Message::HolidayRequestSubmitted(request.holiday_date.to_string()).to_string();
            msg_success!(response.message.filter(|m| !m.is_empty()).unwrap_or(fallback));
        }
        RequestCommand::Overtime { date, start, end, reason } => {
            let request = overtime_request(user_id, &date, &start, &end, &reason)?;
            let response = backend
                .submit_overtime(&request)
                .await
                .map_err(|e| api_failure(e, Message::OvertimeRequestFailed))?;
            let fallback = Message::OvertimeRequestSubmitted(request.target_date.to_string()).to_string();
            msg_success!(response.message.filter(|m| !m.is_empty()).unwrap_or(fallback));
        }
    }
    Ok(())
}
