//! Command-line screens.
//!
//! Every subcommand is one screen of the client. Commands that talk to the
//! server start from an [`AppContext`]: the configuration, the restored
//! session and a [`RestBackend`] carrying the session token.

pub mod clock_in;
pub mod clock_out;
pub mod edit;
pub mod history;
pub mod init;
pub mod location;
pub mod login;
pub mod logout;
pub mod request;
pub mod schedule;
pub mod status;
pub mod watch;

use crate::api::{ApiError, RestBackend};
use crate::db::client_state::ClientState;
use crate::libs::banner::{BannerKind, BannerMessage};
use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::screen::AttendanceScreen;
use crate::libs::session::{Session, SessionStatus, UserIdentity};
use crate::{msg_bail_anyhow, msg_debug, msg_error, msg_error_anyhow, msg_success, msg_warning};
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Log in to the attendance server")]
    Login(login::LoginArgs),
    #[command(about = "Log out and forget the stored session")]
    Logout(logout::LogoutArgs),
    #[command(about = "Show today's attendance")]
    Status,
    #[command(about = "Clock in for today")]
    ClockIn(clock_in::ClockInArgs),
    #[command(about = "Clock out for today")]
    ClockOut,
    #[command(about = "Correct today's clock-in time within the edit window", arg_required_else_help = true)]
    Edit(edit::EditArgs),
    #[command(about = "Show monthly attendance history")]
    History(history::HistoryArgs),
    #[command(about = "Keep today's attendance on screen and track the edit window")]
    Watch,
    #[command(about = "Plan and submit a month schedule")]
    Schedule(schedule::ScheduleArgs),
    #[command(about = "Manage work locations")]
    Location(location::LocationArgs),
    #[command(about = "Submit correction, holiday and overtime requests")]
    Request(request::RequestArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Login(args) => login::cmd(args).await,
            Commands::Logout(args) => logout::cmd(args),
            Commands::Status => status::cmd().await,
            Commands::ClockIn(args) => clock_in::cmd(args).await,
            Commands::ClockOut => clock_out::cmd().await,
            Commands::Edit(args) => edit::cmd(args).await,
            Commands::History(args) => history::cmd(args).await,
            Commands::Watch => watch::cmd().await,
            Commands::Schedule(args) => schedule::cmd(args).await,
            Commands::Location(args) => location::cmd(args).await,
            Commands::Request(args) => request::cmd(args).await,
        }
    }
}

/// Names stored as the last active screen.
pub mod screens {
    pub const ATTENDANCE: &str = "attendance";
    pub const HISTORY: &str = "history";
    pub const SCHEDULE: &str = "schedule";
    pub const LOCATION: &str = "location";
    pub const REQUEST: &str = "request";
}

/// Everything a server-backed command needs.
pub struct AppContext {
    pub config: Config,
    pub session: Session,
    pub identity: Option<UserIdentity>,
    pub backend: RestBackend,
}

impl AppContext {
    /// Restores the session and records `screen` as the last active one.
    /// An expired or unreadable session is reported and treated as logged out.
    pub fn load(screen: &str) -> Result<Self> {
        let config = Config::read()?;
        let session = Session::new()?;
        let mut backend = RestBackend::from_config(&config)?;

        let identity = match session.restore(Utc::now())? {
            SessionStatus::Active { identity, token } => {
                backend = backend.with_token(token);
                Some(identity)
            }
            SessionStatus::Expired => {
                msg_warning!(Message::SessionExpired);
                None
            }
            SessionStatus::Unreadable => {
                msg_warning!(Message::SessionUnreadable);
                None
            }
            SessionStatus::Missing => None,
        };

        if let Err(e) = session.set_last_screen(screen) {
            msg_debug!(format!("could not store last active screen: {}", e));
        }

        Ok(Self {
            config,
            session,
            identity,
            backend,
        })
    }

    pub fn require_identity(&self) -> Result<&UserIdentity> {
        match &self.identity {
            Some(identity) => Ok(identity),
            None => msg_bail_anyhow!(Message::NotLoggedIn),
        }
    }

    /// Attendance screen for the logged-in user, opened and reconciled.
    pub async fn open_attendance(self) -> Result<AttendanceScreen<RestBackend>> {
        let user_id = self.identity.as_ref().map(|identity| identity.user_id);
        let mut screen = AttendanceScreen::new(self.backend, Arc::new(SystemClock), ClientState::new()?, user_id, self.config.attendance());
        screen.open().await;
        Ok(screen)
    }
}

/// Prints the screen's banner, if any.
pub fn show_banner(banner: Option<&BannerMessage>) {
    match banner {
        Some(BannerMessage {
            kind: BannerKind::Success,
            text,
        }) => msg_success!(text),
        Some(BannerMessage { kind: BannerKind::Error, text }) => msg_error!(text),
        None => {}
    }
}

/// Ends a command built around one screen action.
///
/// A successful action prints the banner. A failed one becomes the command's
/// error, worded like the error banner when the screen set one, so the
/// process exits non-zero.
pub fn finish_action<T>(banner: Option<&BannerMessage>, result: Result<T, ApiError>) -> Result<T> {
    match result {
        Ok(value) => {
            show_banner(banner);
            Ok(value)
        }
        Err(e) => match banner {
            Some(BannerMessage { kind: BannerKind::Error, text }) => msg_bail_anyhow!(text),
            _ => msg_bail_anyhow!(e),
        },
    }
}

/// Turns a backend failure into a command error: the validation text or the
/// server's message when there is one, `fallback` otherwise.
pub fn api_failure(error: ApiError, fallback: Message) -> anyhow::Error {
    msg_debug!(format!("request failed: {}", error));
    match error {
        ApiError::Validation(text) => msg_error_anyhow!(text),
        ApiError::Backend { message, .. } if !message.is_empty() => msg_error_anyhow!(message),
        _ => msg_error_anyhow!(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_banner(text: &str) -> BannerMessage {
        BannerMessage {
            kind: BannerKind::Error,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_failed_action_is_a_command_error() {
        let banner = error_banner("Clock-in failed");
        let result: Result<(), ApiError> = Err(ApiError::Network("connection refused".to_string()));

        let error = finish_action(Some(&banner), result).unwrap_err();
        assert_eq!(error.to_string(), "❌ Clock-in failed");
    }

    #[test]
    fn test_failed_action_without_banner_uses_the_error() {
        let result: Result<(), ApiError> = Err(ApiError::Validation("Invalid time".to_string()));

        let error = finish_action(None, result).unwrap_err();
        assert!(error.to_string().contains("Invalid time"));
    }

    #[test]
    fn test_successful_action_passes_value_through() {
        let banner = BannerMessage {
            kind: BannerKind::Success,
            text: "Clocked in".to_string(),
        };
        assert_eq!(finish_action(Some(&banner), Ok(42)).unwrap(), 42);

        // A later status refresh failure does not undo the action.
        let stale = error_banner("Could not load today's status");
        assert_eq!(finish_action(Some(&stale), Ok("done")).unwrap(), "done");
    }
}
