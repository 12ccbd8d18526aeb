//! Today's attendance screen.

use super::{screens, show_banner, AppContext};
use crate::api::AttendanceBackend;
use crate::libs::messages::Message;
use crate::libs::screen::AttendanceScreen;
use crate::libs::session::Session;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let previous_screen = Session::new()?.last_screen()?;
    let context = AppContext::load(screens::ATTENDANCE)?;

    if let Some(identity) = &context.identity {
        msg_print!(Message::LoggedInAs {
            username: identity.username.clone(),
            department: identity.department().to_string(),
        });
    }
    if let Some(previous_screen) = previous_screen {
        msg_info!(Message::LastActiveScreen(previous_screen));
    }

    let mut screen = context.open_attendance().await?;
    render(&screen)?;
    screen.close();
    Ok(())
}

/// Today's table, the edit window line and the current banner.
pub fn render<B: AttendanceBackend>(screen: &AttendanceScreen<B>) -> Result<()> {
    render_today(screen)?;
    show_banner(screen.banner());
    Ok(())
}

/// Today's table and the edit window line.
pub fn render_today<B: AttendanceBackend>(screen: &AttendanceScreen<B>) -> Result<()> {
    msg_print!(Message::TodayHeader, true);
    View::today(screen.record())?;

    match screen.edit_deadline() {
        Some(deadline) => msg_info!(Message::EditAllowedUntil(deadline)),
        None => msg_print!(Message::EditNotAllowed),
    }
    Ok(())
}
