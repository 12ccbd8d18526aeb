use super::{finish_action, screens, status, AppContext};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let mut screen = AppContext::load(screens::ATTENDANCE)?.open_attendance().await?;

    let result = screen.clock_out().await;
    status::render_today(&screen)?;
    screen.close();

    let worked = finish_action(screen.banner(), result)?;
    msg_print!(Message::WorkSummary {
        work: worked.work_label(),
        break_time: worked.break_label(),
    });
    Ok(())
}
