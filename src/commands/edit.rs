//! Self-correction of today's clock-in.
//!
//! Only possible while the edit window is open. Past days go through a
//! correction request instead (`kintai request correction`).

use super::{finish_action, screens, status, AppContext};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Corrected clock-in time (HH:MM)
    #[arg(required = true)]
    time: String,
}

pub async fn cmd(edit_args: EditArgs) -> Result<()> {
    let mut screen = AppContext::load(screens::ATTENDANCE)?.open_attendance().await?;

    let result = screen.edit_clock_in(&edit_args.time).await;
    status::render_today(&screen)?;
    screen.close();
    finish_action(screen.banner(), result)
}
