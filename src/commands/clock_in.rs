use super::{finish_action, screens, status, AppContext};
use crate::api::ClockInKind;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ClockInArgs {
    /// Clock in as working remotely
    #[arg(short, long)]
    remote: bool,
}

pub async fn cmd(clock_in_args: ClockInArgs) -> Result<()> {
    let mut screen = AppContext::load(screens::ATTENDANCE)?.open_attendance().await?;
    let kind = if clock_in_args.remote { ClockInKind::Remote } else { ClockInKind::Work };

    let result = screen.clock_in(kind).await;
    status::render_today(&screen)?;
    screen.close();
    finish_action(screen.banner(), result)
}
