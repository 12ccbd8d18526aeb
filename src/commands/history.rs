use super::{finish_action, screens, AppContext};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Month to show (YYYY-MM), the current month by default
    #[arg(short, long)]
    month: Option<String>,
}

pub async fn cmd(history_args: HistoryArgs) -> Result<()> {
    let mut screen = AppContext::load(screens::HISTORY)?.open_attendance().await?;
    let result = match history_args.month.as_deref() {
        Some(month) => screen.change_month(month).await,
        None => Ok(()),
    }
    .and_then(|_| screen.history_error().cloned().map_or(Ok(()), Err));

    msg_print!(Message::HistoryHeader(screen.selected_month().to_string()), true);
    if screen.history().is_empty() {
        msg_print!(Message::HistoryEmpty(screen.selected_month().to_string()));
    } else {
        View::history(screen.history())?;
    }
    screen.close();
    finish_action(screen.banner(), result)
}
