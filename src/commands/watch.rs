//! Keeps today's attendance on screen.
//!
//! The edit-window ticker runs in the background; the screen is redrawn
//! whenever the edit option appears or disappears. Ctrl-C stops watching
//! and cancels the ticker.

use super::{screens, status, AppContext};
use crate::libs::messages::Message;
use crate::{msg_debug, msg_info};
use anyhow::Result;
use tokio::signal;
use tokio::sync::watch;

pub async fn cmd() -> Result<()> {
    let mut screen = AppContext::load(screens::ATTENDANCE)?.open_attendance().await?;
    msg_info!(Message::WatchStarted);
    status::render(&screen)?;

    let mut updates = screen.edit_updates();
    let mut shown = screen.is_edit_allowed();

    loop {
        let event = tokio::select! {
            _ = signal::ctrl_c() => None,
            flipped = next_flip(&mut updates, shown) => Some(flipped),
        };

        match event {
            None => break,
            Some(Some(allowed)) => {
                msg_debug!(format!("edit window flipped to {}", allowed));
                shown = allowed;
                status::render(&screen)?;
            }
            // Ticker finished; only Ctrl-C is left to wait for.
            Some(None) => updates = None,
        }
    }

    screen.close();
    msg_info!(Message::WatchStopped);
    Ok(())
}

/// Waits until the ticker publishes a value different from `shown`.
/// `None` once the ticker has gone away.
async fn next_flip(updates: &mut Option<watch::Receiver<bool>>, shown: bool) -> Option<bool> {
    match updates {
        Some(rx) => rx.wait_for(|allowed| *allowed != shown).await.ok().map(|allowed| *allowed),
        None => std::future::pending().await,
    }
}
