//! Logout.

use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct LogoutArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(logout_args: LogoutArgs) -> Result<()> {
    if !logout_args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmLogout.to_string())
            .default(true)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    Session::new()?.logout()?;
    msg_success!(Message::LoggedOut);
    Ok(())
}
