//! Login screen.

use crate::api::{ApiError, AttendanceBackend, LoginCredentials, RestBackend};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::{msg_bail_anyhow, msg_print, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username; prompted for when omitted
    #[arg(short, long)]
    username: Option<String>,
}

pub async fn cmd(login_args: LoginArgs) -> Result<()> {
    let config = Config::read()?;
    let backend = RestBackend::from_config(&config)?;

    let username = match login_args.username {
        Some(username) => username,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUsername.to_string())
            .interact_text()?,
    };
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;

    let credentials = LoginCredentials { username, password };
    let response = match backend.login(&credentials).await {
        Ok(response) => response,
        Err(ApiError::Network(_)) => msg_bail_anyhow!(Message::ServerCommunicationFailed),
        Err(e) => match e.server_message() {
            Some(message) => msg_bail_anyhow!(message),
            None => msg_bail_anyhow!(Message::LoginFailed),
        },
    };

    let identity = Session::new()?.save_login(&response)?;
    msg_success!(Message::LoginSucceeded(identity.username.clone()));
    msg_print!(Message::LoggedInAs {
        username: identity.username.clone(),
        department: identity.department().to_string(),
    });
    Ok(())
}
