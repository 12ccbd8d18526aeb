//! Work location screen.

use super::{api_failure, screens, AppContext};
use crate::api::AttendanceBackend;
use crate::libs::messages::Message;
use crate::libs::requests::location_input;
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct LocationArgs {
    #[command(subcommand)]
    command: Option<LocationCommand>,
}

#[derive(Debug, Subcommand)]
enum LocationCommand {
    /// List registered locations (default)
    List,
    /// Register a location
    Add {
        name: String,
        /// Opening time (HH:MM)
        start: String,
        /// Closing time (HH:MM)
        end: String,
    },
    /// Change a location
    Update {
        id: i64,
        name: String,
        start: String,
        end: String,
    },
    /// Delete a location
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(location_args: LocationArgs) -> Result<()> {
    let context = AppContext::load(screens::LOCATION)?;
    context.require_identity()?;
    let backend = &context.backend;

    match location_args.command.unwrap_or(LocationCommand::List) {
        LocationCommand::List => {}
        LocationCommand::Add { name, start, end } => {
            let input = location_input(&name, &start, &end)?;
            let location = backend
                .create_location(&input)
                .await
                .map_err(|e| api_failure(e, Message::LocationSaveFailed))?;
            msg_success!(Message::LocationCreated(location.name));
        }
        LocationCommand::Update { id, name, start, end } => {
            let input = location_input(&name, &start, &end)?;
            backend
                .update_location(id, &input)
                .await
                .map_err(|e| api_failure(e, Message::LocationSaveFailed))?;
            msg_success!(Message::LocationUpdated(id));
        }
        LocationCommand::Delete { id, yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteLocation(id).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            backend
                .delete_location(id)
                .await
                .map_err(|e| api_failure(e, Message::LocationDeleteFailed))?;
            msg_success!(Message::LocationDeleted(id));
        }
    }

    let locations = backend
        .locations()
        .await
        .map_err(|e| api_failure(e, Message::LocationsLoadFailed))?;
    msg_print!(Message::LocationsHeader, true);
    if locations.is_empty() {
        msg_print!(Message::NoLocations);
    } else {
        View::locations(&locations)?;
    }
    Ok(())
}
