use anyhow::Context;

use crate::application::services::alert::AlertService;
use crate::domain::value_objects::enabled::parse_enabled;
use crate::domain::value_objects::principal::Principal;
use crate::presentation::cli::app::AlertCommand;
use crate::presentation::cli::formatters::alert_fmt::{
    format_alerts, format_detailed_alert, format_update_outcome,
};

fn acting_user(name: &str) -> anyhow::Result<Principal> {
    Principal::new(name).context("acting user name must not be blank or padded")
}

/// Runs one `alert` subcommand against the service, as the given user.
///
/// # Errors
///
/// Returns an error if the service refuses the operation, if an update is not
/// both saved and synchronized, or if JSON serialization fails. A save that
/// went through is kept even when its synchronization fails.
pub async fn run_alert(service: &AlertService, command: AlertCommand) -> anyhow::Result<()> {
    match command {
        AlertCommand::Create {
            name,
            enabled,
            as_user,
        } => {
            let principal = acting_user(&as_user)?;
            let alert =
                service.create_alert(Some(&principal), &name, parse_enabled(enabled.as_deref()))?;
            println!("Add alert successfully (id {})", alert.id);
        }
        AlertCommand::Update {
            id,
            enabled,
            as_user,
        } => {
            let principal = acting_user(&as_user)?;
            let outcome = service
                .update_alert(Some(&principal), id, parse_enabled(Some(&enabled)))
                .await?;
            format_update_outcome(&outcome);
            outcome.into_result()?;
        }
        AlertCommand::Get { id, json } => {
            let alert = service.get_detailed_alert(id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&alert)?);
            } else {
                format_detailed_alert(&alert);
            }
        }
        AlertCommand::List { as_user, json } => {
            let principal = as_user.and_then(Principal::new);
            let alerts = service.list_alerts(principal.as_ref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&alerts)?);
            } else {
                format_alerts(&alerts);
            }
        }
        AlertCommand::Delete { id, as_user } => {
            let principal = acting_user(&as_user)?;
            if service.delete_alert(Some(&principal), id)? {
                println!("Delete alert successfully");
            } else {
                println!("Alert #{id} does not exist, nothing to delete");
            }
        }
    }
    Ok(())
}
