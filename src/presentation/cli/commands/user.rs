use crate::application::services::alert::AlertService;
use crate::presentation::cli::app::UserCommand;

/// Runs one `user` subcommand.
///
/// # Errors
///
/// Returns an error if the name is blank or the store fails.
pub fn run_user(service: &AlertService, command: UserCommand) -> anyhow::Result<()> {
    match command {
        UserCommand::Add { name } => {
            let user = service.register_user(&name)?;
            println!(
                "User {} registered ({} alert(s) administered)",
                user.name,
                user.admined_alerts.len()
            );
        }
    }
    Ok(())
}
