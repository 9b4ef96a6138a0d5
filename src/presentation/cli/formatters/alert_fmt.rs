use colored::Colorize;

use crate::application::services::alert::UpdateOutcome;
use crate::domain::entities::alert::{Alert, DetailedAlert};

/// Strips ANSI/OSC escape sequences from a string to prevent terminal injection.
fn sanitize_terminal(input: &str) -> String {
    input.chars().filter(|c| *c != '\x1b').collect()
}

fn state_badge(enabled: bool) -> String {
    if enabled {
        format!("{}", " ENABLED ".on_green().black().bold())
    } else {
        format!("{}", " DISABLED ".on_bright_black().white())
    }
}

pub fn format_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("{}", "No alerts visible.".dimmed());
        return;
    }
    println!(
        "{:>6}  {:<10}  {:<30}  {}",
        "ID".bold(),
        "STATE".bold(),
        "NAME".bold(),
        "ADMINS".bold()
    );
    for alert in alerts {
        println!(
            "{:>6}  {:<10}  {:<30}  {}",
            alert.id,
            state_badge(alert.enabled),
            sanitize_terminal(&alert.name),
            sanitize_terminal(&alert.admins.join(", ")).dimmed()
        );
    }
}

pub fn format_detailed_alert(alert: &DetailedAlert) {
    println!(
        "{} {} {}",
        format!("#{}", alert.id).cyan(),
        sanitize_terminal(&alert.name).bold(),
        state_badge(alert.enabled)
    );
    for admin in &alert.admins {
        println!(
            "  admin {} ({} alert(s))",
            sanitize_terminal(&admin.name),
            admin.admined_alerts.len()
        );
    }
}

pub fn format_update_outcome(outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::Synced(alert) => println!(
            "{} alert #{} is now {}",
            "✔".green().bold(),
            alert.id,
            state_badge(alert.enabled)
        ),
        UpdateOutcome::SyncFailed { alert, error } => println!(
            "{} alert #{} saved as {} but not synchronized: {}",
            "⚠".yellow().bold(),
            alert.id,
            state_badge(alert.enabled),
            error
        ),
        UpdateOutcome::SaveFailed(error) => {
            println!("{} alert not saved: {}", "✘".red().bold(), error);
        }
    }
}
