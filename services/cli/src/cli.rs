use crate::commands::{
    run_applications, run_chat, run_dashboard, run_notifications, run_scholarships,
    ApplicationCommand, ChatArgs, NotificationArgs, ScholarshipArgs,
};
use crate::demo::{run_demo, DemoArgs};
use crate::infra::{open_session, Output};
use clap::{Parser, Subcommand};
use scholarbot::config::AppConfig;
use scholarbot::error::AppError;
use scholarbot::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "ScholarBot",
    about = "Browse scholarships, track applications, and chat with the scholarship assistant",
    version
)]
struct Cli {
    /// E-mail address to sign in with
    #[arg(long, global = true, default_value = "alex.johnson@mit.edu")]
    user: String,
    /// Password for the sign-in
    #[arg(long, global = true, default_value = "demo", hide_default_value = true)]
    secret: String,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search and filter the scholarship catalog, optionally toggling bookmarks
    Scholarships(ScholarshipArgs),
    /// List, withdraw, or decide applications
    Applications {
        #[command(subcommand)]
        command: ApplicationCommand,
    },
    /// Show headline statistics and the analytics breakdowns
    Dashboard,
    /// List and manage notifications
    Notifications(NotificationArgs),
    /// Talk to the scholarship assistant
    Chat(ChatArgs),
    /// Walk through every feature against the seed catalog (default command)
    Demo(DemoArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(?config.environment, "scholarbot cli starting");

    let output = Output { json: cli.json };
    let mut session = open_session(&config, &cli.user, &cli.secret)?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Scholarships(args) => run_scholarships(&mut session, args, output)?,
        Command::Applications { command } => run_applications(&mut session, command, output)?,
        Command::Dashboard => run_dashboard(&session, output)?,
        Command::Notifications(args) => run_notifications(&mut session, args, output)?,
        Command::Chat(args) => run_chat(&session, args, output).await?,
        Command::Demo(args) => run_demo(&mut session, args, output).await?,
    }

    session.teardown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarbot::applications::ApplicationStatus;

    #[test]
    fn defaults_to_demo_with_seed_user() {
        let cli = Cli::try_parse_from(["scholarbot"]).expect("parses");
        assert!(cli.command.is_none());
        assert_eq!(cli.user, "alex.johnson@mit.edu");
        assert!(!cli.json);
    }

    #[test]
    fn parses_decide_with_status_and_date() {
        let cli = Cli::try_parse_from([
            "scholarbot",
            "--json",
            "applications",
            "decide",
            "2",
            "--status",
            "Approved",
            "--on",
            "2024-09-30",
        ])
        .expect("parses");
        assert!(cli.json);
        match cli.command {
            Some(Command::Applications {
                command: ApplicationCommand::Decide { id, status, on, .. },
            }) => {
                assert_eq!(id, "2");
                assert_eq!(status, ApplicationStatus::Approved);
                assert_eq!(on.map(|date| date.to_string()).as_deref(), Some("2024-09-30"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_status_filter() {
        let result = Cli::try_parse_from([
            "scholarbot",
            "applications",
            "list",
            "--status",
            "withdrawn",
        ]);
        assert!(result.is_err());
    }
}
