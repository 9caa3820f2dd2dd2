mod commands;
mod context;
mod render;

use std::path::PathBuf;

use agenda_infra::observability::{init_logging, LogFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::appointments::AppointmentCommand;
use crate::commands::catalog::{Catalog, CatalogCommand};
use crate::commands::clients::ClientCommand;
use crate::context::AppContext;

#[derive(Debug, Parser)]
#[command(name = "agenda")]
#[command(about = "Browse and edit the appointment calendar of a scheduling backend")]
#[command(version)]
struct Cli {
    /// Config file (JSON or TOML); overrides environment and discovered files
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List calendar events
    Calendar {
        /// First day to show (YYYY-MM-DD, local time)
        #[arg(long)]
        from: Option<String>,

        /// Last day to show, inclusive (YYYY-MM-DD, local time)
        #[arg(long)]
        to: Option<String>,
    },
    /// Book, move and cancel appointments
    #[command(subcommand)]
    Appointments(AppointmentCommand),
    /// Search and maintain clients
    #[command(subcommand)]
    Clients(ClientCommand),
    /// Manage staff members
    #[command(subcommand)]
    Staff(CatalogCommand),
    /// Manage procedures
    #[command(subcommand)]
    Procedures(CatalogCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let format = if cli.json_logs { LogFormat::Json } else { LogFormat::Text };
    init_logging(&cli.log_level, format)?;

    let config = agenda_infra::config::load(cli.config)?;
    let ctx = AppContext::connect(config).await?;

    match cli.command {
        Command::Calendar { from, to } => {
            commands::calendar::run(&ctx, from.as_deref(), to.as_deref())
        }
        Command::Appointments(command) => commands::appointments::run(&ctx, command).await,
        Command::Clients(command) => commands::clients::run(&ctx, command).await,
        Command::Staff(command) => commands::catalog::run(&ctx, Catalog::Staff, command).await,
        Command::Procedures(command) => {
            commands::catalog::run(&ctx, Catalog::Procedures, command).await
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_calendar_range() {
        let cli = Cli::try_parse_from(["agenda", "calendar", "--from", "2024-01-10", "--to", "2024-01-12"])
            .unwrap();
        match cli.command {
            Command::Calendar { from, to } => {
                assert_eq!(from.as_deref(), Some("2024-01-10"));
                assert_eq!(to.as_deref(), Some("2024-01-12"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["agenda", "staff", "list", "--config", "agenda.toml", "--json-logs"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("agenda.toml")));
        assert!(cli.json_logs);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn create_appointment_flags() {
        let cli = Cli::try_parse_from([
            "agenda",
            "appointments",
            "create",
            "--client",
            "c1",
            "--staff",
            "s1",
            "--procedure",
            "p1",
            "--start",
            "2024-01-10T10:00",
            "--duration",
            "30",
            "--allow-conflict",
        ])
        .unwrap();
        let Command::Appointments(AppointmentCommand::Create { booking, allow_conflict }) = cli.command
        else {
            panic!("expected appointments create");
        };
        assert!(allow_conflict);
        assert_eq!(booking.client.as_deref(), Some("c1"));
        assert_eq!(booking.duration, Some(30));
    }

    #[test]
    fn delete_all_accepts_phrase() {
        let cli = Cli::try_parse_from([
            "agenda",
            "appointments",
            "delete-all",
            "--phrase",
            "EXCLUIR TODOS OS AGENDAMENTOS",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Appointments(AppointmentCommand::DeleteAll { phrase: Some(_) })
        ));
    }

    #[test]
    fn rename_requires_id_and_name() {
        assert!(Cli::try_parse_from(["agenda", "procedures", "rename", "p1"]).is_err());
        assert!(Cli::try_parse_from(["agenda", "procedures", "rename", "p1", "Corte e escova"]).is_ok());
    }
}
