//! Client search and maintenance

use agenda_domain::{Client, ClientDraft, ClientId, SearchOutcome};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::confirm;
use crate::context::AppContext;
use crate::render;

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Find clients by name or CPF
    Search { term: String },
    /// Show one client's details
    Show { id: String },
    /// List every client
    List,
    /// Register a client
    Create(ClientArgs),
    /// Change a client; omitted fields keep their current value
    Update {
        id: String,

        #[command(flatten)]
        fields: ClientArgs,
    },
    /// Remove a client
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ClientArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub cpf: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,
}

impl ClientArgs {
    fn draft(&self, current: Option<&Client>) -> Result<ClientDraft> {
        let birth_date = match &self.birth_date {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .with_context(|| format!("invalid birth date '{raw}' (expected YYYY-MM-DD)"))?,
            ),
            None => current.and_then(|client| client.birth_date),
        };

        Ok(ClientDraft {
            name: pick(&self.name, current.map(|client| client.name.as_str())),
            email: pick(&self.email, current.and_then(|client| client.email.as_deref())),
            phone: pick(&self.phone, current.and_then(|client| client.phone.as_deref())),
            legal_id: pick(&self.cpf, current.and_then(|client| client.legal_id.as_deref())),
            birth_date,
        })
    }
}

fn pick(flag: &Option<String>, current: Option<&str>) -> String {
    flag.clone().or_else(|| current.map(str::to_string)).unwrap_or_default()
}

pub async fn run(ctx: &AppContext, command: ClientCommand) -> Result<()> {
    match command {
        ClientCommand::Search { term } => match ctx.sync.search_clients(&term).await? {
            SearchOutcome::Idle => println!("Type part of a name or CPF to search"),
            SearchOutcome::NoResults => println!("No clients found"),
            SearchOutcome::Matches(clients) => render::clients(&clients),
            SearchOutcome::Superseded => {}
        },
        ClientCommand::Show { id } => {
            let client = ctx.sync.get_client(&ClientId::new(id)).await?;
            render::client_details(&client);
        }
        ClientCommand::List => render::clients(&ctx.snapshot()?.clients),
        ClientCommand::Create(fields) => {
            let receipt = ctx.sync.create_client(&fields.draft(None)?).await?;
            render::receipt("Client registered", &receipt);
        }
        ClientCommand::Update { id, fields } => {
            let id = ClientId::new(id);
            let current = ctx.sync.get_client(&id).await?;
            let receipt = ctx.sync.update_client(&id, &fields.draft(Some(&current))?).await?;
            render::receipt("Client updated", &receipt);
        }
        ClientCommand::Delete { id, yes } => {
            let id = ClientId::new(id);
            if !confirm(&format!("Remove client {id}?"), yes)? {
                return Ok(());
            }
            let receipt = ctx.sync.delete_client(&id).await?;
            render::receipt("Client removed", &receipt);
        }
    }
    Ok(())
}
