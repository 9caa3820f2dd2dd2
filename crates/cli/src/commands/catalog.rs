//! Staff and procedure lists from the settings screen

use agenda_domain::{ProcedureId, StaffId};
use anyhow::Result;
use clap::Subcommand;

use super::confirm;
use crate::context::AppContext;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Staff,
    Procedures,
}

impl Catalog {
    fn singular(self) -> &'static str {
        match self {
            Self::Staff => "staff member",
            Self::Procedures => "procedure",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List all entries
    List,
    /// Add an entry
    Add { name: String },
    /// Rename an entry
    Rename { id: String, name: String },
    /// Remove an entry
    Remove {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run(ctx: &AppContext, catalog: Catalog, command: CatalogCommand) -> Result<()> {
    let kind = catalog.singular();
    match command {
        CatalogCommand::List => {
            let snapshot = ctx.snapshot()?;
            let entries: Vec<(&str, &str)> = match catalog {
                Catalog::Staff => {
                    snapshot.staff.iter().map(|s| (s.id.as_str(), s.name.as_str())).collect()
                }
                Catalog::Procedures => {
                    snapshot.procedures.iter().map(|p| (p.id.as_str(), p.name.as_str())).collect()
                }
            };
            if entries.is_empty() {
                println!("No {kind} registered");
            }
            for (id, name) in entries {
                println!("{id:<12} {name}");
            }
        }
        CatalogCommand::Add { name } => {
            let receipt = match catalog {
                Catalog::Staff => ctx.sync.create_staff(&name).await?,
                Catalog::Procedures => ctx.sync.create_procedure(&name).await?,
            };
            render::receipt(&format!("Added {kind} \"{}\"", name.trim()), &receipt);
        }
        CatalogCommand::Rename { id, name } => {
            let receipt = match catalog {
                Catalog::Staff => ctx.sync.rename_staff(&StaffId::new(id), &name).await?,
                Catalog::Procedures => ctx.sync.rename_procedure(&ProcedureId::new(id), &name).await?,
            };
            render::receipt(&format!("Renamed {kind} to \"{}\"", name.trim()), &receipt);
        }
        CatalogCommand::Remove { id, yes } => {
            if !confirm(&format!("Remove {kind} {id}?"), yes)? {
                return Ok(());
            }
            let receipt = match catalog {
                Catalog::Staff => ctx.sync.delete_staff(&StaffId::new(id)).await?,
                Catalog::Procedures => ctx.sync.delete_procedure(&ProcedureId::new(id)).await?,
            };
            render::receipt(&format!("Removed {kind}"), &receipt);
        }
    }
    Ok(())
}
