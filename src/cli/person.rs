//! Person CLI commands
//!
//! Implements CLI commands for managing the people expenses are split
//! between.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_person_details, format_person_list};
use crate::error::FairshareResult;
use crate::ledger::ShareScope;
use crate::models::NewPerson;
use crate::services::{BalanceService, ExpenseService, PersonService};
use crate::storage::Store;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a person
    Add {
        /// Display name
        name: String,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// Avatar color (#RRGGBB); the next palette color when omitted
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List everyone with their balance
    List,
    /// Show a person's details
    Show {
        /// Person name or ID
        person: String,
    },
    /// Edit a person; pass an empty value to clear an optional field
    Edit {
        /// Person name or ID
        person: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a person who is not part of any expense
    Delete {
        /// Person name or ID
        person: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a person command
pub fn handle_person_command(
    store: &dyn Store,
    settings: &Settings,
    cmd: PersonCommands,
) -> FairshareResult<()> {
    let service = PersonService::new(store);

    match cmd {
        PersonCommands::Add {
            name,
            email,
            phone,
            color,
        } => {
            let person = service.create(NewPerson {
                name,
                email,
                phone,
                avatar_color: color,
            })?;
            println!("Added person: {} ({})", person.name, person.id);
        }

        PersonCommands::List => {
            let sheet = BalanceService::new(store).sheet(ShareScope::All)?;
            println!(
                "{}",
                format_person_list(&sheet.people, &sheet.balances, &settings.currency_symbol)
            );
        }

        PersonCommands::Show { person } => {
            let p = service.resolve(&person)?;
            let balance = BalanceService::new(store)
                .sheet(ShareScope::All)?
                .balances
                .get(p.id);
            let expense_count = ExpenseService::new(store)
                .all()?
                .iter()
                .filter(|e| e.involves(p.id))
                .count();

            print!(
                "{}",
                format_person_details(&p, balance, expense_count, &settings.currency_symbol)
            );
        }

        PersonCommands::Edit {
            person,
            name,
            email,
            phone,
            color,
        } => {
            let p = service.resolve(&person)?;
            let mut changes = p.to_new();
            if let Some(name) = name {
                changes.name = name;
            }
            if let Some(email) = email {
                changes.email = Some(email);
            }
            if let Some(phone) = phone {
                changes.phone = Some(phone);
            }
            if let Some(color) = color {
                changes.avatar_color = Some(color);
            }

            let updated = service.update(p.id, changes)?;
            println!("Updated person: {} ({})", updated.name, updated.id);
        }

        PersonCommands::Delete { person, force } => {
            let p = service.resolve(&person)?;

            if !force {
                println!("About to delete person: {}", p.name);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(p.id)?;
            println!("Deleted person: {}", deleted.name);
        }
    }

    Ok(())
}
