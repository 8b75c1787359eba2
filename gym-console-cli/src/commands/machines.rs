use anyhow::Result;
use clap::Subcommand;

use super::crud;
use super::output::{self, Table};
use crate::api::Machines;
use crate::context::AppContext;
use crate::dialogs::{run_dialog, MachineForm, Prompter};
use crate::models::{Machine, MachineUpdate};

#[derive(Subcommand)]
pub enum MachineCommands {
    /// List all machines
    List,

    /// Show machine details
    Show {
        /// Machine ID
        id: i64,
    },

    /// Add a machine
    Create,

    /// Edit a machine
    Edit {
        /// Machine ID
        id: i64,
    },

    /// Delete a machine
    Delete {
        /// Machine ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl MachineCommands {
    pub async fn execute(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        match self {
            MachineCommands::List => list_machines(ctx).await,
            MachineCommands::Show { id } => show_machine(ctx, id).await,
            MachineCommands::Create => create_machine(ctx, prompter).await,
            MachineCommands::Edit { id } => edit_machine(ctx, prompter, id).await,
            MachineCommands::Delete { id, force } => {
                delete_machine(ctx, prompter, id, force).await
            }
        }
    }
}

fn render(ctx: &AppContext, machines: &[Machine]) {
    let mut table = Table::new(&["ID", "Code", "Name", "Description"]);

    for m in machines {
        table.row(vec![
            m.id.to_string(),
            m.code.clone(),
            m.name.clone(),
            m.description.clone(),
        ]);
    }

    output::heading("Machines");
    table.print(ctx.config().ui.page_size, "No machines found.");
}

async fn reload(ctx: &AppContext) {
    let machines = crud::load_list(&ctx.resource::<Machines>()).await;
    render(ctx, &machines);
}

pub async fn list_machines(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    reload(ctx).await;
    Ok(())
}

pub async fn show_machine(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.require_user()?;

    let m = crud::fetch_one(&ctx.resource::<Machines>(), id).await?;

    output::heading(&format!("Machine #{}", m.id));
    output::field("Code", &m.code);
    output::field("Name", &m.name);
    output::field("Description", output::optional(Some(m.description.as_str())));
    if let Some(created) = m.created_at {
        output::field("Added", created.format(&ctx.config().ui.date_format));
    }

    Ok(())
}

pub async fn create_machine(ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
    ctx.require_user()?;

    let Some(payload) = run_dialog(prompter, MachineForm::default(), "Add this machine?")? else {
        println!("Cancelled.");
        return Ok(());
    };

    crud::create(&ctx.resource::<Machines>(), &payload).await?;
    reload(ctx).await;
    Ok(())
}

/// Only fields that differ from the stored record are sent
pub async fn edit_machine(ctx: &AppContext, prompter: &mut dyn Prompter, id: i64) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Machines>();
    let existing = crud::fetch_one(&client, id).await?;

    let form = MachineForm::from_machine(&existing);
    let Some(payload) = run_dialog(prompter, form, "Save changes?")? else {
        println!("Cancelled.");
        return Ok(());
    };

    let update = MachineUpdate::changes(&existing, &payload);
    if update.is_empty() {
        println!("No changes to save.");
        return Ok(());
    }

    crud::update(&client, id, &update).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn delete_machine(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    id: i64,
    force: bool,
) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Machines>();
    if crud::delete_with_confirm(&client, prompter, id, force).await? {
        reload(ctx).await;
    }
    Ok(())
}
