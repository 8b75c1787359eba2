use anyhow::Result;
use clap::{ArgAction, Subcommand};

use super::crud;
use super::output::{self, Table};
use crate::api::Trainers;
use crate::context::AppContext;
use crate::dialogs::{run_dialog, Prompter, TrainerForm};
use crate::models::{Trainer, TrainerUpdate};

#[derive(Subcommand)]
pub enum TrainerCommands {
    /// List all trainers
    List,

    /// Show trainer details
    Show {
        /// Trainer ID
        id: i64,
    },

    /// Create a trainer account (admin only)
    Create,

    /// Mark a trainer as available or unavailable
    SetAvailable {
        /// Trainer ID
        id: i64,

        #[arg(action = ArgAction::Set)]
        available: bool,
    },

    /// Delete a trainer
    Delete {
        /// Trainer ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl TrainerCommands {
    pub async fn execute(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        match self {
            TrainerCommands::List => list_trainers(ctx).await,
            TrainerCommands::Show { id } => show_trainer(ctx, id).await,
            TrainerCommands::Create => create_trainer(ctx, prompter).await,
            TrainerCommands::SetAvailable { id, available } => {
                set_available(ctx, id, available).await
            }
            TrainerCommands::Delete { id, force } => {
                delete_trainer(ctx, prompter, id, force).await
            }
        }
    }
}

fn render(ctx: &AppContext, trainers: &[Trainer]) {
    let mut table = Table::new(&["ID", "Name", "Specialization", "Experience", "Rate", "Available"]);

    for t in trainers {
        table.row(vec![
            t.id.to_string(),
            t.display_name(),
            t.specialization.clone(),
            format!("{} yrs", t.experience_years),
            t.hourly_rate.clone(),
            output::flag(t.is_available),
        ]);
    }

    output::heading("Trainers");
    table.print(ctx.config().ui.page_size, "No trainers found.");
}

async fn reload(ctx: &AppContext) {
    let trainers = crud::load_list(&ctx.resource::<Trainers>()).await;
    render(ctx, &trainers);
}

pub async fn list_trainers(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    reload(ctx).await;
    Ok(())
}

pub async fn show_trainer(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.require_user()?;

    let t = crud::fetch_one(&ctx.resource::<Trainers>(), id).await?;

    output::heading(&format!("Trainer #{}", t.id));
    output::field("Name", t.display_name());
    output::field("Username", output::optional(t.username.as_deref()));
    output::field("Email", output::optional(t.email.as_deref()));
    output::field("Specialization", &t.specialization);
    output::field("Experience", format!("{} years", t.experience_years));
    output::field("Hourly rate", &t.hourly_rate);
    output::field("Available", output::yes_no(t.is_available));
    output::field("Bio", output::optional(t.bio.as_deref()));

    Ok(())
}

/// Admin-only, like member creation
pub async fn create_trainer(ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
    let user = ctx.require_user()?;
    if !user.is_admin() {
        tracing::warn!("Only admins can create trainers.");
        return Ok(());
    }

    let Some(payload) = run_dialog(prompter, TrainerForm::default(), "Create this trainer?")? else {
        println!("Cancelled.");
        return Ok(());
    };

    crud::create(&ctx.resource::<Trainers>(), &payload).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn set_available(ctx: &AppContext, id: i64, available: bool) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Trainers>();
    let existing = crud::fetch_one(&client, id).await?;

    if existing.is_available == available {
        println!("Nothing to change for trainer #{}.", id);
        return Ok(());
    }

    let update = TrainerUpdate {
        is_available: Some(available),
        ..Default::default()
    };
    crud::update(&client, id, &update).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn delete_trainer(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    id: i64,
    force: bool,
) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Trainers>();
    if crud::delete_with_confirm(&client, prompter, id, force).await? {
        reload(ctx).await;
    }
    Ok(())
}
