use anyhow::Result;
use chrono::Local;
use clap::Subcommand;
use colored::Colorize;

use super::crud;
use super::output::{self, Table};
use crate::api::{Members, Sessions, Trainers};
use crate::config::UiConfig;
use crate::context::AppContext;
use crate::dialogs::{run_dialog, Prompter, SessionDialog};
use crate::models::{SessionStatus, SessionUpdate, TrainingSession};

#[derive(Subcommand)]
pub enum SessionCommands {
    /// List training sessions
    List,

    /// Show session details
    Show {
        /// Session ID
        id: i64,
    },

    /// Schedule a training session
    Create,

    /// Edit a training session
    Edit {
        /// Session ID
        id: i64,
    },

    /// Delete a training session
    Delete {
        /// Session ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl SessionCommands {
    pub async fn execute(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        match self {
            SessionCommands::List => list_sessions(ctx).await,
            SessionCommands::Show { id } => show_session(ctx, id).await,
            SessionCommands::Create => create_session(ctx, prompter).await,
            SessionCommands::Edit { id } => edit_session(ctx, prompter, id).await,
            SessionCommands::Delete { id, force } => {
                delete_session(ctx, prompter, id, force).await
            }
        }
    }
}

/// Local start as (date, time) strings
pub(crate) fn start_labels(ui: &UiConfig, session: &TrainingSession) -> (String, String) {
    let start = session.local_start();
    (
        start.format(&ui.date_format).to_string(),
        start.format(ui.time_pattern()).to_string(),
    )
}

fn render(ctx: &AppContext, sessions: &[TrainingSession]) {
    let ui = &ctx.config().ui;
    let mut table = Table::new(&[
        "ID", "Date", "Time", "Type", "Trainer", "Member", "Duration", "Status", "Price",
    ]);

    for s in sessions {
        let (date, time) = start_labels(ui, s);
        table.row(vec![
            s.id.to_string(),
            date,
            time,
            s.session_type.to_string(),
            s.trainer_label(),
            s.member_label(),
            format!("{} min", s.duration_minutes),
            s.status.to_string(),
            s.price.clone(),
        ]);
    }

    output::heading("Training Sessions");
    table.print(ui.page_size, "No training sessions found.");
}

async fn reload(ctx: &AppContext) {
    let sessions = crud::load_list(&ctx.resource::<Sessions>()).await;
    render(ctx, &sessions);
}

pub async fn list_sessions(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    reload(ctx).await;
    Ok(())
}

pub async fn show_session(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.require_user()?;

    let s = crud::fetch_one(&ctx.resource::<Sessions>(), id).await?;
    let (date, time) = start_labels(&ctx.config().ui, &s);

    let status = match s.status {
        SessionStatus::Scheduled => s.status.to_string().yellow(),
        SessionStatus::Completed => s.status.to_string().green(),
        SessionStatus::Cancelled => s.status.to_string().red(),
    };

    output::heading(&format!("Training Session #{}", s.id));
    output::field("Date", date);
    output::field("Time", time);
    output::field("Type", s.session_type);
    output::field("Trainer", s.trainer_label());
    output::field("Member", s.member_label());
    output::field("Duration", format!("{} min", s.duration_minutes));
    output::field("Status", status);
    output::field("Price", &s.price);
    output::field("Notes", output::optional(s.notes.as_deref()));

    Ok(())
}

async fn dialog(ctx: &AppContext) -> SessionDialog {
    let pb = output::spinner("Loading trainers and members...");
    let dialog =
        SessionDialog::load(&ctx.resource::<Trainers>(), &ctx.resource::<Members>()).await;
    pb.finish_and_clear();
    dialog
}

pub async fn create_session(ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
    ctx.require_user()?;

    let form = dialog(ctx).await.form(None, Local::now().date_naive());
    let Some(payload) = run_dialog(prompter, form, "Schedule this session?")? else {
        println!("Cancelled.");
        return Ok(());
    };

    crud::create(&ctx.resource::<Sessions>(), &payload).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn edit_session(ctx: &AppContext, prompter: &mut dyn Prompter, id: i64) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Sessions>();
    let existing = crud::fetch_one(&client, id).await?;

    let form = dialog(ctx)
        .await
        .form(Some(&existing), Local::now().date_naive());
    let Some(payload) = run_dialog(prompter, form, "Save changes?")? else {
        println!("Cancelled.");
        return Ok(());
    };

    let update = SessionUpdate::changes(&existing, &payload);
    if update.is_empty() {
        println!("No changes to save.");
        return Ok(());
    }

    crud::update(&client, id, &update).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn delete_session(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    id: i64,
    force: bool,
) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Sessions>();
    if crud::delete_with_confirm(&client, prompter, id, force).await? {
        reload(ctx).await;
    }
    Ok(())
}
