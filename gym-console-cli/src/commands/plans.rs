use anyhow::Result;
use clap::Subcommand;

use super::crud;
use super::output::{self, Table};
use crate::api::{Machines, Members, Plans};
use crate::context::AppContext;
use crate::dialogs::{run_dialog, PlanDialog, Prompter};
use crate::models::{Plan, PlanUpdate};

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List workout plans
    List {
        /// Only plans assigned to this trainee (user ID)
        #[arg(short, long)]
        trainee: Option<i64>,
    },

    /// Show plan details
    Show {
        /// Plan ID
        id: i64,
    },

    /// Create a workout plan
    Create,

    /// Edit a workout plan
    Edit {
        /// Plan ID
        id: i64,
    },

    /// Delete a workout plan
    Delete {
        /// Plan ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl PlanCommands {
    pub async fn execute(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        match self {
            PlanCommands::List { trainee } => list_plans(ctx, trainee).await,
            PlanCommands::Show { id } => show_plan(ctx, id).await,
            PlanCommands::Create => create_plan(ctx, prompter).await,
            PlanCommands::Edit { id } => edit_plan(ctx, prompter, id).await,
            PlanCommands::Delete { id, force } => delete_plan(ctx, prompter, id, force).await,
        }
    }
}

fn duration_label(minutes: Option<u32>) -> String {
    minutes.map_or_else(|| "-".to_string(), |m| format!("{} min", m))
}

fn render(ctx: &AppContext, plans: &[Plan]) {
    let mut table = Table::new(&["ID", "Trainee", "Description", "Days", "Machines", "Volume", "Duration"]);

    for p in plans {
        table.row(vec![
            p.id.to_string(),
            p.trainee_display(),
            p.description.clone(),
            p.day_names().join(", "),
            p.machines.clone(),
            format!("{}x{}", p.sets, p.reps),
            duration_label(p.duration_minutes),
        ]);
    }

    output::heading("Workout Plans");
    table.print(ctx.config().ui.page_size, "No workout plans found.");
}

async fn reload(ctx: &AppContext) {
    let plans = crud::load_list(&ctx.resource::<Plans>()).await;
    render(ctx, &plans);
}

pub async fn list_plans(ctx: &AppContext, trainee: Option<i64>) -> Result<()> {
    ctx.require_user()?;

    let Some(trainee_id) = trainee else {
        reload(ctx).await;
        return Ok(());
    };

    let plans = match ctx.resource::<Plans>().list_for_trainee(trainee_id).await {
        Ok(plans) => plans,
        Err(e) => {
            tracing::error!("Error loading plans for trainee {}: {}", trainee_id, e);
            Vec::new()
        }
    };
    render(ctx, &plans);
    Ok(())
}

pub async fn show_plan(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.require_user()?;

    let p = crud::fetch_one(&ctx.resource::<Plans>(), id).await?;

    output::heading(&format!("Workout Plan #{}", p.id));
    output::field("Trainee", format!("{} (#{})", p.trainee_display(), p.trainee.id));
    output::field("Description", &p.description);
    output::field("Days", p.day_names().join(", "));
    output::field("Machines", &p.machines);
    output::field("Sets", p.sets);
    output::field("Reps", p.reps);
    output::field("Duration", duration_label(p.duration_minutes));

    Ok(())
}

async fn dialog(ctx: &AppContext) -> PlanDialog {
    let pb = output::spinner("Loading trainees and machines...");
    let dialog = PlanDialog::load(&ctx.resource::<Members>(), &ctx.resource::<Machines>()).await;
    pb.finish_and_clear();
    dialog
}

pub async fn create_plan(ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
    ctx.require_user()?;

    let form = dialog(ctx).await.form(None);
    let Some(payload) = run_dialog(prompter, form, "Create this plan?")? else {
        println!("Cancelled.");
        return Ok(());
    };

    crud::create(&ctx.resource::<Plans>(), &payload).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn edit_plan(ctx: &AppContext, prompter: &mut dyn Prompter, id: i64) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Plans>();
    let existing = crud::fetch_one(&client, id).await?;

    let form = dialog(ctx).await.form(Some(&existing));
    let Some(payload) = run_dialog(prompter, form, "Save changes?")? else {
        println!("Cancelled.");
        return Ok(());
    };

    let update = PlanUpdate::changes(&existing, &payload);
    if update.is_empty() {
        println!("No changes to save.");
        return Ok(());
    }

    crud::update(&client, id, &update).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn delete_plan(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    id: i64,
    force: bool,
) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Plans>();
    if crud::delete_with_confirm(&client, prompter, id, force).await? {
        reload(ctx).await;
    }
    Ok(())
}
