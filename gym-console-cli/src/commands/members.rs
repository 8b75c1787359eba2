use anyhow::Result;
use chrono::Local;
use clap::{ArgAction, Subcommand};

use super::crud;
use super::output::{self, Table};
use crate::api::Members;
use crate::context::AppContext;
use crate::dialogs::{run_dialog, MemberForm, Prompter};
use crate::models::{Member, MemberUpdate};

#[derive(Subcommand)]
pub enum MemberCommands {
    /// List all members
    List,

    /// Show member details
    Show {
        /// Member ID
        id: i64,
    },

    /// Create a member account (admin only)
    Create,

    /// Activate or deactivate a membership
    SetActive {
        /// Member ID
        id: i64,

        /// New active flag
        #[arg(action = ArgAction::Set)]
        active: bool,
    },

    /// Delete a member
    Delete {
        /// Member ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl MemberCommands {
    pub async fn execute(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        match self {
            MemberCommands::List => list_members(ctx).await,
            MemberCommands::Show { id } => show_member(ctx, id).await,
            MemberCommands::Create => create_member(ctx, prompter).await,
            MemberCommands::SetActive { id, active } => set_active(ctx, id, active).await,
            MemberCommands::Delete { id, force } => delete_member(ctx, prompter, id, force).await,
        }
    }
}

fn render(ctx: &AppContext, members: &[Member]) {
    let date_format = &ctx.config().ui.date_format;
    let mut table = Table::new(&["ID", "Name", "Username", "Email", "Tier", "Start", "End", "Active"]);

    for m in members {
        table.row(vec![
            m.id.to_string(),
            m.display_name(),
            output::optional(m.username.as_deref()),
            output::optional(m.email.as_deref()),
            m.membership_type.to_string(),
            m.membership_start_date.format(date_format).to_string(),
            m.membership_end_date.format(date_format).to_string(),
            output::flag(m.is_active),
        ]);
    }

    output::heading("Members");
    table.print(ctx.config().ui.page_size, "No members found.");
}

async fn reload(ctx: &AppContext) {
    let members = crud::load_list(&ctx.resource::<Members>()).await;
    render(ctx, &members);
}

pub async fn list_members(ctx: &AppContext) -> Result<()> {
    ctx.require_user()?;
    reload(ctx).await;
    Ok(())
}

pub async fn show_member(ctx: &AppContext, id: i64) -> Result<()> {
    ctx.require_user()?;

    let m = crud::fetch_one(&ctx.resource::<Members>(), id).await?;
    let date_format = &ctx.config().ui.date_format;

    output::heading(&format!("Member #{}", m.id));
    output::field("Name", m.display_name());
    output::field("Username", output::optional(m.username.as_deref()));
    output::field("Email", output::optional(m.email.as_deref()));
    output::field("User ID", m.user);
    output::field("Membership", m.membership_type);
    output::field("Start date", m.membership_start_date.format(date_format));
    output::field("End date", m.membership_end_date.format(date_format));
    output::field("Active", output::yes_no(m.is_active));
    output::field("Emergency contact", output::optional(m.emergency_contact.as_deref()));
    output::field("Medical conditions", output::optional(m.medical_conditions.as_deref()));

    Ok(())
}

/// Admin-only. Anyone else gets a warning and no dialog.
pub async fn create_member(ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
    let user = ctx.require_user()?;
    if !user.is_admin() {
        tracing::warn!("Only admins can create members.");
        return Ok(());
    }

    let form = MemberForm::new(Local::now().date_naive());
    let Some(payload) = run_dialog(prompter, form, "Create this member?")? else {
        println!("Cancelled.");
        return Ok(());
    };

    let client = ctx.resource::<Members>();
    crud::create(&client, &payload).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn set_active(ctx: &AppContext, id: i64, active: bool) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Members>();
    let existing = crud::fetch_one(&client, id).await?;

    if existing.is_active == active {
        println!("Member #{} is already {}.", id, if active { "active" } else { "inactive" });
        return Ok(());
    }

    let update = MemberUpdate {
        is_active: Some(active),
        ..Default::default()
    };
    crud::update(&client, id, &update).await?;
    reload(ctx).await;
    Ok(())
}

pub async fn delete_member(
    ctx: &AppContext,
    prompter: &mut dyn Prompter,
    id: i64,
    force: bool,
) -> Result<()> {
    ctx.require_user()?;

    let client = ctx.resource::<Members>();
    if crud::delete_with_confirm(&client, prompter, id, force).await? {
        reload(ctx).await;
    }
    Ok(())
}
