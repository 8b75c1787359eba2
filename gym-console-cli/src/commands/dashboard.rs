use anyhow::Result;
use chrono::Local;
use clap::Args;

use super::output::{self, Table};
use super::sessions::start_labels;
use crate::api::{Members, Sessions, Trainers};
use crate::context::AppContext;
use crate::summary::DashboardSummary;
use crate::ui::{App, Dashboard};

#[derive(Args)]
pub struct DashboardCommand {
    /// Launch the interactive terminal dashboard
    #[arg(short, long)]
    interactive: bool,
}

impl DashboardCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        ctx.require_user()?;

        let pb = output::spinner("Loading dashboard...");
        let summary = DashboardSummary::load(
            &ctx.resource::<Members>(),
            &ctx.resource::<Trainers>(),
            &ctx.resource::<Sessions>(),
            Local::now().date_naive(),
        )
        .await;
        pb.finish_and_clear();

        if self.interactive {
            let app = App::new(summary, ctx.config().ui.time_pattern());
            let mut dashboard = Dashboard::new(app)?;
            dashboard.run(ctx).await?;
            return Ok(());
        }

        print_summary(ctx, &summary);
        Ok(())
    }
}

fn print_summary(ctx: &AppContext, summary: &DashboardSummary) {
    let ui = &ctx.config().ui;

    output::heading("Dashboard");
    output::field("Members", summary.total_members);
    output::field("Trainers", summary.total_trainers);
    output::field("Sessions", summary.total_sessions);
    output::field("Today's attendance", summary.todays_attendance);
    println!();

    output::heading("Upcoming Sessions");
    let mut upcoming = Table::new(&["Date", "Time", "Type", "Trainer", "Member"]);
    for s in &summary.upcoming_sessions {
        let (date, time) = start_labels(ui, s);
        upcoming.row(vec![
            date,
            time,
            s.session_type.to_string(),
            s.trainer_label(),
            s.member_label(),
        ]);
    }
    upcoming.print(ui.page_size, "No upcoming sessions.");
    println!();

    output::heading("Recent Members");
    let mut recent = Table::new(&["Name", "Tier", "Since", "Active"]);
    for m in &summary.recent_members {
        recent.row(vec![
            m.display_name(),
            m.membership_type.to_string(),
            m.membership_start_date.format(&ui.date_format).to_string(),
            output::flag(m.is_active),
        ]);
    }
    recent.print(ui.page_size, "No members yet.");
}
