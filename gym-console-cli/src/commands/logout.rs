use anyhow::Result;
use clap::Args;

use super::output;
use crate::context::AppContext;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if ctx.auth().current_user().is_none() && !ctx.auth().is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        ctx.auth().logout()?;
        output::success("Logged out successfully!");

        Ok(())
    }
}
