use anyhow::Result;
use clap::Args;

use super::output;
use crate::context::AppContext;

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    /// Reads the stored identity; no request is made
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let Some(user) = ctx.auth().current_user() else {
            println!("You are not logged in.");
            println!();
            println!("Use 'gym-console login' to authenticate.");
            return Ok(());
        };

        output::success("Authenticated as:");
        println!();
        output::field("Username", &user.username);
        output::field("Name", user.display_name());
        output::field("Email", output::optional(Some(user.email.as_str())));
        output::field("Role", user.role);
        output::field("User ID", user.id);
        output::field("Phone", output::optional(user.phone_number.as_deref()));
        if let Some(joined) = user.date_joined {
            output::field("Joined", joined.format(&ctx.config().ui.date_format));
        }

        Ok(())
    }
}
