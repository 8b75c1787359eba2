use anyhow::{anyhow, Result};
use clap::Args;

use super::output;
use crate::context::AppContext;
use crate::dialogs::Prompter;

#[derive(Args)]
pub struct LoginCommand {
    /// Username (prompted when omitted)
    #[arg(short, long)]
    username: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        println!("Gym Console - Login");
        println!();

        let username = match self.username {
            Some(username) => username,
            None => prompter.input("Username", None)?.trim().to_string(),
        };
        let password = prompter.password("Password")?;

        let pb = output::spinner(&format!("Logging in as {}...", username));
        let result = ctx.auth().login(&username, &password).await;
        pb.finish_and_clear();

        match result {
            Ok(user) => {
                output::success("Login successful!");
                println!();
                println!("Welcome, {}!", user.display_name());
                println!("Role: {}", user.role);
                Ok(())
            }
            Err(e) => Err(anyhow!(e.user_message("Login failed. Please check your credentials."))),
        }
    }
}
