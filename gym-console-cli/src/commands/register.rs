use anyhow::{anyhow, Result};
use clap::Args;

use super::output;
use crate::context::AppContext;
use crate::dialogs::{run_dialog, Prompter, RegisterForm};

#[derive(Args)]
pub struct RegisterCommand {}

impl RegisterCommand {
    pub async fn execute(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        println!("Gym Console - Create Account");
        println!();

        let Some(request) = run_dialog(prompter, RegisterForm::default(), "Create this account?")? else {
            println!("Cancelled.");
            return Ok(());
        };

        let pb = output::spinner("Creating account...");
        let result = ctx.auth().register(&request).await;
        pb.finish_and_clear();

        match result {
            Ok(user) => {
                output::success("Account created!");
                println!();
                println!("Welcome, {}!", user.display_name());
                Ok(())
            }
            Err(e) => Err(anyhow!(e.user_message("Registration failed. Please try again."))),
        }
    }
}
