mod config_cmd;
mod crud;
mod dashboard;
mod login;
mod logout;
mod machines;
mod members;
mod output;
mod plans;
mod register;
mod sessions;
mod trainers;
mod whoami;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::context::AppContext;
use crate::dialogs::{Prompter, TerminalPrompter};

pub use dashboard::DashboardCommand;
pub use login::LoginCommand;
pub use logout::LogoutCommand;
pub use machines::{
    create_machine, delete_machine, edit_machine, list_machines, show_machine, MachineCommands,
};
pub use members::{
    create_member, delete_member, list_members, set_active, show_member, MemberCommands,
};
pub use plans::{create_plan, delete_plan, edit_plan, list_plans, show_plan, PlanCommands};
pub use register::RegisterCommand;
pub use sessions::{
    create_session, delete_session, edit_session, list_sessions, show_session, SessionCommands,
};
pub use trainers::{
    create_trainer, delete_trainer, list_trainers, set_available, show_trainer, TrainerCommands,
};
pub use whoami::WhoamiCommand;

#[derive(Parser)]
#[command(name = "gym-console")]
#[command(about = "Terminal administration console for gym management", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "GYM_CONSOLE_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the gym console
    Login(LoginCommand),

    /// Create an account and log in
    Register(RegisterCommand),

    /// Log out and forget the stored session
    Logout(LogoutCommand),

    /// Show the logged-in user
    Whoami(WhoamiCommand),

    /// Manage members
    #[command(subcommand)]
    Members(MemberCommands),

    /// Manage trainers
    #[command(subcommand)]
    Trainers(TrainerCommands),

    /// Manage machines
    #[command(subcommand)]
    Machines(MachineCommands),

    /// Manage workout plans
    #[command(subcommand)]
    Plans(PlanCommands),

    /// Manage training sessions
    #[command(subcommand)]
    Sessions(SessionCommands),

    /// Show the gym overview
    Dashboard(DashboardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Run the parsed command against the real terminal and session store
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Config(subcmd) => run_config(subcmd, self.config.as_deref()),
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
            command => {
                let ctx = AppContext::from_env(self.config)?;
                let mut prompter = TerminalPrompter::default();
                command.run(&ctx, &mut prompter).await
            }
        }
    }

    /// Run with an explicit context and prompter
    pub async fn execute_with(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        self.command.run(ctx, prompter).await
    }
}

impl Commands {
    async fn run(self, ctx: &AppContext, prompter: &mut dyn Prompter) -> Result<()> {
        match self {
            Commands::Login(cmd) => cmd.execute(ctx, prompter).await,
            Commands::Register(cmd) => cmd.execute(ctx, prompter).await,
            Commands::Logout(cmd) => cmd.execute(ctx).await,
            Commands::Whoami(cmd) => cmd.execute(ctx).await,
            Commands::Members(cmd) => cmd.execute(ctx, prompter).await,
            Commands::Trainers(cmd) => cmd.execute(ctx, prompter).await,
            Commands::Machines(cmd) => cmd.execute(ctx, prompter).await,
            Commands::Plans(cmd) => cmd.execute(ctx, prompter).await,
            Commands::Sessions(cmd) => cmd.execute(ctx, prompter).await,
            Commands::Dashboard(cmd) => cmd.execute(ctx).await,
            Commands::Config(subcmd) => run_config(subcmd, ctx.config_path()),
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn run_config(subcmd: ConfigSubcommands, path: Option<&Path>) -> Result<()> {
    match subcmd {
        ConfigSubcommands::Show => config_cmd::show_config(path),
        ConfigSubcommands::Init { force } => config_cmd::init_config(path, force),
        ConfigSubcommands::Path => config_cmd::print_path(path),
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
