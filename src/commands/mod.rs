//! Command-line interface for lifeos.
//!
//! Each submodule owns one command: its `clap` arguments and a `cmd`
//! function. [`Cli::menu`] parses the arguments and dispatches.

pub mod focus;
pub mod idea;
pub mod init;
pub mod login;
pub mod logout;
pub mod note;
pub mod schedule;
pub mod sessions;
pub mod stats;
pub mod summary;
pub mod task;
pub mod whoami;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Sign in as a user", arg_required_else_help = true)]
    Login(login::LoginArgs),
    #[command(about = "Sign out")]
    Logout,
    #[command(about = "Show the signed-in user")]
    Whoami,
    #[command(about = "Run the Pomodoro focus timer")]
    Focus,
    #[command(about = "Show focus session history")]
    Sessions(sessions::SessionsArgs),
    #[command(about = "Show focus statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage notes")]
    Note(note::NoteArgs),
    #[command(about = "Generate and manage content ideas")]
    Idea(idea::IdeaArgs),
    #[command(about = "Plan the day for open tasks with AI")]
    Schedule(schedule::ScheduleArgs),
    #[command(about = "Show today's stats and daily summary")]
    Summary(summary::SummaryArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Login(args) => login::cmd(args),
            Commands::Logout => logout::cmd(),
            Commands::Whoami => whoami::cmd(),
            Commands::Focus => focus::cmd().await,
            Commands::Sessions(args) => sessions::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Task(args) => task::cmd(args).await,
            Commands::Note(args) => note::cmd(args).await,
            Commands::Idea(args) => idea::cmd(args).await,
            Commands::Schedule(args) => schedule::cmd(args).await,
            Commands::Summary(args) => summary::cmd(args).await,
        }
    }
}
