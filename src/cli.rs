use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};

pub use crate::cli_ops::*;

fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::BrightCyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::BrightMagenta.on_default())
}

#[derive(Debug, Parser)]
#[command(name = "dwd")]
#[command(bin_name = "dwd")]
#[command(version)]
#[command(about = "District public-works dashboard: projects, tasks, materials and feedback")]
#[command(styles = cli_styles())]
pub struct Cli {
    #[arg(
        short = 'd',
        long,
        env = "DISTRICTWORKS_DB_PATH",
        default_value = ".districtworks/state.sqlite",
        help = "Path to the SQLite store."
    )]
    pub db: String,

    #[arg(
        short = 'c',
        long,
        env = "DISTRICTWORKS_CONFIG",
        default_value = "districtworks.toml",
        help = "Path to the optional TOML config file."
    )]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Create the store and seed it unless it already holds data.")]
    Init(InitArgs),
    #[command(about = "Sign in with username, password and role.")]
    Login(LoginArgs),
    #[command(about = "Sign out of the current session.")]
    Logout,
    #[command(about = "Show the signed-in user.")]
    Whoami(ViewArgs),
    #[command(about = "District administration commands.")]
    Admin(AdminArgs),
    #[command(about = "Taluk supervisor commands.")]
    Supervisor(SupervisorArgs),
    #[command(about = "Field worker commands.")]
    Worker(WorkerArgs),
    #[command(about = "Project commands available to every role.")]
    Project(ProjectArgs),
    #[command(about = "Recompute a project's progress from its tasks.")]
    Recompute(IdArgs),
    #[command(about = "Taluk rollups and status charts scoped to your role.")]
    Report(ReportArgs),
    #[command(about = "Generate or install shell completions.")]
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
#[command(about = "Initialize the store.")]
pub struct InitArgs {
    #[arg(
        short = 'r',
        long,
        help = "Wipe every collection and counter before seeding."
    )]
    pub reset: bool,
}

#[derive(Debug, Args)]
#[command(about = "Sign in.")]
pub struct LoginArgs {
    #[arg(help = "Username.")]
    pub username: String,

    #[arg(short = 'p', long, help = "Password.")]
    pub password: String,

    #[arg(short = 'r', long, help = "Role to sign in as (admin, supervisor, worker).")]
    pub role: String,
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    #[arg(help = "Record id.")]
    pub id: u64,
}

#[derive(Debug, Args)]
pub struct ProjectFilterArgs {
    #[arg(short = 'P', long, help = "Only rows for this project id.")]
    pub project: Option<u64>,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
#[command(about = "Project commands.")]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum ProjectSubcommands {
    #[command(about = "Show a project with its tasks and materials.")]
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(help = "Project id.")]
    pub id: u64,

    #[arg(short = 'j', long, help = "Render machine-readable JSON.")]
    pub json: bool,
}

#[derive(Debug, Args)]
#[command(about = "Reports.")]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum ReportSubcommands {
    #[command(about = "Average project progress per taluk.")]
    Progress(ViewArgs),
    #[command(about = "Allocated and utilized budget per taluk.")]
    Budget(ViewArgs),
    #[command(about = "Project and task status counts.")]
    Status(ViewArgs),
}

#[derive(Debug, Args)]
#[command(about = "Generate or install shell completions.")]
pub struct CompletionsArgs {
    #[arg(help = "Shell name (bash, zsh, fish). Auto-detected if omitted.")]
    pub shell: Option<String>,

    #[arg(
        short = 'i',
        long = "install",
        help = "Write completions to the canonical path for the shell."
    )]
    pub install: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
