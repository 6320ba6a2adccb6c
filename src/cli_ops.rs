use clap::{Args, Subcommand};

use crate::cli::{IdArgs, ProjectFilterArgs, ViewArgs};

#[derive(Debug, Args)]
#[command(
    about = "Admin commands.",
    long_about = "Approve projects, manage supervisors and answer feedback."
)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum AdminSubcommands {
    #[command(about = "District totals and the most recent projects.")]
    Overview(ViewArgs),
    #[command(about = "Every project in the district.")]
    Projects(ViewArgs),
    #[command(about = "Projects awaiting approval.")]
    Pending(ViewArgs),
    #[command(about = "Approve a pending project and start it.")]
    Approve(IdArgs),
    #[command(about = "Reject and remove a pending project.")]
    Reject(IdArgs),
    #[command(about = "Supervisors with their project and worker counts.")]
    Supervisors(ViewArgs),
    #[command(about = "Create a supervisor account.")]
    AddSupervisor(AddSupervisorArgs),
    #[command(about = "Delete a supervisor with no projects or workers.")]
    DeleteSupervisor(IdArgs),
    #[command(about = "All feedback with submitter and project.")]
    Feedback(ViewArgs),
    #[command(about = "Respond to a feedback item.")]
    Respond(RespondArgs),
    #[command(about = "District budget summary and taluk allocation.")]
    Budget(ViewArgs),
}

#[derive(Debug, Args)]
pub struct AddSupervisorArgs {
    #[arg(short = 'n', long, help = "Full name.")]
    pub name: String,

    #[arg(short = 't', long, help = "Taluk the supervisor manages.")]
    pub taluk: String,

    #[arg(short = 'u', long, help = "Login username; must be unique.")]
    pub username: String,

    #[arg(short = 'p', long, help = "Login password.")]
    pub password: String,

    #[arg(short = 'e', long, help = "Contact email.")]
    pub email: Option<String>,

    #[arg(long, help = "Contact phone.")]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct RespondArgs {
    #[arg(help = "Feedback id.")]
    pub id: u64,

    #[arg(short = 'm', long, help = "Response text.")]
    pub response: String,

    #[arg(
        short = 's',
        long,
        default_value = "resolved",
        help = "New status (pending, in-progress, resolved, rejected)."
    )]
    pub status: String,
}

#[derive(Debug, Args)]
#[command(
    about = "Supervisor commands.",
    long_about = "Manage your projects, tasks, workers and materials."
)]
pub struct SupervisorArgs {
    #[command(subcommand)]
    pub command: SupervisorSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum SupervisorSubcommands {
    #[command(about = "Counts for your taluk plus recent projects and tasks.")]
    Overview(ViewArgs),
    #[command(about = "Your projects.")]
    Projects(ViewArgs),
    #[command(about = "Submit a new project for approval.")]
    AddProject(AddProjectArgs),
    #[command(about = "Update one of your projects.")]
    UpdateProject(UpdateProjectArgs),
    #[command(about = "Tasks across your projects.")]
    Tasks(ProjectFilterArgs),
    #[command(about = "Add a task to one of your projects.")]
    AddTask(AddTaskArgs),
    #[command(about = "Update a task; status follows progress.")]
    UpdateTask(UpdateTaskArgs),
    #[command(about = "Your workers.")]
    Workers(ViewArgs),
    #[command(about = "Create a worker account under you.")]
    AddWorker(AddWorkerArgs),
    #[command(about = "Materials across your projects.")]
    Materials(ProjectFilterArgs),
    #[command(about = "Allocate a material to one of your projects.")]
    AddMaterial(AddMaterialArgs),
    #[command(about = "Change a material's allocated or used quantity.")]
    UpdateMaterial(UpdateMaterialArgs),
    #[command(about = "Feedback from your workers and about your projects.")]
    Feedback(ViewArgs),
    #[command(about = "Respond to a feedback item.")]
    Respond(RespondArgs),
    #[command(about = "Send feedback about one of your projects.")]
    SendFeedback(SendFeedbackArgs),
}

#[derive(Debug, Args)]
pub struct AddProjectArgs {
    #[arg(short = 't', long, help = "Project title.")]
    pub title: String,

    #[arg(short = 'D', long = "desc", default_value = "", help = "Description text.")]
    pub description: String,

    #[arg(short = 'b', long, help = "Budget in rupees.")]
    pub budget: f64,

    #[arg(short = 's', long = "start", help = "Start date (YYYY-MM-DD).")]
    pub start_date: String,

    #[arg(short = 'e', long = "end", help = "End date (YYYY-MM-DD).")]
    pub end_date: String,
}

#[derive(Debug, Args)]
pub struct UpdateProjectArgs {
    #[arg(help = "Project id.")]
    pub id: u64,

    #[arg(short = 't', long, help = "New title.")]
    pub title: Option<String>,

    #[arg(short = 'D', long = "desc", help = "New description.")]
    pub description: Option<String>,

    #[arg(
        short = 's',
        long,
        help = "New status (pending-approval, in-progress, completed)."
    )]
    pub status: Option<String>,

    #[arg(short = 'g', long, help = "Progress override (0-100).")]
    pub progress: Option<u8>,

    #[arg(long = "start", help = "New start date (YYYY-MM-DD).")]
    pub start_date: Option<String>,

    #[arg(long = "end", help = "New end date (YYYY-MM-DD).")]
    pub end_date: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddTaskArgs {
    #[arg(short = 'P', long, help = "Project id.")]
    pub project: u64,

    #[arg(short = 't', long, help = "Task title.")]
    pub title: String,

    #[arg(short = 'D', long = "desc", help = "Optional description text.")]
    pub description: Option<String>,

    #[arg(short = 'w', long, help = "Worker id to assign.")]
    pub worker: u64,

    #[arg(short = 's', long = "start", help = "Start date (YYYY-MM-DD).")]
    pub start_date: String,

    #[arg(short = 'e', long = "end", help = "End date (YYYY-MM-DD).")]
    pub end_date: String,
}

#[derive(Debug, Args)]
pub struct UpdateTaskArgs {
    #[arg(help = "Task id.")]
    pub id: u64,

    #[arg(short = 't', long, help = "New title.")]
    pub title: Option<String>,

    #[arg(
        short = 's',
        long,
        help = "New status (not-started, in-progress, completed)."
    )]
    pub status: Option<String>,

    #[arg(short = 'g', long, help = "Progress (0-100).")]
    pub progress: Option<u8>,

    #[arg(long = "start", help = "New start date (YYYY-MM-DD).")]
    pub start_date: Option<String>,

    #[arg(long = "end", help = "New end date (YYYY-MM-DD).")]
    pub end_date: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddWorkerArgs {
    #[arg(short = 'n', long, help = "Full name.")]
    pub name: String,

    #[arg(short = 'u', long, help = "Login username; must be unique.")]
    pub username: String,

    #[arg(short = 'p', long, help = "Login password.")]
    pub password: String,

    #[arg(short = 'e', long, help = "Contact email.")]
    pub email: Option<String>,

    #[arg(long, help = "Contact phone.")]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct AddMaterialArgs {
    #[arg(short = 'P', long, help = "Project id.")]
    pub project: u64,

    #[arg(short = 'n', long, help = "Material name.")]
    pub name: String,

    #[arg(short = 'u', long, help = "Unit of measure (bags, cubic meters, ...).")]
    pub unit: String,

    #[arg(long = "price", help = "Price per unit in rupees.")]
    pub unit_price: f64,

    #[arg(short = 'a', long, help = "Allocated quantity.")]
    pub allocated: u64,
}

#[derive(Debug, Args)]
pub struct UpdateMaterialArgs {
    #[arg(help = "Material id.")]
    pub id: u64,

    #[arg(short = 'a', long, help = "New allocated quantity.")]
    pub allocated: Option<u64>,

    #[arg(short = 'u', long, help = "New used quantity.")]
    pub used: Option<u64>,
}

#[derive(Debug, Args)]
pub struct SendFeedbackArgs {
    #[arg(short = 'P', long, help = "Project id.")]
    pub project: u64,

    #[arg(help = "Feedback message.")]
    pub message: String,
}

#[derive(Debug, Args)]
#[command(
    about = "Worker commands.",
    long_about = "Report task progress and material usage, and send feedback."
)]
pub struct WorkerArgs {
    #[command(subcommand)]
    pub command: WorkerSubcommands,
}

#[derive(Debug, Subcommand)]
pub enum WorkerSubcommands {
    #[command(about = "Your task counts and assignments.")]
    Overview(ViewArgs),
    #[command(about = "Tasks assigned to you.")]
    Tasks(ViewArgs),
    #[command(about = "Report progress on one of your tasks.")]
    UpdateTask(WorkerTaskArgs),
    #[command(about = "Projects in your supervisor's taluk.")]
    Projects(ViewArgs),
    #[command(about = "Materials for projects in your taluk.")]
    Materials(ProjectFilterArgs),
    #[command(about = "Record how much of a material has been used.")]
    UpdateMaterial(WorkerMaterialArgs),
    #[command(about = "Send feedback about a project.")]
    SendFeedback(SendFeedbackArgs),
    #[command(about = "Feedback you have sent.")]
    Feedback(ViewArgs),
}

#[derive(Debug, Args)]
pub struct WorkerTaskArgs {
    #[arg(help = "Task id.")]
    pub id: u64,

    #[arg(
        short = 's',
        long,
        help = "Status (not-started, in-progress, completed)."
    )]
    pub status: String,

    #[arg(short = 'g', long, help = "Progress (0-100).")]
    pub progress: Option<u8>,
}

#[derive(Debug, Args)]
pub struct WorkerMaterialArgs {
    #[arg(help = "Material id.")]
    pub id: u64,

    #[arg(short = 'u', long, help = "Used quantity.")]
    pub used: u64,
}
