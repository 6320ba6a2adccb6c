//! Read-only views over a loaded [`Snapshot`]. Every view is scoped by the
//! caller: the CLI resolves the session and hands the relevant user in.

use serde::Serialize;

use crate::app::AppError;
use crate::domain::{
    Feedback, FeedbackStatus, Material, Project, ProjectStatus, Role, Task, TaskStatus, User,
};
use crate::metrics::{self, BudgetSummary, StatusCount, TalukRollup};
use crate::repository::Repository;
use crate::session::Session;
use crate::store::{Store, StoreError};

/// All five collections, loaded once per command.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Repository<User>,
    pub projects: Repository<Project>,
    pub tasks: Repository<Task>,
    pub materials: Repository<Material>,
    pub feedback: Repository<Feedback>,
}

impl Snapshot {
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        let snapshot = Self {
            users: Repository::load(store)?,
            projects: Repository::load(store)?,
            tasks: Repository::load(store)?,
            materials: Repository::load(store)?,
            feedback: Repository::load(store)?,
        };
        let unknown = snapshot
            .projects
            .iter()
            .filter(|project| !project.status.is_known())
            .count()
            + snapshot
                .tasks
                .iter()
                .filter(|task| !task.status.is_known())
                .count();
        if unknown > 0 {
            log::warn!("{} stored record(s) carry an unrecognized status", unknown);
        }
        Ok(snapshot)
    }

    fn user_name(&self, id: u64) -> String {
        self.users
            .get_by_id(id)
            .map(|user| user.name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn project_title(&self, id: u64) -> String {
        self.projects
            .get_by_id(id)
            .map(|project| project.title.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRow {
    #[serde(flatten)]
    pub project: Project,
    pub supervisor_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    #[serde(flatten)]
    pub task: Task,
    pub project_title: String,
    pub worker_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRow {
    #[serde(flatten)]
    pub material: Material,
    pub project_title: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRow {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub submitted_by_name: String,
    pub project_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorRow {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub taluk: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub projects: usize,
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRow {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub total_projects: usize,
    pub pending_approvals: usize,
    pub supervisors: usize,
    pub workers: usize,
    pub recent_projects: Vec<ProjectRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub summary: BudgetSummary,
    pub taluks: Vec<TalukRollup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectRow,
    pub tasks: Vec<TaskRow>,
    pub materials: Vec<MaterialRow>,
    pub utilized: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorOverview {
    pub active_projects: usize,
    pub total_tasks: usize,
    pub workers: usize,
    pub pending_feedback: usize,
    pub projects: Vec<Project>,
    pub recent_tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerOverview {
    pub total_tasks: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub tasks: Vec<TaskRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub scope: String,
    pub budget: BudgetSummary,
    pub taluks: Vec<TalukRollup>,
    pub project_status: Vec<StatusCount>,
    pub task_status: Vec<StatusCount>,
}

pub fn admin_overview(snapshot: &Snapshot, recent_limit: usize) -> AdminOverview {
    let mut recent: Vec<&Project> = snapshot.projects.iter().collect();
    recent.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    AdminOverview {
        total_projects: snapshot.projects.len(),
        pending_approvals: snapshot.projects.iter().filter(|p| !p.approved).count(),
        supervisors: count_role(snapshot, &Role::Supervisor),
        workers: count_role(snapshot, &Role::Worker),
        recent_projects: recent
            .into_iter()
            .take(recent_limit)
            .map(|project| project_row(snapshot, project))
            .collect(),
    }
}

pub fn pending_projects(snapshot: &Snapshot) -> Vec<ProjectRow> {
    snapshot
        .projects
        .list_by(|project| !project.approved)
        .into_iter()
        .map(|project| project_row(snapshot, project))
        .collect()
}

pub fn all_projects(snapshot: &Snapshot) -> Vec<ProjectRow> {
    snapshot
        .projects
        .iter()
        .map(|project| project_row(snapshot, project))
        .collect()
}

pub fn supervisors(snapshot: &Snapshot) -> Vec<SupervisorRow> {
    snapshot
        .users
        .list_by(|user| user.role == Role::Supervisor)
        .into_iter()
        .map(|user| SupervisorRow {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            taluk: user.taluk.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            projects: snapshot
                .projects
                .iter()
                .filter(|project| project.supervisor_id == user.id)
                .count(),
            workers: snapshot
                .users
                .iter()
                .filter(|other| other.is_worker_of(user.id))
                .count(),
        })
        .collect()
}

/// Feedback visible to the caller: everything for admins, items from own
/// workers or about own projects for supervisors, own submissions otherwise.
pub fn feedback_rows(snapshot: &Snapshot, session: &Session) -> Vec<FeedbackRow> {
    snapshot
        .feedback
        .iter()
        .filter(|item| match session.role() {
            Role::Admin => true,
            Role::Supervisor => supervisor_can_see_feedback(snapshot, session.user_id(), item),
            _ => item.submitted_by == session.user_id(),
        })
        .map(|item| FeedbackRow {
            feedback: item.clone(),
            submitted_by_name: snapshot.user_name(item.submitted_by),
            project_title: snapshot.project_title(item.project_id),
        })
        .collect()
}

pub fn supervisor_can_see_feedback(snapshot: &Snapshot, supervisor_id: u64, item: &Feedback) -> bool {
    let from_own_worker = snapshot
        .users
        .get_by_id(item.submitted_by)
        .is_some_and(|user| user.is_worker_of(supervisor_id) || user.id == supervisor_id);
    let about_own_project = snapshot
        .projects
        .get_by_id(item.project_id)
        .is_some_and(|project| project.supervisor_id == supervisor_id);
    from_own_worker || about_own_project
}

pub fn budget_overview(snapshot: &Snapshot) -> BudgetOverview {
    BudgetOverview {
        summary: metrics::budget_summary(snapshot.projects.iter(), snapshot.materials.iter()),
        taluks: metrics::rollup_by_taluk(snapshot.projects.iter(), snapshot.materials.records()),
    }
}

/// Admins see every project, supervisors their own, workers those in their
/// supervisor's taluk.
pub fn project_detail(
    snapshot: &Snapshot,
    session: &Session,
    id: u64,
) -> Result<ProjectDetail, AppError> {
    let project = snapshot
        .projects
        .get_by_id(id)
        .ok_or(AppError::NotFound { kind: "project", id })?;
    let visible = match session.role() {
        Role::Admin => true,
        Role::Supervisor => project.supervisor_id == session.user_id(),
        _ => worker_projects(snapshot, session.user())
            .iter()
            .any(|candidate| candidate.id == id),
    };
    if !visible {
        return Err(AppError::Unauthorized(format!(
            "project {} is outside your scope",
            id
        )));
    }

    let tasks = snapshot
        .tasks
        .list_by(|task| task.project_id == id)
        .into_iter()
        .map(|task| task_row(snapshot, task))
        .collect();
    let materials: Vec<MaterialRow> = snapshot
        .materials
        .list_by(|material| material.project_id == id)
        .into_iter()
        .map(|material| material_row(snapshot, material))
        .collect();
    let utilized = materials.iter().map(|row| row.cost).sum();
    Ok(ProjectDetail {
        project: project_row(snapshot, project),
        tasks,
        materials,
        utilized,
    })
}

pub fn supervisor_overview(
    snapshot: &Snapshot,
    supervisor_id: u64,
    recent_limit: usize,
) -> SupervisorOverview {
    let projects = supervisor_projects(snapshot, supervisor_id);
    let mut tasks = supervisor_tasks(snapshot, supervisor_id, None);
    let worker_ids: Vec<u64> = snapshot
        .users
        .list_by(|user| user.is_worker_of(supervisor_id))
        .into_iter()
        .map(|user| user.id)
        .collect();
    let pending_feedback = snapshot
        .feedback
        .iter()
        .filter(|item| {
            item.status == FeedbackStatus::Pending && worker_ids.contains(&item.submitted_by)
        })
        .count();

    let total_tasks = tasks.len();
    tasks.sort_by_key(|row| row.task.status.priority());
    SupervisorOverview {
        active_projects: projects
            .iter()
            .filter(|project| project.status == ProjectStatus::InProgress)
            .count(),
        total_tasks,
        workers: worker_ids.len(),
        pending_feedback,
        projects: projects.into_iter().take(recent_limit).cloned().collect(),
        recent_tasks: tasks.into_iter().take(recent_limit).collect(),
    }
}

pub fn supervisor_projects(snapshot: &Snapshot, supervisor_id: u64) -> Vec<&Project> {
    snapshot
        .projects
        .list_by(|project| project.supervisor_id == supervisor_id)
}

/// Tasks across the supervisor's projects, optionally narrowed to one.
pub fn supervisor_tasks(
    snapshot: &Snapshot,
    supervisor_id: u64,
    project_id: Option<u64>,
) -> Vec<TaskRow> {
    let own: Vec<u64> = supervisor_projects(snapshot, supervisor_id)
        .into_iter()
        .map(|project| project.id)
        .filter(|id| project_id.is_none() || project_id == Some(*id))
        .collect();
    snapshot
        .tasks
        .list_by(|task| own.contains(&task.project_id))
        .into_iter()
        .map(|task| task_row(snapshot, task))
        .collect()
}

pub fn supervisor_materials(
    snapshot: &Snapshot,
    supervisor_id: u64,
    project_id: Option<u64>,
) -> Vec<MaterialRow> {
    let own: Vec<u64> = supervisor_projects(snapshot, supervisor_id)
        .into_iter()
        .map(|project| project.id)
        .filter(|id| project_id.is_none() || project_id == Some(*id))
        .collect();
    snapshot
        .materials
        .list_by(|material| own.contains(&material.project_id))
        .into_iter()
        .map(|material| material_row(snapshot, material))
        .collect()
}

pub fn supervisor_workers(snapshot: &Snapshot, supervisor_id: u64) -> Vec<WorkerRow> {
    snapshot
        .users
        .list_by(|user| user.is_worker_of(supervisor_id))
        .into_iter()
        .map(|user| WorkerRow {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            tasks: snapshot
                .tasks
                .iter()
                .filter(|task| task.assigned_to == user.id)
                .count(),
        })
        .collect()
}

pub fn worker_overview(snapshot: &Snapshot, worker_id: u64) -> WorkerOverview {
    let tasks: Vec<TaskRow> = snapshot
        .tasks
        .list_by(|task| task.assigned_to == worker_id)
        .into_iter()
        .map(|task| task_row(snapshot, task))
        .collect();
    let count = |status: TaskStatus| tasks.iter().filter(|row| row.task.status == status).count();
    WorkerOverview {
        total_tasks: tasks.len(),
        not_started: count(TaskStatus::NotStarted),
        in_progress: count(TaskStatus::InProgress),
        completed: count(TaskStatus::Completed),
        tasks,
    }
}

/// Projects in the taluk of the worker's supervisor. A worker without a
/// known supervisor sees nothing.
pub fn worker_projects<'a>(snapshot: &'a Snapshot, worker: &User) -> Vec<&'a Project> {
    let taluk = worker
        .supervisor
        .and_then(|id| snapshot.users.get_by_id(id))
        .and_then(|supervisor| supervisor.taluk.clone());
    let Some(taluk) = taluk else {
        return Vec::new();
    };
    snapshot.projects.list_by(|project| project.taluk == taluk)
}

pub fn worker_materials(
    snapshot: &Snapshot,
    worker: &User,
    project_id: Option<u64>,
) -> Vec<MaterialRow> {
    let visible: Vec<u64> = worker_projects(snapshot, worker)
        .into_iter()
        .map(|project| project.id)
        .filter(|id| project_id.is_none() || project_id == Some(*id))
        .collect();
    snapshot
        .materials
        .list_by(|material| visible.contains(&material.project_id))
        .into_iter()
        .map(|material| material_row(snapshot, material))
        .collect()
}

/// Rollups and status counts over the projects and tasks the caller may see.
pub fn report(snapshot: &Snapshot, session: &Session) -> Report {
    let (scope, projects, tasks): (String, Vec<&Project>, Vec<&Task>) = match session.role() {
        Role::Admin => (
            "district".to_string(),
            snapshot.projects.iter().collect(),
            snapshot.tasks.iter().collect(),
        ),
        Role::Supervisor => {
            let projects = supervisor_projects(snapshot, session.user_id());
            let ids: Vec<u64> = projects.iter().map(|project| project.id).collect();
            let tasks = snapshot
                .tasks
                .list_by(|task| ids.contains(&task.project_id));
            (format!("supervisor {}", session.user().name), projects, tasks)
        }
        _ => (
            format!("worker {}", session.user().name),
            worker_projects(snapshot, session.user()),
            snapshot
                .tasks
                .list_by(|task| task.assigned_to == session.user_id()),
        ),
    };

    let project_ids: Vec<u64> = projects.iter().map(|project| project.id).collect();
    let materials: Vec<Material> = snapshot
        .materials
        .list_by(|material| project_ids.contains(&material.project_id))
        .into_iter()
        .cloned()
        .collect();

    Report {
        scope,
        budget: metrics::budget_summary(projects.iter().copied(), materials.iter()),
        taluks: metrics::rollup_by_taluk(projects.iter().copied(), &materials),
        project_status: metrics::status_counts(projects.iter().map(|project| &project.status)),
        task_status: metrics::status_counts(tasks.iter().map(|task| &task.status)),
    }
}

fn count_role(snapshot: &Snapshot, role: &Role) -> usize {
    snapshot.users.iter().filter(|user| &user.role == role).count()
}

fn project_row(snapshot: &Snapshot, project: &Project) -> ProjectRow {
    ProjectRow {
        project: project.clone(),
        supervisor_name: snapshot.user_name(project.supervisor_id),
    }
}

fn task_row(snapshot: &Snapshot, task: &Task) -> TaskRow {
    TaskRow {
        task: task.clone(),
        project_title: snapshot.project_title(task.project_id),
        worker_name: snapshot.user_name(task.assigned_to),
    }
}

fn material_row(snapshot: &Snapshot, material: &Material) -> MaterialRow {
    MaterialRow {
        material: material.clone(),
        project_title: snapshot.project_title(material.project_id),
        cost: metrics::material_cost(material),
    }
}
