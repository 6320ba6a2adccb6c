use std::error::Error;
use std::fmt;
use std::str::FromStr;

use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::config::{ConfigError, DashboardConfig};
use crate::dashboard::{self, Snapshot};
use crate::domain::status::ParseLabelError;
use crate::domain::{
    Feedback, FeedbackStatus, Material, Project, ProjectStatus, Role, Task, TaskStatus, User,
};
use crate::events::{ChangeEvent, ChangeListener, Listeners};
use crate::metrics;
use crate::repository::{Record, Repository};
use crate::seed;
use crate::session::Session;
use crate::store::{Store, StoreError};

pub struct App {
    store: Store,
    listeners: Listeners,
    config: DashboardConfig,
}

#[derive(Debug, Clone)]
pub struct NewSupervisor {
    pub name: String,
    pub taluk: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewWorker {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub progress: Option<u8>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ProjectPatch {
    fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.progress.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: u64,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: u64,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<String>,
    pub progress: Option<u8>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TaskPatch {
    fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.status.is_some()
            || self.progress.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub project_id: u64,
    pub name: String,
    pub unit: String,
    pub unit_price: f64,
    pub allocated: u64,
}

impl App {
    pub fn open(db_path: &str, config: DashboardConfig) -> Result<Self, AppError> {
        ensure_parent_dir(db_path)?;
        let store = Store::open(db_path)?;
        Ok(Self {
            store,
            listeners: Listeners::default(),
            config,
        })
    }

    pub fn with_listener(mut self, listener: Box<dyn ChangeListener>) -> Self {
        self.listeners.register(listener);
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Seeds the store unless it already holds data; `reset` wipes it first.
    /// Returns whether anything was written.
    pub fn init(&self, reset: bool) -> Result<bool, AppError> {
        if reset {
            self.store.clear()?;
        } else if self.store.is_initialized()? {
            return Ok(false);
        }
        if self.config.seed_demo_data {
            seed::seed_demo_data(&self.store, &self.config.district)?;
        } else {
            seed::seed_admin_only(&self.store, &self.config.district)?;
        }
        Ok(true)
    }

    pub fn snapshot(&self) -> Result<Snapshot, AppError> {
        Ok(Snapshot::load(&self.store)?)
    }

    /// Recomputes the cached progress of a project from its current tasks and
    /// writes it back. An unknown project still yields the computed value.
    pub fn recompute_progress(&self, project_id: u64) -> Result<u8, AppError> {
        let tasks = Repository::<Task>::load(&self.store)?;
        let progress = metrics::project_progress(
            tasks
                .iter()
                .filter(|task| task.project_id == project_id),
        );

        let mut projects = Repository::<Project>::load(&self.store)?;
        let Some(mut project) = projects.get_by_id(project_id).cloned() else {
            log::warn!("recompute requested for unknown project {}", project_id);
            return Ok(progress);
        };
        project.progress = progress;
        projects.upsert(project);
        projects.save(&self.store)?;
        self.listeners.notify(&ChangeEvent::ProgressRecomputed {
            project_id,
            progress,
        });
        Ok(progress)
    }

    pub fn approve_project(&self, session: &Session, id: u64) -> Result<Project, AppError> {
        session.require_role(Role::Admin)?;
        let mut projects = Repository::<Project>::load(&self.store)?;
        let mut project = require(&projects, id)?.clone();
        project.approved = true;
        project.status = ProjectStatus::InProgress;
        projects.upsert(project.clone());
        self.save(&projects, ChangeEvent::updated(Project::COLLECTION, id))?;
        Ok(project)
    }

    /// Removes a project that is still awaiting approval. Its tasks,
    /// materials and feedback are left in place.
    pub fn reject_project(&self, session: &Session, id: u64) -> Result<Project, AppError> {
        session.require_role(Role::Admin)?;
        let mut projects = Repository::<Project>::load(&self.store)?;
        if require(&projects, id)?.approved {
            return Err(AppError::InvalidArgument(format!(
                "project {} is already approved and cannot be rejected",
                id
            )));
        }
        let removed = projects
            .delete(id)
            .ok_or(AppError::NotFound { kind: "project", id })?;
        self.save(&projects, ChangeEvent::deleted(Project::COLLECTION, id))?;
        Ok(removed)
    }

    pub fn add_supervisor(&self, session: &Session, input: NewSupervisor) -> Result<User, AppError> {
        session.require_role(Role::Admin)?;
        let mut users = Repository::<User>::load(&self.store)?;
        let username = required("username", &input.username)?;
        ensure_unique_username(&users, &username)?;
        let password = required_secret(&input.password)?;
        let name = required("name", &input.name)?;
        let taluk = required("taluk", &input.taluk)?;
        let user = User {
            id: self.store.next_id(User::COLLECTION)?,
            username,
            password,
            role: Role::Supervisor,
            name,
            taluk: Some(taluk),
            supervisor: None,
            district: session.user().district.clone(),
            email: optional(input.email.as_deref()),
            phone: optional(input.phone.as_deref()),
        };
        users.upsert(user.clone());
        self.save(&users, ChangeEvent::created(User::COLLECTION, user.id))?;
        Ok(user)
    }

    /// Blocked while any project or worker still references the supervisor.
    pub fn delete_supervisor(&self, session: &Session, id: u64) -> Result<User, AppError> {
        session.require_role(Role::Admin)?;
        let mut users = Repository::<User>::load(&self.store)?;
        let target = require(&users, id)?;
        if target.role != Role::Supervisor {
            return Err(AppError::InvalidArgument(format!(
                "user {} is a {}, not a supervisor",
                id, target.role
            )));
        }

        let projects = Repository::<Project>::load(&self.store)?;
        if projects.iter().any(|project| project.supervisor_id == id) {
            log::warn!("refusing to delete supervisor {} with projects", id);
            return Err(AppError::Conflict(
                "cannot delete supervisor with assigned projects; reassign or delete the projects first"
                    .to_string(),
            ));
        }
        if users.iter().any(|user| user.is_worker_of(id)) {
            log::warn!("refusing to delete supervisor {} with workers", id);
            return Err(AppError::Conflict(
                "cannot delete supervisor with assigned workers; reassign or delete the workers first"
                    .to_string(),
            ));
        }

        let removed = users
            .delete(id)
            .ok_or(AppError::NotFound { kind: "user", id })?;
        self.save(&users, ChangeEvent::deleted(User::COLLECTION, id))?;
        Ok(removed)
    }

    pub fn add_worker(&self, session: &Session, input: NewWorker) -> Result<User, AppError> {
        session.require_role(Role::Supervisor)?;
        let mut users = Repository::<User>::load(&self.store)?;
        let username = required("username", &input.username)?;
        ensure_unique_username(&users, &username)?;
        let password = required_secret(&input.password)?;
        let name = required("name", &input.name)?;
        let supervisor = session.user();
        let user = User {
            id: self.store.next_id(User::COLLECTION)?,
            username,
            password,
            role: Role::Worker,
            name,
            taluk: supervisor.taluk.clone(),
            supervisor: Some(supervisor.id),
            district: supervisor.district.clone(),
            email: optional(input.email.as_deref()),
            phone: optional(input.phone.as_deref()),
        };
        users.upsert(user.clone());
        self.save(&users, ChangeEvent::created(User::COLLECTION, user.id))?;
        Ok(user)
    }

    pub fn add_project(&self, session: &Session, input: NewProject) -> Result<Project, AppError> {
        session.require_role(Role::Supervisor)?;
        let title = required("title", &input.title)?;
        let budget = non_negative("budget", input.budget)?;
        let (start_date, end_date) = date_range(&input.start_date, &input.end_date)?;
        let taluk = session.user().taluk.clone().ok_or_else(|| {
            AppError::InvalidArgument("your account has no taluk assigned".to_string())
        })?;

        let mut projects = Repository::<Project>::load(&self.store)?;
        let project = Project {
            id: self.store.next_id(Project::COLLECTION)?,
            title,
            description: input.description.trim().to_string(),
            status: ProjectStatus::PendingApproval,
            approved: false,
            budget,
            taluk,
            supervisor_id: session.user_id(),
            start_date,
            end_date,
            progress: 0,
        };
        projects.upsert(project.clone());
        self.save(&projects, ChangeEvent::created(Project::COLLECTION, project.id))?;
        Ok(project)
    }

    pub fn update_project(
        &self,
        session: &Session,
        id: u64,
        patch: ProjectPatch,
    ) -> Result<Project, AppError> {
        session.require_role(Role::Supervisor)?;
        if !patch.has_changes() {
            return Err(AppError::InvalidArgument(
                "update requires at least one field change".to_string(),
            ));
        }
        let mut projects = Repository::<Project>::load(&self.store)?;
        let mut project = require_own_project(&projects, session, id)?.clone();

        if let Some(title) = patch.title.as_deref() {
            project.title = required("title", title)?;
        }
        if let Some(description) = patch.description.as_deref() {
            project.description = description.trim().to_string();
        }
        if let Some(status) = patch.status.as_deref() {
            project.status = ProjectStatus::from_str(status)?;
        }
        if let Some(progress) = patch.progress {
            project.progress = percentage(progress)?;
        }
        let (start_date, end_date) = date_range(
            patch.start_date.as_deref().unwrap_or(&project.start_date),
            patch.end_date.as_deref().unwrap_or(&project.end_date),
        )?;
        project.start_date = start_date;
        project.end_date = end_date;

        projects.upsert(project.clone());
        self.save(&projects, ChangeEvent::updated(Project::COLLECTION, id))?;
        Ok(project)
    }

    /// New tasks start not-started at 0%; project progress is not recomputed
    /// until a task is updated.
    pub fn add_task(&self, session: &Session, input: NewTask) -> Result<Task, AppError> {
        session.require_role(Role::Supervisor)?;
        let projects = Repository::<Project>::load(&self.store)?;
        require_own_project(&projects, session, input.project_id)?;
        let users = Repository::<User>::load(&self.store)?;
        let worker = require(&users, input.assigned_to)?;
        if !worker.is_worker_of(session.user_id()) {
            return Err(AppError::Unauthorized(format!(
                "user {} is not one of your workers",
                input.assigned_to
            )));
        }
        let title = required("title", &input.title)?;
        let (start_date, end_date) = date_range(&input.start_date, &input.end_date)?;

        let mut tasks = Repository::<Task>::load(&self.store)?;
        let task = Task {
            id: self.store.next_id(Task::COLLECTION)?,
            project_id: input.project_id,
            title,
            description: optional(input.description.as_deref()),
            assigned_to: input.assigned_to,
            status: TaskStatus::NotStarted,
            start_date,
            end_date,
            progress: 0,
        };
        tasks.upsert(task.clone());
        self.save(&tasks, ChangeEvent::created(Task::COLLECTION, task.id))?;
        Ok(task)
    }

    /// Applies the patch, then derives status from progress: 100% completes
    /// the task and partial progress moves a not-started task in progress.
    pub fn update_task(&self, session: &Session, id: u64, patch: TaskPatch) -> Result<Task, AppError> {
        session.require_role(Role::Supervisor)?;
        if !patch.has_changes() {
            return Err(AppError::InvalidArgument(
                "update requires at least one field change".to_string(),
            ));
        }
        let mut tasks = Repository::<Task>::load(&self.store)?;
        let mut task = require(&tasks, id)?.clone();
        let projects = Repository::<Project>::load(&self.store)?;
        require_own_project(&projects, session, task.project_id)?;

        if let Some(title) = patch.title.as_deref() {
            task.title = required("title", title)?;
        }
        if let Some(status) = patch.status.as_deref() {
            task.status = TaskStatus::from_str(status)?;
        }
        if let Some(progress) = patch.progress {
            task.progress = percentage(progress)?;
        }
        let (start_date, end_date) = date_range(
            patch.start_date.as_deref().unwrap_or(&task.start_date),
            patch.end_date.as_deref().unwrap_or(&task.end_date),
        )?;
        task.start_date = start_date;
        task.end_date = end_date;

        if task.progress == 100 && task.status != TaskStatus::Completed {
            task.status = TaskStatus::Completed;
        } else if task.progress > 0 && task.progress < 100 && task.status == TaskStatus::NotStarted
        {
            task.status = TaskStatus::InProgress;
        }

        tasks.upsert(task.clone());
        self.save(&tasks, ChangeEvent::updated(Task::COLLECTION, id))?;
        self.recompute_progress(task.project_id)?;
        Ok(task)
    }

    /// Worker progress report: `completed` forces 100% and `not-started`
    /// forces 0%.
    pub fn update_task_progress(
        &self,
        session: &Session,
        id: u64,
        status: &str,
        progress: Option<u8>,
    ) -> Result<Task, AppError> {
        session.require_role(Role::Worker)?;
        let status = TaskStatus::from_str(status)?;
        let mut tasks = Repository::<Task>::load(&self.store)?;
        let mut task = require(&tasks, id)?.clone();
        if task.assigned_to != session.user_id() {
            return Err(AppError::Unauthorized(format!(
                "task {} is not assigned to you",
                id
            )));
        }

        if let Some(progress) = progress {
            task.progress = percentage(progress)?;
        }
        task.progress = match status {
            TaskStatus::Completed => 100,
            TaskStatus::NotStarted => 0,
            _ => task.progress,
        };
        task.status = status;

        tasks.upsert(task.clone());
        self.save(&tasks, ChangeEvent::updated(Task::COLLECTION, id))?;
        self.recompute_progress(task.project_id)?;
        Ok(task)
    }

    pub fn add_material(&self, session: &Session, input: NewMaterial) -> Result<Material, AppError> {
        session.require_role(Role::Supervisor)?;
        let projects = Repository::<Project>::load(&self.store)?;
        require_own_project(&projects, session, input.project_id)?;
        let name = required("name", &input.name)?;
        let unit = required("unit", &input.unit)?;
        let unit_price = non_negative("unit price", input.unit_price)?;

        let mut materials = Repository::<Material>::load(&self.store)?;
        let material = Material {
            id: self.store.next_id(Material::COLLECTION)?,
            name,
            unit,
            unit_price,
            project_id: input.project_id,
            allocated: input.allocated,
            used: 0,
        };
        materials.upsert(material.clone());
        self.save(
            &materials,
            ChangeEvent::created(Material::COLLECTION, material.id),
        )?;
        Ok(material)
    }

    pub fn update_material(
        &self,
        session: &Session,
        id: u64,
        allocated: Option<u64>,
        used: Option<u64>,
    ) -> Result<Material, AppError> {
        session.require_role(Role::Supervisor)?;
        if allocated.is_none() && used.is_none() {
            return Err(AppError::InvalidArgument(
                "update requires --allocated and/or --used".to_string(),
            ));
        }
        let mut materials = Repository::<Material>::load(&self.store)?;
        let mut material = require(&materials, id)?.clone();
        let projects = Repository::<Project>::load(&self.store)?;
        require_own_project(&projects, session, material.project_id)?;

        material.allocated = allocated.unwrap_or(material.allocated);
        material.used = used.unwrap_or(material.used);
        ensure_within_allocation(&material)?;

        materials.upsert(material.clone());
        self.save(&materials, ChangeEvent::updated(Material::COLLECTION, id))?;
        Ok(material)
    }

    pub fn update_material_usage(
        &self,
        session: &Session,
        id: u64,
        used: u64,
    ) -> Result<Material, AppError> {
        session.require_role(Role::Worker)?;
        let mut materials = Repository::<Material>::load(&self.store)?;
        let mut material = require(&materials, id)?.clone();
        let snapshot = self.snapshot()?;
        let visible = dashboard::worker_projects(&snapshot, session.user());
        if !visible.iter().any(|project| project.id == material.project_id) {
            return Err(AppError::Unauthorized(format!(
                "material {} belongs to a project outside your taluk",
                id
            )));
        }

        material.used = used;
        ensure_within_allocation(&material)?;

        materials.upsert(material.clone());
        self.save(&materials, ChangeEvent::updated(Material::COLLECTION, id))?;
        Ok(material)
    }

    pub fn send_feedback(
        &self,
        session: &Session,
        project_id: u64,
        message: &str,
    ) -> Result<Feedback, AppError> {
        session.require_any(&[Role::Worker, Role::Supervisor])?;
        let message = required("message", message)?;
        let snapshot = self.snapshot()?;
        require(&snapshot.projects, project_id)?;
        let allowed = match session.role() {
            Role::Worker => dashboard::worker_projects(&snapshot, session.user())
                .iter()
                .any(|project| project.id == project_id),
            _ => snapshot
                .projects
                .get_by_id(project_id)
                .is_some_and(|project| project.supervisor_id == session.user_id()),
        };
        if !allowed {
            return Err(AppError::Unauthorized(format!(
                "project {} is outside your scope",
                project_id
            )));
        }

        let mut feedback = snapshot.feedback;
        let item = Feedback {
            id: self.store.next_id(Feedback::COLLECTION)?,
            submitted_by: session.user_id(),
            project_id,
            message,
            date: today(),
            status: FeedbackStatus::Pending,
            response: None,
            response_date: None,
        };
        feedback.upsert(item.clone());
        self.save(&feedback, ChangeEvent::created(Feedback::COLLECTION, item.id))?;
        Ok(item)
    }

    /// Admins answer any feedback; supervisors answer feedback from their
    /// workers or about their projects.
    pub fn respond_feedback(
        &self,
        session: &Session,
        id: u64,
        response: &str,
        status: &str,
    ) -> Result<Feedback, AppError> {
        session.require_any(&[Role::Admin, Role::Supervisor])?;
        let status = FeedbackStatus::from_str(status)?;
        let response = required("response", response)?;
        let snapshot = self.snapshot()?;
        let mut item = require(&snapshot.feedback, id)?.clone();
        if *session.role() == Role::Supervisor
            && !dashboard::supervisor_can_see_feedback(&snapshot, session.user_id(), &item)
        {
            return Err(AppError::Unauthorized(format!(
                "feedback {} is outside your scope",
                id
            )));
        }

        item.response = Some(response);
        item.status = status;
        item.response_date = Some(today());

        let mut feedback = snapshot.feedback;
        feedback.upsert(item.clone());
        self.save(&feedback, ChangeEvent::updated(Feedback::COLLECTION, id))?;
        Ok(item)
    }

    fn save<T: Record>(&self, repo: &Repository<T>, event: ChangeEvent) -> Result<(), AppError> {
        repo.save(&self.store)?;
        self.listeners.notify(&event);
        Ok(())
    }
}

fn ensure_parent_dir(path: &str) -> Result<(), AppError> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn require<T: Record>(repo: &Repository<T>, id: u64) -> Result<&T, AppError> {
    repo.get_by_id(id).ok_or(AppError::NotFound {
        kind: T::COLLECTION.noun(),
        id,
    })
}

fn require_own_project<'a>(
    projects: &'a Repository<Project>,
    session: &Session,
    id: u64,
) -> Result<&'a Project, AppError> {
    let project = require(projects, id)?;
    if project.supervisor_id != session.user_id() {
        return Err(AppError::Unauthorized(format!(
            "project {} is managed by another supervisor",
            id
        )));
    }
    Ok(project)
}

fn ensure_unique_username(users: &Repository<User>, username: &str) -> Result<(), AppError> {
    if users.iter().any(|user| user.username == username) {
        return Err(AppError::Conflict(format!(
            "username '{}' already exists; choose a different username",
            username
        )));
    }
    Ok(())
}

fn ensure_within_allocation(material: &Material) -> Result<(), AppError> {
    if material.used > material.allocated {
        log::warn!(
            "rejected material {} update: used {} exceeds allocated {}",
            material.id,
            material.used,
            material.allocated
        );
        return Err(AppError::Rejected(
            "used quantity cannot exceed allocated quantity".to_string(),
        ));
    }
    Ok(())
}

fn required(field: &str, raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidArgument(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn required_secret(raw: &str) -> Result<String, AppError> {
    if raw.is_empty() {
        return Err(AppError::InvalidArgument(
            "password cannot be empty".to_string(),
        ));
    }
    Ok(raw.to_string())
}

fn optional(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_negative(field: &str, value: f64) -> Result<f64, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidArgument(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(value)
}

fn percentage(value: u8) -> Result<u8, AppError> {
    if value > 100 {
        return Err(AppError::InvalidArgument(
            "progress must be between 0 and 100".to_string(),
        ));
    }
    Ok(value)
}

pub(crate) fn parse_date(raw: &str) -> Result<Date, AppError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        AppError::InvalidArgument(format!("date '{}' must be formatted YYYY-MM-DD", raw))
    })
}

fn date_range(start: &str, end: &str) -> Result<(String, String), AppError> {
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;
    if end_date < start_date {
        return Err(AppError::InvalidArgument(format!(
            "end date {} is before start date {}",
            end.trim(),
            start.trim()
        )));
    }
    Ok((start.trim().to_string(), end.trim().to_string()))
}

fn today() -> String {
    let date = OffsetDateTime::now_utc().date();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Db(rusqlite::Error),
    Store(StoreError),
    Config(ConfigError),
    ParseLabel(ParseLabelError),
    InvalidArgument(String),
    NotFound { kind: &'static str, id: u64 },
    NotLoggedIn,
    Unauthorized(String),
    Conflict(String),
    Rejected(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "I/O error: {}", err),
            AppError::Db(err) => write!(f, "database error: {}", err),
            AppError::Store(err) => write!(f, "store error: {}", err),
            AppError::Config(err) => write!(f, "{}", err),
            AppError::ParseLabel(err) => write!(f, "{}", err),
            AppError::InvalidArgument(message) => write!(f, "{}", message),
            AppError::NotFound { kind, id } => write!(f, "{} {} not found", kind, id),
            AppError::NotLoggedIn => write!(f, "not logged in; run `dwd login` first"),
            AppError::Unauthorized(message) => write!(f, "{}", message),
            AppError::Conflict(message) => write!(f, "{}", message),
            AppError::Rejected(message) => write!(f, "{}", message),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Io(err) => Some(err),
            AppError::Db(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::ParseLabel(err) => Some(err),
            AppError::InvalidArgument(_)
            | AppError::NotFound { .. }
            | AppError::NotLoggedIn
            | AppError::Unauthorized(_)
            | AppError::Conflict(_)
            | AppError::Rejected(_) => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(value: rusqlite::Error) -> Self {
        AppError::Db(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        AppError::Store(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ParseLabelError> for AppError {
    fn from(value: ParseLabelError) -> Self {
        AppError::ParseLabel(value)
    }
}

#[cfg(test)]
mod tests_error_paths;
