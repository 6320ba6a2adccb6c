mod app;
mod cli;
mod cli_ops;
mod completions;
mod config;
mod dashboard;
mod db;
mod domain;
mod events;
mod metrics;
mod repository;
mod seed;
mod session;
mod store;
mod ui;

use app::{App, AppError};
use cli::{Commands, ProjectSubcommands, ReportSubcommands};
use session::Session;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).format_timestamp(None).init();
}

fn print_json(value: &impl serde::Serialize) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", rendered);
    Ok(())
}

fn run() -> Result<(), AppError> {
    use clap::Parser;

    init_logging();
    let cli = cli::Cli::parse();
    if let Commands::Completions(args) = &cli.command {
        return completions::run_completions_command(args.shell.as_deref(), args.install);
    }

    let config = config::DashboardConfig::load(&cli.config)?;
    let app = App::open(&cli.db, config)?.with_listener(Box::new(events::LogListener));

    if let Commands::Init(args) = &cli.command {
        let seeded = app.init(args.reset)?;
        let version = app.store().schema_version()?.unwrap_or_default();
        if seeded {
            println!("dwd init completed (schema v{version})");
        } else {
            println!("store already initialized (schema v{version})");
        }
        return Ok(());
    }
    if app.init(false)? {
        log::info!("store was empty; seeded on first use");
    }

    match cli.command {
        Commands::Init(_) | Commands::Completions(_) => Ok(()),
        Commands::Login(args) => {
            let session = session::login(app.store(), &args.username, &args.password, &args.role)?;
            println!("signed in as {}", session.display_name());
            Ok(())
        }
        Commands::Logout => {
            if session::logout(app.store())? {
                println!("signed out");
            } else {
                println!("not signed in");
            }
            Ok(())
        }
        Commands::Whoami(args) => {
            let session = session::require_current(app.store())?;
            if args.json {
                print_json(&whoami_json(&session))
            } else {
                ui::print_session(&session);
                Ok(())
            }
        }
        Commands::Admin(args) => {
            let session = session::require_current(app.store())?;
            run_admin(&app, &session, args.command)
        }
        Commands::Supervisor(args) => {
            let session = session::require_current(app.store())?;
            run_supervisor(&app, &session, args.command)
        }
        Commands::Worker(args) => {
            let session = session::require_current(app.store())?;
            run_worker(&app, &session, args.command)
        }
        Commands::Project(args) => {
            let session = session::require_current(app.store())?;
            match args.command {
                ProjectSubcommands::Show(show) => {
                    let snapshot = app.snapshot()?;
                    let detail = dashboard::project_detail(&snapshot, &session, show.id)?;
                    if show.json {
                        print_json(&detail)
                    } else {
                        ui::print_project_detail(&detail, &app.config().currency_symbol);
                        Ok(())
                    }
                }
            }
        }
        Commands::Recompute(args) => {
            session::require_current(app.store())?;
            let progress = app.recompute_progress(args.id)?;
            println!("project {} progress {}%", args.id, progress);
            Ok(())
        }
        Commands::Report(args) => {
            let session = session::require_current(app.store())?;
            let report = dashboard::report(&app.snapshot()?, &session);
            let currency = &app.config().currency_symbol;
            match args.command {
                ReportSubcommands::Progress(view) if view.json => print_json(&report.taluks),
                ReportSubcommands::Progress(_) => {
                    ui::print_progress_report(&report);
                    Ok(())
                }
                ReportSubcommands::Budget(view) if view.json => print_json(&serde_json::json!({
                    "scope": report.scope,
                    "budget": report.budget,
                    "taluks": report.taluks,
                })),
                ReportSubcommands::Budget(_) => {
                    ui::print_budget_report(&report, currency);
                    Ok(())
                }
                ReportSubcommands::Status(view) if view.json => print_json(&serde_json::json!({
                    "scope": report.scope,
                    "projectStatus": report.project_status,
                    "taskStatus": report.task_status,
                })),
                ReportSubcommands::Status(_) => {
                    ui::print_status_report(&report);
                    Ok(())
                }
            }
        }
    }
}

fn whoami_json(session: &Session) -> serde_json::Value {
    let user = session.user();
    serde_json::json!({
        "id": user.id,
        "username": user.username,
        "name": user.name,
        "role": user.role,
        "taluk": user.taluk,
        "district": user.district,
    })
}

fn run_admin(app: &App, session: &Session, command: cli::AdminSubcommands) -> Result<(), AppError> {
    use cli::AdminSubcommands;

    session.require_role(domain::Role::Admin)?;
    let currency = app.config().currency_symbol.as_str();
    match command {
        AdminSubcommands::Overview(view) => {
            let overview = dashboard::admin_overview(&app.snapshot()?, app.config().recent_limit);
            if view.json {
                return print_json(&overview);
            }
            ui::print_admin_overview(&overview, currency);
        }
        AdminSubcommands::Projects(view) => {
            let rows = dashboard::all_projects(&app.snapshot()?);
            if view.json {
                return print_json(&rows);
            }
            ui::print_project_rows("Projects", &rows, currency);
        }
        AdminSubcommands::Pending(view) => {
            let rows = dashboard::pending_projects(&app.snapshot()?);
            if view.json {
                return print_json(&rows);
            }
            ui::print_project_rows("Pending approval", &rows, currency);
        }
        AdminSubcommands::Approve(args) => {
            let project = app.approve_project(session, args.id)?;
            println!("approved project {} {}", project.id, project.title);
        }
        AdminSubcommands::Reject(args) => {
            let project = app.reject_project(session, args.id)?;
            println!("rejected project {} {}", project.id, project.title);
        }
        AdminSubcommands::Supervisors(view) => {
            let rows = dashboard::supervisors(&app.snapshot()?);
            if view.json {
                return print_json(&rows);
            }
            ui::print_supervisors(&rows);
        }
        AdminSubcommands::AddSupervisor(args) => {
            let user = app.add_supervisor(
                session,
                app::NewSupervisor {
                    name: args.name,
                    taluk: args.taluk,
                    email: args.email,
                    phone: args.phone,
                    username: args.username,
                    password: args.password,
                },
            )?;
            println!("added supervisor {} {}", user.id, user.name);
        }
        AdminSubcommands::DeleteSupervisor(args) => {
            let user = app.delete_supervisor(session, args.id)?;
            println!("deleted supervisor {} {}", user.id, user.name);
        }
        AdminSubcommands::Feedback(view) => {
            let rows = dashboard::feedback_rows(&app.snapshot()?, session);
            if view.json {
                return print_json(&rows);
            }
            ui::print_feedback(&rows);
        }
        AdminSubcommands::Respond(args) => {
            let item = app.respond_feedback(session, args.id, &args.response, &args.status)?;
            println!("feedback {} marked {}", item.id, item.status);
        }
        AdminSubcommands::Budget(view) => {
            let overview = dashboard::budget_overview(&app.snapshot()?);
            if view.json {
                return print_json(&overview);
            }
            ui::print_budget_overview(&overview, currency);
        }
    }
    Ok(())
}

fn run_supervisor(
    app: &App,
    session: &Session,
    command: cli::SupervisorSubcommands,
) -> Result<(), AppError> {
    use cli::SupervisorSubcommands;

    session.require_role(domain::Role::Supervisor)?;
    let currency = app.config().currency_symbol.as_str();
    let me = session.user_id();
    match command {
        SupervisorSubcommands::Overview(view) => {
            let overview =
                dashboard::supervisor_overview(&app.snapshot()?, me, app.config().recent_limit);
            if view.json {
                return print_json(&overview);
            }
            ui::print_supervisor_overview(&overview, currency);
        }
        SupervisorSubcommands::Projects(view) => {
            let snapshot = app.snapshot()?;
            let projects = dashboard::supervisor_projects(&snapshot, me);
            if view.json {
                return print_json(&projects);
            }
            ui::print_projects("Your projects", &projects, currency);
        }
        SupervisorSubcommands::AddProject(args) => {
            let project = app.add_project(
                session,
                app::NewProject {
                    title: args.title,
                    description: args.description,
                    budget: args.budget,
                    start_date: args.start_date,
                    end_date: args.end_date,
                },
            )?;
            println!(
                "submitted project {} {} for approval",
                project.id, project.title
            );
        }
        SupervisorSubcommands::UpdateProject(args) => {
            let project = app.update_project(
                session,
                args.id,
                app::ProjectPatch {
                    title: args.title,
                    description: args.description,
                    status: args.status,
                    progress: args.progress,
                    start_date: args.start_date,
                    end_date: args.end_date,
                },
            )?;
            println!("updated project {} {}", project.id, project.title);
        }
        SupervisorSubcommands::Tasks(filter) => {
            let rows = dashboard::supervisor_tasks(&app.snapshot()?, me, filter.project);
            if filter.json {
                return print_json(&rows);
            }
            ui::print_tasks(&rows);
        }
        SupervisorSubcommands::AddTask(args) => {
            let task = app.add_task(
                session,
                app::NewTask {
                    project_id: args.project,
                    title: args.title,
                    description: args.description,
                    assigned_to: args.worker,
                    start_date: args.start_date,
                    end_date: args.end_date,
                },
            )?;
            println!("added task {} {}", task.id, task.title);
        }
        SupervisorSubcommands::UpdateTask(args) => {
            let task = app.update_task(
                session,
                args.id,
                app::TaskPatch {
                    title: args.title,
                    status: args.status,
                    progress: args.progress,
                    start_date: args.start_date,
                    end_date: args.end_date,
                },
            )?;
            println!("updated task {} -> {} {}%", task.id, task.status, task.progress);
        }
        SupervisorSubcommands::Workers(view) => {
            let rows = dashboard::supervisor_workers(&app.snapshot()?, me);
            if view.json {
                return print_json(&rows);
            }
            ui::print_workers(&rows);
        }
        SupervisorSubcommands::AddWorker(args) => {
            let user = app.add_worker(
                session,
                app::NewWorker {
                    name: args.name,
                    email: args.email,
                    phone: args.phone,
                    username: args.username,
                    password: args.password,
                },
            )?;
            println!("added worker {} {}", user.id, user.name);
        }
        SupervisorSubcommands::Materials(filter) => {
            let rows = dashboard::supervisor_materials(&app.snapshot()?, me, filter.project);
            if filter.json {
                return print_json(&rows);
            }
            ui::print_materials(&rows, currency);
        }
        SupervisorSubcommands::AddMaterial(args) => {
            let material = app.add_material(
                session,
                app::NewMaterial {
                    project_id: args.project,
                    name: args.name,
                    unit: args.unit,
                    unit_price: args.unit_price,
                    allocated: args.allocated,
                },
            )?;
            println!("added material {} {}", material.id, material.name);
        }
        SupervisorSubcommands::UpdateMaterial(args) => {
            let material = app.update_material(session, args.id, args.allocated, args.used)?;
            println!(
                "material {} {}/{} {}",
                material.id, material.used, material.allocated, material.unit
            );
        }
        SupervisorSubcommands::Feedback(view) => {
            let rows = dashboard::feedback_rows(&app.snapshot()?, session);
            if view.json {
                return print_json(&rows);
            }
            ui::print_feedback(&rows);
        }
        SupervisorSubcommands::Respond(args) => {
            let item = app.respond_feedback(session, args.id, &args.response, &args.status)?;
            println!("feedback {} marked {}", item.id, item.status);
        }
        SupervisorSubcommands::SendFeedback(args) => {
            let item = app.send_feedback(session, args.project, &args.message)?;
            println!("sent feedback {}", item.id);
        }
    }
    Ok(())
}

fn run_worker(app: &App, session: &Session, command: cli::WorkerSubcommands) -> Result<(), AppError> {
    use cli::WorkerSubcommands;

    session.require_role(domain::Role::Worker)?;
    let currency = app.config().currency_symbol.as_str();
    match command {
        WorkerSubcommands::Overview(view) => {
            let overview = dashboard::worker_overview(&app.snapshot()?, session.user_id());
            if view.json {
                return print_json(&overview);
            }
            ui::print_worker_overview(&overview);
        }
        WorkerSubcommands::Tasks(view) => {
            let overview = dashboard::worker_overview(&app.snapshot()?, session.user_id());
            if view.json {
                return print_json(&overview.tasks);
            }
            ui::print_tasks(&overview.tasks);
        }
        WorkerSubcommands::UpdateTask(args) => {
            let task = app.update_task_progress(session, args.id, &args.status, args.progress)?;
            println!("task {} -> {} {}%", task.id, task.status, task.progress);
        }
        WorkerSubcommands::Projects(view) => {
            let snapshot = app.snapshot()?;
            let projects = dashboard::worker_projects(&snapshot, session.user());
            if view.json {
                return print_json(&projects);
            }
            ui::print_projects("Taluk projects", &projects, currency);
        }
        WorkerSubcommands::Materials(filter) => {
            let rows = dashboard::worker_materials(&app.snapshot()?, session.user(), filter.project);
            if filter.json {
                return print_json(&rows);
            }
            ui::print_materials(&rows, currency);
        }
        WorkerSubcommands::UpdateMaterial(args) => {
            let material = app.update_material_usage(session, args.id, args.used)?;
            println!(
                "material {} {}/{} {}",
                material.id, material.used, material.allocated, material.unit
            );
        }
        WorkerSubcommands::SendFeedback(args) => {
            let item = app.send_feedback(session, args.project, &args.message)?;
            println!("sent feedback {}", item.id);
        }
        WorkerSubcommands::Feedback(view) => {
            let rows = dashboard::feedback_rows(&app.snapshot()?, session);
            if view.json {
                return print_json(&rows);
            }
            ui::print_feedback(&rows);
        }
    }
    Ok(())
}
