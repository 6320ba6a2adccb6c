use clap::{CommandFactory, Parser};

use super::{
    AdminSubcommands, Cli, Commands, ReportSubcommands, SupervisorSubcommands, WorkerSubcommands,
};

fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(args)
}

#[test]
fn command_tree_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn login_takes_password_and_role_flags() {
    let cli = parse(&["dwd", "login", "admin", "-p", "admin123", "--role", "admin"]);
    match cli.command {
        Commands::Login(args) => {
            assert_eq!(args.username, "admin");
            assert_eq!(args.password, "admin123");
            assert_eq!(args.role, "admin");
        }
        other => panic!("expected Login, got {:?}", other),
    }
}

#[test]
fn global_paths_have_defaults() {
    let cli = parse(&["dwd", "logout"]);
    assert!(cli.db.ends_with("state.sqlite"));
    assert!(cli.config.ends_with("districtworks.toml"));
}

#[test]
fn admin_add_supervisor_parses_optional_contact() {
    let cli = parse(&[
        "dwd",
        "admin",
        "add-supervisor",
        "--name",
        "Meena Rao",
        "--taluk",
        "South Taluk",
        "--username",
        "supervisor2",
        "--password",
        "pw",
        "--phone",
        "9000000000",
    ]);
    match cli.command {
        Commands::Admin(args) => match args.command {
            AdminSubcommands::AddSupervisor(add) => {
                assert_eq!(add.taluk, "South Taluk");
                assert_eq!(add.email, None);
                assert_eq!(add.phone.as_deref(), Some("9000000000"));
            }
            other => panic!("expected AddSupervisor, got {:?}", other),
        },
        other => panic!("expected Admin, got {:?}", other),
    }
}

#[test]
fn respond_defaults_to_resolved() {
    let cli = parse(&["dwd", "admin", "respond", "1", "-m", "Two more crews assigned"]);
    match cli.command {
        Commands::Admin(args) => match args.command {
            AdminSubcommands::Respond(respond) => {
                assert_eq!(respond.id, 1);
                assert_eq!(respond.status, "resolved");
            }
            other => panic!("expected Respond, got {:?}", other),
        },
        other => panic!("expected Admin, got {:?}", other),
    }
}

#[test]
fn supervisor_update_task_fields_are_optional() {
    let cli = parse(&["dwd", "supervisor", "update-task", "2", "--progress", "100"]);
    match cli.command {
        Commands::Supervisor(args) => match args.command {
            SupervisorSubcommands::UpdateTask(update) => {
                assert_eq!(update.id, 2);
                assert_eq!(update.progress, Some(100));
                assert!(update.status.is_none());
                assert!(update.title.is_none());
            }
            other => panic!("expected UpdateTask, got {:?}", other),
        },
        other => panic!("expected Supervisor, got {:?}", other),
    }
}

#[test]
fn supervisor_tasks_accepts_project_filter() {
    let cli = parse(&["dwd", "supervisor", "tasks", "-P", "1", "--json"]);
    match cli.command {
        Commands::Supervisor(args) => match args.command {
            SupervisorSubcommands::Tasks(filter) => {
                assert_eq!(filter.project, Some(1));
                assert!(filter.json);
            }
            other => panic!("expected Tasks, got {:?}", other),
        },
        other => panic!("expected Supervisor, got {:?}", other),
    }
}

#[test]
fn worker_update_material_requires_used() {
    assert!(Cli::try_parse_from(["dwd", "worker", "update-material", "1"]).is_err());
    let cli = parse(&["dwd", "worker", "update-material", "1", "--used", "250"]);
    match cli.command {
        Commands::Worker(args) => match args.command {
            WorkerSubcommands::UpdateMaterial(update) => assert_eq!(update.used, 250),
            other => panic!("expected UpdateMaterial, got {:?}", other),
        },
        other => panic!("expected Worker, got {:?}", other),
    }
}

#[test]
fn progress_above_byte_range_is_a_parse_error() {
    assert!(Cli::try_parse_from(["dwd", "worker", "update-task", "1", "-s", "in-progress", "-g", "300"])
        .is_err());
}

#[test]
fn report_subcommands_parse() {
    let cli = parse(&["dwd", "report", "status", "-j"]);
    match cli.command {
        Commands::Report(args) => match args.command {
            ReportSubcommands::Status(view) => assert!(view.json),
            other => panic!("expected Status, got {:?}", other),
        },
        other => panic!("expected Report, got {:?}", other),
    }
}
