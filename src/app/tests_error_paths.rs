use super::tests::{open_seeded, project, session_for};
use super::{AppError, NewProject, NewSupervisor, NewTask, NewWorker, ProjectPatch, TaskPatch};
use crate::domain::{Material, User};
use crate::repository::Repository;

fn material(app: &super::App, id: u64) -> Material {
    Repository::<Material>::load(app.store())
        .expect("materials should load")
        .get_by_id(id)
        .cloned()
        .expect("material should exist")
}

fn supervisor_input(username: &str) -> NewSupervisor {
    NewSupervisor {
        name: "Meena Rao".to_string(),
        taluk: "South Taluk".to_string(),
        email: None,
        phone: None,
        username: username.to_string(),
        password: "pw".to_string(),
    }
}

#[test]
fn supervisor_with_projects_cannot_be_deleted() {
    let (app, recorder, root) = open_seeded();
    let admin = session_for(&app, 1);

    let err = app.delete_supervisor(&admin, 2).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert!(err.to_string().contains("assigned projects"));
    assert!(app.snapshot().expect("snapshot").users.get_by_id(2).is_some());
    assert!(recorder.events().is_empty());
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn supervisor_with_only_workers_cannot_be_deleted() {
    let (app, _, root) = open_seeded();
    let admin = session_for(&app, 1);
    let created = app
        .add_supervisor(&admin, supervisor_input("supervisor2"))
        .expect("add supervisor should succeed");
    let new_supervisor = session_for(&app, created.id);
    app.add_worker(
        &new_supervisor,
        NewWorker {
            name: "Anil Das".to_string(),
            email: None,
            phone: None,
            username: "worker2".to_string(),
            password: "pw".to_string(),
        },
    )
    .expect("add worker should succeed");

    let err = app.delete_supervisor(&admin, created.id).unwrap_err();
    assert!(err.to_string().contains("assigned workers"));
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn unreferenced_supervisor_is_deleted() {
    let (app, _, root) = open_seeded();
    let admin = session_for(&app, 1);
    let created = app
        .add_supervisor(&admin, supervisor_input("supervisor2"))
        .expect("add supervisor should succeed");

    let removed = app
        .delete_supervisor(&admin, created.id)
        .expect("delete should succeed");
    assert_eq!(removed.username, "supervisor2");
    assert!(app
        .snapshot()
        .expect("snapshot")
        .users
        .get_by_id(created.id)
        .is_none());
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn deleting_a_non_supervisor_is_invalid() {
    let (app, _, root) = open_seeded();
    let admin = session_for(&app, 1);
    assert!(matches!(
        app.delete_supervisor(&admin, 3),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(matches!(
        app.delete_supervisor(&admin, 42),
        Err(AppError::NotFound { kind: "user", id: 42 })
    ));
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn usage_beyond_allocation_is_rejected_and_store_unchanged() {
    let (app, recorder, root) = open_seeded();
    let worker = session_for(&app, 3);
    let supervisor = session_for(&app, 2);
    let before = material(&app, 2);
    assert_eq!((before.allocated, before.used), (50, 20));

    let err = app.update_material_usage(&worker, 2, 60).unwrap_err();
    assert!(matches!(err, AppError::Rejected(_)));
    assert_eq!(
        err.to_string(),
        "used quantity cannot exceed allocated quantity"
    );
    assert_eq!(material(&app, 2), before);

    let err = app
        .update_material(&supervisor, 1, Some(100), None)
        .unwrap_err();
    assert!(matches!(err, AppError::Rejected(_)));
    assert_eq!(material(&app, 1).allocated, 500);
    assert!(recorder.events().is_empty());
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn roles_are_enforced_per_operation() {
    let (app, _, root) = open_seeded();
    let worker = session_for(&app, 3);
    let supervisor = session_for(&app, 2);

    let err = app.approve_project(&worker, 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "this action requires the admin role; signed in as worker"
    );
    assert!(matches!(
        app.add_supervisor(&supervisor, supervisor_input("x")),
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        app.update_material_usage(&supervisor, 1, 1),
        Err(AppError::Unauthorized(_))
    ));
    assert!(!project(&app, 2).expect("project").approved);
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn approved_projects_cannot_be_rejected() {
    let (app, _, root) = open_seeded();
    let admin = session_for(&app, 1);
    assert!(matches!(
        app.reject_project(&admin, 1),
        Err(AppError::InvalidArgument(_))
    ));
    assert!(project(&app, 1).is_some());
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn duplicate_usernames_conflict() {
    let (app, _, root) = open_seeded();
    let admin = session_for(&app, 1);
    let err = app
        .add_supervisor(&admin, supervisor_input("worker1"))
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(app.snapshot().expect("snapshot").users.len(), 3);
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn empty_patches_and_bad_dates_are_invalid() {
    let (app, _, root) = open_seeded();
    let supervisor = session_for(&app, 2);

    let err = app
        .update_project(&supervisor, 1, ProjectPatch::default())
        .unwrap_err();
    assert_eq!(err.to_string(), "update requires at least one field change");

    let err = app
        .update_project(
            &supervisor,
            1,
            ProjectPatch {
                end_date: Some("2025-03-01".to_string()),
                ..ProjectPatch::default()
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("before start date"));

    let err = app
        .add_project(
            &supervisor,
            NewProject {
                title: "Bridge".to_string(),
                description: String::new(),
                budget: 1.0,
                start_date: "01/07/2025".to_string(),
                end_date: "2025-09-30".to_string(),
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("YYYY-MM-DD"));

    let err = app
        .add_project(
            &supervisor,
            NewProject {
                title: "Bridge".to_string(),
                description: String::new(),
                budget: -5.0,
                start_date: "2025-07-01".to_string(),
                end_date: "2025-09-30".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert!(project(&app, 3).is_none());
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn status_labels_are_parsed_strictly_on_input() {
    let (app, _, root) = open_seeded();
    let supervisor = session_for(&app, 2);
    let err = app
        .update_task(
            &supervisor,
            2,
            TaskPatch {
                status: Some("paused".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, AppError::ParseLabel(_)));
    assert!(err.to_string().starts_with("invalid task status 'paused'"));
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn tasks_stay_within_supervisor_scope() {
    let (app, _, root) = open_seeded();
    let admin = session_for(&app, 1);
    let created = app
        .add_supervisor(&admin, supervisor_input("supervisor2"))
        .expect("add supervisor should succeed");
    let other = session_for(&app, created.id);

    let err = app
        .add_task(
            &other,
            NewTask {
                project_id: 1,
                title: "Shoulder work".to_string(),
                description: None,
                assigned_to: 3,
                start_date: "2025-05-01".to_string(),
                end_date: "2025-05-10".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let own = session_for(&app, 2);
    let err = app
        .add_task(
            &own,
            NewTask {
                project_id: 1,
                title: "Shoulder work".to_string(),
                description: None,
                assigned_to: 1,
                start_date: "2025-05-01".to_string(),
                end_date: "2025-05-10".to_string(),
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("not one of your workers"));
    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn workers_only_touch_their_own_tasks() {
    let (app, _, root) = open_seeded();
    let supervisor = session_for(&app, 2);
    let created: User = app
        .add_worker(
            &supervisor,
            NewWorker {
                name: "Anil Das".to_string(),
                email: None,
                phone: None,
                username: "worker2".to_string(),
                password: "pw".to_string(),
            },
        )
        .expect("add worker should succeed");
    let other_worker = session_for(&app, created.id);

    let err = app
        .update_task_progress(&other_worker, 2, "completed", None)
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert_eq!(project(&app, 1).expect("project").progress, 35);
    let _ = std::fs::remove_dir_all(root);
}
