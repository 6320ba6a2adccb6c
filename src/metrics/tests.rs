use super::{
    budget_summary, budget_utilization, project_progress, rollup_by_taluk, status_counts,
};
use crate::domain::{Material, Project, ProjectStatus, Task, TaskStatus};

fn task(id: u64, progress: u8) -> Task {
    Task {
        id,
        project_id: 1,
        title: format!("task {id}"),
        description: None,
        assigned_to: 3,
        status: TaskStatus::InProgress,
        start_date: "2025-04-01".to_string(),
        end_date: "2025-05-01".to_string(),
        progress,
    }
}

fn material(id: u64, project_id: u64, unit_price: f64, used: u64) -> Material {
    Material {
        id,
        name: format!("material {id}"),
        unit: "bags".to_string(),
        unit_price,
        project_id,
        allocated: 1_000,
        used,
    }
}

fn project(id: u64, taluk: &str, budget: f64, progress: u8, status: ProjectStatus) -> Project {
    Project {
        id,
        title: format!("project {id}"),
        description: String::new(),
        status,
        approved: true,
        budget,
        taluk: taluk.to_string(),
        supervisor_id: 2,
        start_date: "2025-04-01".to_string(),
        end_date: "2025-06-30".to_string(),
        progress,
    }
}

#[test]
fn progress_is_rounded_mean_and_zero_for_no_tasks() {
    assert_eq!(project_progress([task(1, 60), task(2, 40)].iter()), 50);
    assert_eq!(project_progress([task(1, 100), task(2, 60)].iter()), 80);
    assert_eq!(project_progress([task(1, 33), task(2, 34)].iter()), 34);
    assert_eq!(
        project_progress([task(1, 10), task(2, 10), task(3, 11)].iter()),
        10
    );
    assert_eq!(project_progress(Vec::<Task>::new().iter()), 0);
}

#[test]
fn progress_stays_within_percentage_bounds() {
    for values in [[0u8, 0, 0], [100, 100, 100], [0, 50, 100], [1, 2, 100]] {
        let tasks: Vec<Task> = values
            .iter()
            .enumerate()
            .map(|(index, &progress)| task(index as u64, progress))
            .collect();
        let progress = project_progress(tasks.iter());
        assert!(progress <= 100, "progress {progress} out of range");
    }
}

#[test]
fn utilization_sums_price_times_used_in_any_order() {
    let materials = vec![
        material(1, 1, 350.0, 200),
        material(2, 1, 2000.0, 20),
    ];
    assert_eq!(budget_utilization(materials.iter()), 110_000.0);
    assert_eq!(budget_utilization(materials.iter().rev()), 110_000.0);
    assert_eq!(budget_utilization(Vec::<Material>::new().iter()), 0.0);
    assert_eq!(budget_utilization([material(3, 1, 12.5, 3)].iter()), 37.5);
}

#[test]
fn budget_summary_reports_available_balance() {
    let projects = vec![
        project(1, "North Taluk", 500_000.0, 35, ProjectStatus::InProgress),
        project(2, "North Taluk", 300_000.0, 0, ProjectStatus::PendingApproval),
    ];
    let materials = vec![material(1, 1, 350.0, 200), material(2, 1, 2000.0, 20)];
    let summary = budget_summary(projects.iter(), materials.iter());
    assert_eq!(summary.total_budget, 800_000.0);
    assert_eq!(summary.utilized, 110_000.0);
    assert_eq!(summary.available, 690_000.0);
}

#[test]
fn taluk_rollup_keeps_first_seen_order_and_joins_materials() {
    let projects = vec![
        project(1, "North", 100.0, 40, ProjectStatus::InProgress),
        project(2, "South", 200.0, 100, ProjectStatus::Completed),
        project(3, "North", 300.0, 61, ProjectStatus::PendingApproval),
    ];
    let materials = vec![
        material(1, 1, 10.0, 2),
        material(2, 3, 5.0, 4),
        material(3, 2, 1.0, 7),
        material(4, 99, 1000.0, 1000),
    ];

    for _ in 0..3 {
        let rollup = rollup_by_taluk(projects.iter(), &materials);
        let order: Vec<&str> = rollup.iter().map(|group| group.taluk.as_str()).collect();
        assert_eq!(order, vec!["North", "South"]);
    }

    let rollup = rollup_by_taluk(projects.iter(), &materials);
    let north = &rollup[0];
    assert_eq!(north.projects, 2);
    assert_eq!(north.allocated, 400.0);
    assert_eq!(north.utilized, 40.0);
    assert_eq!(north.total_progress, 101);
    assert_eq!(north.average_progress, 51);
    assert_eq!(north.in_progress, 1);
    assert_eq!(north.completed, 0);

    let south = &rollup[1];
    assert_eq!(south.utilized, 7.0);
    assert_eq!(south.completed, 1);
    assert_eq!(south.average_progress, 100);
}

#[test]
fn taluk_rollup_of_nothing_is_empty() {
    assert!(rollup_by_taluk(Vec::<Project>::new().iter(), &[]).is_empty());
}

#[test]
fn status_counts_include_known_zeroes_and_pass_unknown_labels_through() {
    let statuses = vec![
        ProjectStatus::Completed,
        ProjectStatus::Unknown("not-started".to_string()),
        ProjectStatus::Completed,
        ProjectStatus::Unknown("on-hold".to_string()),
        ProjectStatus::Unknown("not-started".to_string()),
    ];
    let counts = status_counts(statuses.iter());
    let flattened: Vec<(&str, &str, usize)> = counts
        .iter()
        .map(|entry| (entry.status.as_str(), entry.label.as_str(), entry.count))
        .collect();
    assert_eq!(
        flattened,
        vec![
            ("pending-approval", "Pending Approval", 0),
            ("in-progress", "In Progress", 0),
            ("completed", "Completed", 2),
            ("not-started", "not-started", 2),
            ("on-hold", "on-hold", 1),
        ]
    );
}

#[test]
fn stored_labels_outside_the_wire_set_are_counted_literally() {
    let statuses: Vec<TaskStatus> =
        serde_json::from_str(r#"["In Progress","in-progress","COMPLETED"]"#)
            .expect("stored statuses should decode");
    assert_eq!(statuses[0], TaskStatus::Unknown("In Progress".to_string()));
    assert_eq!(statuses[1], TaskStatus::InProgress);
    assert_eq!(statuses[2], TaskStatus::Unknown("COMPLETED".to_string()));

    let counts = status_counts(statuses.iter());
    let flattened: Vec<(&str, usize)> = counts
        .iter()
        .map(|entry| (entry.status.as_str(), entry.count))
        .collect();
    assert_eq!(
        flattened,
        vec![
            ("not-started", 0),
            ("in-progress", 1),
            ("completed", 0),
            ("In Progress", 1),
            ("COMPLETED", 1),
        ]
    );

    assert_eq!(
        serde_json::to_string(&statuses).expect("statuses should encode"),
        r#"["In Progress","in-progress","COMPLETED"]"#
    );
}
