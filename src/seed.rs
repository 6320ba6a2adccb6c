use crate::domain::{
    Feedback, FeedbackStatus, Material, Project, ProjectStatus, Role, Task, TaskStatus, User,
};
use crate::store::{Collection, Store, StoreError};

/// Writes the demo district: one admin, one supervisor with a worker, two
/// projects, two tasks, two materials and one feedback item. Counters resume
/// after the seeded ids.
pub fn seed_demo_data(store: &Store, district: &str) -> Result<(), StoreError> {
    write_all(
        store,
        &demo_users(district),
        &demo_projects(),
        &demo_tasks(),
        &demo_materials(),
        &demo_feedback(),
    )?;
    log::info!("seeded demo data for {}", district);
    Ok(())
}

/// Only the district admin account; every other collection starts empty.
pub fn seed_admin_only(store: &Store, district: &str) -> Result<(), StoreError> {
    let users: Vec<User> = demo_users(district)
        .into_iter()
        .filter(|user| user.role == Role::Admin)
        .collect();
    write_all(store, &users, &[], &[], &[], &[])?;
    log::info!("seeded admin account for {}", district);
    Ok(())
}

/// Writes every collection and its counter in one transaction, so a failed
/// seed never leaves the store looking initialized.
fn write_all(
    store: &Store,
    users: &[User],
    projects: &[Project],
    tasks: &[Task],
    materials: &[Material],
    feedback: &[Feedback],
) -> Result<(), StoreError> {
    let tx = store.conn().unchecked_transaction()?;
    store.write(Collection::Users, users)?;
    store.write(Collection::Projects, projects)?;
    store.write(Collection::Tasks, tasks)?;
    store.write(Collection::Materials, materials)?;
    store.write(Collection::Feedback, feedback)?;

    store.set_counter(Collection::Users, users.len() as u64 + 1)?;
    store.set_counter(Collection::Projects, projects.len() as u64 + 1)?;
    store.set_counter(Collection::Tasks, tasks.len() as u64 + 1)?;
    store.set_counter(Collection::Materials, materials.len() as u64 + 1)?;
    store.set_counter(Collection::Feedback, feedback.len() as u64 + 1)?;
    tx.commit()?;
    Ok(())
}

fn demo_users(district: &str) -> Vec<User> {
    vec![
        User {
            id: 1,
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
            name: "District Collector".to_string(),
            taluk: None,
            supervisor: None,
            district: Some(district.to_string()),
            email: Some("collector@district.gov".to_string()),
            phone: Some("9876543210".to_string()),
        },
        User {
            id: 2,
            username: "supervisor1".to_string(),
            password: "super123".to_string(),
            role: Role::Supervisor,
            name: "Raj Kumar".to_string(),
            taluk: Some("North Taluk".to_string()),
            supervisor: None,
            district: Some(district.to_string()),
            email: Some("raj@district.gov".to_string()),
            phone: Some("9876543211".to_string()),
        },
        User {
            id: 3,
            username: "worker1".to_string(),
            password: "work123".to_string(),
            role: Role::Worker,
            name: "Vijay Singh".to_string(),
            taluk: Some("North Taluk".to_string()),
            supervisor: Some(2),
            district: Some(district.to_string()),
            email: Some("vijay@district.gov".to_string()),
            phone: Some("9876543212".to_string()),
        },
    ]
}

fn demo_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            title: "Road Construction Phase 1".to_string(),
            description: "Construction of 5km road connecting villages A and B".to_string(),
            status: ProjectStatus::InProgress,
            approved: true,
            budget: 500_000.0,
            taluk: "North Taluk".to_string(),
            supervisor_id: 2,
            start_date: "2025-04-01".to_string(),
            end_date: "2025-06-30".to_string(),
            progress: 35,
        },
        Project {
            id: 2,
            title: "School Building Renovation".to_string(),
            description: "Renovation of government school in Village C".to_string(),
            status: ProjectStatus::PendingApproval,
            approved: false,
            budget: 300_000.0,
            taluk: "North Taluk".to_string(),
            supervisor_id: 2,
            start_date: "2025-05-15".to_string(),
            end_date: "2025-08-15".to_string(),
            progress: 0,
        },
    ]
}

fn demo_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            project_id: 1,
            title: "Land clearing and preparation".to_string(),
            description: Some(
                "Clear vegetation and prepare the ground for road construction".to_string(),
            ),
            assigned_to: 3,
            status: TaskStatus::Completed,
            start_date: "2025-04-01".to_string(),
            end_date: "2025-04-15".to_string(),
            progress: 100,
        },
        Task {
            id: 2,
            project_id: 1,
            title: "Laying foundation".to_string(),
            description: Some("Lay the foundation for the road".to_string()),
            assigned_to: 3,
            status: TaskStatus::InProgress,
            start_date: "2025-04-16".to_string(),
            end_date: "2025-05-15".to_string(),
            progress: 60,
        },
    ]
}

fn demo_materials() -> Vec<Material> {
    vec![
        Material {
            id: 1,
            name: "Cement".to_string(),
            unit: "bags".to_string(),
            unit_price: 350.0,
            project_id: 1,
            allocated: 500,
            used: 200,
        },
        Material {
            id: 2,
            name: "Sand".to_string(),
            unit: "cubic meters".to_string(),
            unit_price: 2000.0,
            project_id: 1,
            allocated: 50,
            used: 20,
        },
    ]
}

fn demo_feedback() -> Vec<Feedback> {
    vec![Feedback {
        id: 1,
        submitted_by: 3,
        project_id: 1,
        message: "Need additional workers for the road construction project".to_string(),
        date: "2025-04-10".to_string(),
        status: FeedbackStatus::Pending,
        response: None,
        response_date: None,
    }]
}

#[cfg(test)]
mod tests;
