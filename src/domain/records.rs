use serde::{Deserialize, Serialize};

use crate::domain::status::{FeedbackStatus, ProjectStatus, Role, TaskStatus};
use crate::repository::Record;
use crate::store::Collection;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taluk: Option<String>,
    /// Supervising user id; only set for workers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    pub fn is_worker_of(&self, supervisor_id: u64) -> bool {
        self.role == Role::Worker && self.supervisor == Some(supervisor_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    pub approved: bool,
    pub budget: f64,
    pub taluk: String,
    pub supervisor_id: u64,
    pub start_date: String,
    pub end_date: String,
    /// Cached mean of task progress; refreshed by `App::recompute_progress`.
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub project_id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub assigned_to: u64,
    pub status: TaskStatus,
    pub start_date: String,
    pub end_date: String,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: u64,
    pub name: String,
    pub unit: String,
    pub unit_price: f64,
    pub project_id: u64,
    pub allocated: u64,
    pub used: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: u64,
    pub submitted_by: u64,
    pub project_id: u64,
    pub message: String,
    pub date: String,
    pub status: FeedbackStatus,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_date: Option<String>,
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Project {
    const COLLECTION: Collection = Collection::Projects;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Task {
    const COLLECTION: Collection = Collection::Tasks;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Material {
    const COLLECTION: Collection = Collection::Materials;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Feedback {
    const COLLECTION: Collection = Collection::Feedback;

    fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::{Feedback, Material, Project, User};
    use crate::domain::status::{FeedbackStatus, ProjectStatus, Role};

    #[test]
    fn decodes_camel_case_blobs() {
        let raw = r#"{
            "id": 1,
            "title": "Road Construction Phase 1",
            "description": "5km road",
            "status": "in-progress",
            "budget": 500000,
            "taluk": "North Taluk",
            "supervisorId": 2,
            "startDate": "2025-04-01",
            "endDate": "2025-06-30",
            "progress": 35,
            "approved": true
        }"#;
        let project: Project = serde_json::from_str(raw).expect("project should decode");
        assert_eq!(project.supervisor_id, 2);
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.budget, 500000.0);

        let material: Material = serde_json::from_str(
            r#"{"id":2,"name":"Sand","unit":"cubic meters","unitPrice":2000,"projectId":1,"allocated":50,"used":20}"#,
        )
        .expect("material should decode");
        assert_eq!(material.unit_price, 2000.0);
    }

    #[test]
    fn worker_response_null_decodes_as_none() {
        let feedback: Feedback = serde_json::from_str(
            r#"{"id":3,"submittedBy":3,"projectId":1,"message":"m","date":"2025-04-10","status":"pending","response":null}"#,
        )
        .expect("feedback should decode");
        assert_eq!(feedback.status, FeedbackStatus::Pending);
        assert!(feedback.response.is_none());
        assert!(feedback.response_date.is_none());
    }

    #[test]
    fn missing_numeric_field_is_a_decode_error() {
        let result = serde_json::from_str::<Material>(
            r#"{"id":2,"name":"Sand","unit":"bags","projectId":1,"allocated":50,"used":20}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn worker_membership_requires_worker_role() {
        let mut user = User {
            id: 3,
            username: "worker1".to_string(),
            password: "work123".to_string(),
            role: Role::Worker,
            name: "Vijay Singh".to_string(),
            taluk: Some("North Taluk".to_string()),
            supervisor: Some(2),
            district: None,
            email: None,
            phone: None,
        };
        assert!(user.is_worker_of(2));
        assert!(!user.is_worker_of(5));
        user.role = Role::Supervisor;
        assert!(!user.is_worker_of(2));
    }
}
