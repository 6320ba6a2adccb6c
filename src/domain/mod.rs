pub mod records;
pub mod status;

pub use records::{Feedback, Material, Project, Task, User};
pub use status::{FeedbackStatus, ProjectStatus, Role, TaskStatus};
