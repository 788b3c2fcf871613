mod issue;
mod project;
mod user;

pub use issue::{Issue, WorkflowState};
pub use project::Project;
pub use user::User;
