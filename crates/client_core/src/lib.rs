//! Headless client for the project dashboard: a query cache keyed by
//! organization, the GraphQL projects API, the create-project workflow, and
//! the dashboard view controller.

pub mod cache;
pub mod dashboard;
pub mod transport;
pub mod workflow;

pub use cache::QueryCache;
pub use dashboard::{DashboardController, DashboardState};
pub use transport::{
    ApiConfig, ConfigError, FetchError, HttpProjectsApi, MissingProjectsApi, ProjectsApi,
    SubmitError,
};
pub use workflow::{
    validate, CreateProjectError, CreateProjectWorkflow, ProjectDraft, ValidDraft, ValidationError,
};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
