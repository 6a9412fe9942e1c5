//! Create-project workflow: draft validation, the create mutation, and the
//! cache reconciliation that runs on its success path.

use std::sync::Arc;

use shared::{
    domain::{OrganizationSlug, Project, ProjectStatus},
    protocol::CreateProjectVariables,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cache::QueryCache,
    transport::{ProjectsApi, SubmitError},
};

/// Transient form state backing the creation UI. Created when the modal
/// opens, dropped on close or successful submission.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Last validation or submit failure, for inline display.
    pub error: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Project name is required")]
    EmptyName,
}

#[derive(Debug, Error)]
pub enum CreateProjectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    name: String,
    description: Option<String>,
    status: ProjectStatus,
}

/// The only client-side rule: the trimmed name must be non-empty.
/// Description and status are unconstrained beyond the enum.
pub fn validate(draft: &ProjectDraft) -> Result<ValidDraft, ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let description = if draft.description.trim().is_empty() {
        None
    } else {
        Some(draft.description.clone())
    };
    Ok(ValidDraft {
        name: draft.name.clone(),
        description,
        status: draft.status,
    })
}

#[derive(Clone)]
pub struct CreateProjectWorkflow {
    api: Arc<dyn ProjectsApi>,
    cache: Arc<QueryCache>,
}

impl CreateProjectWorkflow {
    pub fn new(api: Arc<dyn ProjectsApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// Validate the draft, issue the create mutation, and on success append
    /// the server's project to the cached list for `slug` before returning.
    ///
    /// An invalid draft never reaches the transport, and a failed mutation
    /// performs no cache write. Reconciliation runs exactly once, against
    /// the cache state current at mutation completion, so a racing create
    /// cannot lose this append. There is no retry here; the caller decides
    /// whether to resubmit.
    pub async fn submit(
        &self,
        slug: &OrganizationSlug,
        draft: &ProjectDraft,
    ) -> Result<Project, CreateProjectError> {
        let valid = validate(draft)?;
        let project = self
            .api
            .create_project(CreateProjectVariables {
                organization_slug: slug.clone(),
                name: valid.name,
                status: valid.status,
                description: valid.description,
            })
            .await?;

        if self.cache.append_project(slug, project.clone()).await {
            debug!(organization = %slug, project = %project.id, "appended created project to cache");
        }
        info!(organization = %slug, project = %project.id, "project created");
        Ok(project)
    }
}
