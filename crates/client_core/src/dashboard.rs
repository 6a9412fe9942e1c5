//! Dashboard view controller: reducer-like state transitions for a single
//! organization's project list, kept free of any rendering concerns.

use std::sync::Arc;

use shared::domain::{OrganizationSlug, Project};
use tracing::{debug, warn};

use crate::{
    cache::QueryCache,
    transport::ProjectsApi,
    workflow::{CreateProjectWorkflow, ProjectDraft},
};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Error(String),
    Loaded(Vec<Project>),
}

pub struct DashboardController {
    organization: OrganizationSlug,
    api: Arc<dyn ProjectsApi>,
    cache: Arc<QueryCache>,
    workflow: CreateProjectWorkflow,
    state: DashboardState,
    draft: Option<ProjectDraft>,
}

impl DashboardController {
    pub fn new(
        organization: OrganizationSlug,
        api: Arc<dyn ProjectsApi>,
        cache: Arc<QueryCache>,
    ) -> Self {
        let workflow = CreateProjectWorkflow::new(Arc::clone(&api), Arc::clone(&cache));
        Self {
            organization,
            api,
            cache,
            workflow,
            state: DashboardState::Loading,
            draft: None,
        }
    }

    pub fn organization(&self) -> &OrganizationSlug {
        &self.organization
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The rendered list, when loaded. An empty slice is the empty state,
    /// not an error.
    pub fn projects(&self) -> Option<&[Project]> {
        match &self.state {
            DashboardState::Loaded(projects) => Some(projects),
            _ => None,
        }
    }

    pub fn is_create_modal_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&ProjectDraft> {
        self.draft.as_ref()
    }

    /// Form-field access for the creation UI; no-op when the modal is
    /// closed.
    pub fn draft_mut(&mut self) -> Option<&mut ProjectDraft> {
        self.draft.as_mut()
    }

    /// The workflow driving create submissions. Cloneable, so a caller may
    /// run a submission on a detached task; closing the modal does not
    /// cancel it and its reconciliation still lands in the cache.
    pub fn workflow(&self) -> CreateProjectWorkflow {
        self.workflow.clone()
    }

    /// Fetch the project list, prime the cache, and move to `Loaded` or
    /// `Error`. Errors are not auto-retried; calling this again re-enters
    /// `Loading`.
    pub async fn load(&mut self) {
        self.state = DashboardState::Loading;
        match self.api.fetch_projects(&self.organization).await {
            Ok(projects) => {
                self.cache
                    .write(self.organization.clone(), projects.clone())
                    .await;
                debug!(
                    organization = %self.organization,
                    count = projects.len(),
                    "project list loaded"
                );
                self.state = DashboardState::Loaded(projects);
            }
            Err(err) => {
                warn!(organization = %self.organization, error = %err, "project list fetch failed");
                self.state = DashboardState::Error(err.to_string());
            }
        }
    }

    /// Re-read the cached list after a cache write for this organization.
    /// Without a cache entry the current state stands.
    pub async fn refresh_from_cache(&mut self) {
        if let Some(projects) = self.cache.read(&self.organization).await {
            self.state = DashboardState::Loaded(projects);
        }
    }

    pub fn open_create_modal(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(ProjectDraft::default());
        }
    }

    pub fn close_create_modal(&mut self) {
        self.draft = None;
    }

    /// Submit the active draft. On success the modal closes and the view
    /// re-renders from the freshly reconciled cache; on failure the modal
    /// stays open with the error recorded on the draft so the user can
    /// correct and retry.
    pub async fn submit_draft(&mut self) {
        let Some(draft) = self.draft.clone() else {
            return;
        };
        match self.workflow.submit(&self.organization, &draft).await {
            Ok(_) => {
                self.draft = None;
                self.refresh_from_cache().await;
            }
            Err(err) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.error = Some(err.to_string());
                }
            }
        }
    }
}
