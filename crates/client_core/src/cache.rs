//! Client-side query cache for project lists, keyed by organization slug.
//!
//! The cache is an injectable service rather than a process-wide singleton so
//! tests can hold an isolated instance per case. Absence of a key means
//! "never fetched" and is distinct from a cached empty list.

use std::collections::HashMap;

use shared::domain::{OrganizationSlug, Project};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<OrganizationSlug, Vec<Project>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the cached list for `slug`, if one was ever written.
    pub async fn read(&self, slug: &OrganizationSlug) -> Option<Vec<Project>> {
        self.entries.lock().await.get(slug).cloned()
    }

    /// Replace the cached list for `slug`. The entry swap happens under the
    /// cache lock, so readers never observe a partially-updated list.
    pub async fn write(&self, slug: OrganizationSlug, projects: Vec<Project>) {
        self.entries.lock().await.insert(slug, projects);
    }

    /// Reconciliation primitive: append `project` to the cached list for
    /// `slug`. Read and write happen under a single guard with no await
    /// point in between, so interleaved creations against the same key each
    /// append against the latest state and no append is lost.
    ///
    /// Returns false without writing when the key was never fetched; the
    /// next natural read will fetch fresh data including the new project.
    pub async fn append_project(&self, slug: &OrganizationSlug, project: Project) -> bool {
        let mut entries = self.entries.lock().await;
        match entries.get_mut(slug) {
            Some(projects) => {
                projects.push(project);
                true
            }
            None => {
                debug!(organization = %slug, "no cached project list; skipping reconcile");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{ProjectId, ProjectStatus};

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            name: name.to_string(),
            status: ProjectStatus::Active,
            task_count: 0,
            completed_tasks: 0,
            completion_rate: 0.0,
        }
    }

    #[tokio::test]
    async fn absence_is_distinct_from_empty() {
        let cache = QueryCache::new();
        let acme = OrganizationSlug::new("acme");

        assert_eq!(cache.read(&acme).await, None);

        cache.write(acme.clone(), Vec::new()).await;
        assert_eq!(cache.read(&acme).await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn write_replaces_existing_entry() {
        let cache = QueryCache::new();
        let acme = OrganizationSlug::new("acme");

        cache.write(acme.clone(), vec![project("1", "Old")]).await;
        cache.write(acme.clone(), vec![project("2", "New")]).await;

        let cached = cache.read(&acme).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, ProjectId::new("2"));
    }

    #[tokio::test]
    async fn append_skips_unfetched_keys() {
        let cache = QueryCache::new();
        let acme = OrganizationSlug::new("acme");

        assert!(!cache.append_project(&acme, project("1", "Launch")).await);
        assert_eq!(cache.read(&acme).await, None);
    }

    #[tokio::test]
    async fn appends_land_in_submission_order() {
        let cache = QueryCache::new();
        let acme = OrganizationSlug::new("acme");
        cache.write(acme.clone(), vec![project("1", "First")]).await;

        assert!(cache.append_project(&acme, project("2", "Second")).await);
        assert!(cache.append_project(&acme, project("3", "Third")).await);

        let ids: Vec<_> = cache
            .read(&acme)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn keys_are_isolated() {
        let cache = QueryCache::new();
        let acme = OrganizationSlug::new("acme");
        let globex = OrganizationSlug::new("globex");
        cache.write(acme.clone(), vec![project("1", "Launch")]).await;

        assert!(!cache.append_project(&globex, project("2", "Other")).await);
        assert_eq!(cache.read(&acme).await.unwrap().len(), 1);
        assert_eq!(cache.read(&globex).await, None);
    }
}
