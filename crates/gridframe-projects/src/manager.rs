//! Project store on top of a key-value backend.
//!
//! Layout:
//! - `PROJECT_LIST_V2` holds a JSON array of [`ProjectSummary`], most
//!   recent first, capped at the configured maximum.
//! - `project:<id>` holds the full [`Project`] as JSON.
//!
//! Writes are ordered so that an interrupted operation can only leave an
//! orphan detail record, never an index entry without its detail: `save`
//! writes the detail before the index, and removals drop the index entry
//! before the detail.
//!
//! An unparseable index reads as empty for listing and export, but every
//! path that writes the index or deletes records refuses to run against
//! it, so a corrupt index never cascades into lost projects.

use crate::error::{ProjectError, ProjectResult};
use crate::model::{Project, ProjectSummary};
use crate::storage::KeyValueStorage;
use gridframe_core::constants::{project_key, MAX_PROJECTS, PROJECT_KEY_PREFIX, PROJECT_LIST_KEY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// What [`ProjectStore::reconcile`] repaired
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Detail records with no index entry, now deleted
    pub orphans_removed: Vec<String>,
    /// Index entries with no readable detail record, now dropped
    pub dangling_removed: Vec<String>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.orphans_removed.is_empty() && self.dangling_removed.is_empty()
    }
}

/// Persistence for projects and the recent-projects index
#[derive(Clone)]
pub struct ProjectStore {
    storage: Arc<dyn KeyValueStorage>,
    max_projects: usize,
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("max_projects", &self.max_projects)
            .finish_non_exhaustive()
    }
}

impl ProjectStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            max_projects: MAX_PROJECTS,
        }
    }

    /// Override the index cap (at least one entry is always kept)
    pub fn with_max_projects(mut self, max_projects: usize) -> Self {
        self.max_projects = max_projects.max(1);
        self
    }

    pub fn max_projects(&self) -> usize {
        self.max_projects
    }

    /// Index entries, most recent first.
    ///
    /// A missing index is an empty list. An unparseable index is logged
    /// and also treated as empty.
    pub async fn list_summaries(&self) -> ProjectResult<Vec<ProjectSummary>> {
        self.read_index()
            .await
            .inspect_err(|e| tracing::error!("Failed to read project index: {}", e))
    }

    /// Full record for `id`; missing or unparseable records yield `None`.
    pub async fn get_detail(&self, id: &str) -> ProjectResult<Option<Project>> {
        let raw = self
            .storage
            .get_item(&project_key(id))
            .await
            .inspect_err(|e| tracing::error!(id, "Failed to read project: {}", e))?;

        let Some(raw) = raw else {
            tracing::debug!(id, "Project not found");
            return Ok(None);
        };

        match serde_json::from_str::<Project>(&raw) {
            Ok(project) => Ok(Some(project)),
            Err(e) => {
                tracing::warn!(id, "Ignoring unreadable project record: {}", e);
                Ok(None)
            }
        }
    }

    /// Like [`get_detail`](Self::get_detail) but missing is an error
    pub async fn require_detail(&self, id: &str) -> ProjectResult<Project> {
        self.get_detail(id)
            .await?
            .ok_or_else(|| ProjectError::NotFound(id.to_string()))
    }

    /// Write `project` and update the index.
    ///
    /// A new id goes to the front of the index and may evict the oldest
    /// entry. An existing id is updated where it stands.
    pub async fn save(&self, project: &Project) -> ProjectResult<()> {
        self.save_inner(project)
            .await
            .inspect_err(|e| tracing::error!(id = %project.id, "Failed to save project: {}", e))
    }

    async fn save_inner(&self, project: &Project) -> ProjectResult<()> {
        if project.id.trim().is_empty() {
            return Err(ProjectError::InvalidProject("project id is empty".to_string()));
        }

        let mut index = self.read_index_strict().await?;

        let detail = serde_json::to_string(project)?;
        self.storage.set_item(&project_key(&project.id), &detail).await?;

        let summary = project.summary();
        let mut evicted = Vec::new();

        match index.iter().position(|s| s.id == project.id) {
            Some(pos) => index[pos] = summary,
            None => {
                index.insert(0, summary);
                while index.len() > self.max_projects {
                    if let Some(old) = index.pop() {
                        evicted.push(old.id);
                    }
                }
            }
        }

        self.write_index(&index).await?;

        for id in evicted {
            tracing::info!(id = %id, "Evicting oldest project");
            if let Err(e) = self.storage.remove_item(&project_key(&id)).await {
                tracing::warn!(id = %id, "Evicted project left behind as orphan: {}", e);
            }
        }

        tracing::info!(id = %project.id, name = %project.name, "Saved project");
        Ok(())
    }

    /// Remove a project. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: &str) -> ProjectResult<()> {
        self.delete_inner(id)
            .await
            .inspect_err(|e| tracing::error!(id, "Failed to delete project: {}", e))
    }

    async fn delete_inner(&self, id: &str) -> ProjectResult<()> {
        let mut index = self.read_index_strict().await?;
        let before = index.len();
        index.retain(|s| s.id != id);
        if index.len() != before {
            self.write_index(&index).await?;
        }
        self.storage.remove_item(&project_key(id)).await?;
        tracing::info!(id, "Deleted project");
        Ok(())
    }

    /// Remove every detail record, then the index.
    ///
    /// Not transactional: a failure part way leaves the remaining records.
    pub async fn clear_all(&self) -> ProjectResult<()> {
        self.clear_all_inner()
            .await
            .inspect_err(|e| tracing::error!("Failed to clear projects: {}", e))
    }

    async fn clear_all_inner(&self) -> ProjectResult<()> {
        let keys = self.detail_keys().await?;
        for key in &keys {
            self.storage.remove_item(key).await?;
        }
        self.storage.remove_item(PROJECT_LIST_KEY).await?;
        tracing::info!(count = keys.len(), "Cleared all projects");
        Ok(())
    }

    /// Every readable project referenced by the index, as a JSON array
    pub async fn export_all(&self) -> ProjectResult<String> {
        let projects = self.load_all().await?;
        let blob = serde_json::to_string_pretty(&projects)?;
        tracing::info!(count = projects.len(), "Exported projects");
        Ok(blob)
    }

    /// Every readable project referenced by the index, index order
    pub async fn load_all(&self) -> ProjectResult<Vec<Project>> {
        let mut projects = Vec::new();
        for summary in self.read_index().await? {
            match self.get_detail(&summary.id).await? {
                Some(project) => projects.push(project),
                None => tracing::warn!(id = %summary.id, "Index entry without detail record"),
            }
        }
        Ok(projects)
    }

    /// Save each project of an exported blob in order. Returns the count.
    ///
    /// Later entries overwrite earlier ones with the same id. Not
    /// transactional: a failure part way keeps what was already saved.
    pub async fn import_all(&self, blob: &str) -> ProjectResult<usize> {
        let projects: Vec<Project> = serde_json::from_str(blob)
            .inspect_err(|e| tracing::error!("Import blob is not a project list: {}", e))?;

        for project in &projects {
            self.save(project).await?;
        }

        tracing::info!(count = projects.len(), "Imported projects");
        Ok(projects.len())
    }

    /// Repair divergence between the index and the detail records.
    ///
    /// Fails with [`ProjectError::Consistency`] when the index is
    /// unparseable; no record is touched in that case.
    pub async fn reconcile(&self) -> ProjectResult<ReconcileReport> {
        self.reconcile_inner()
            .await
            .inspect_err(|e| tracing::error!("Failed to reconcile projects: {}", e))
    }

    async fn reconcile_inner(&self) -> ProjectResult<ReconcileReport> {
        let mut report = ReconcileReport::default();
        let index = self.read_index_strict().await?;

        let mut kept = Vec::with_capacity(index.len());
        for summary in index {
            if self.get_detail(&summary.id).await?.is_some() {
                kept.push(summary);
            } else {
                report.dangling_removed.push(summary.id);
            }
        }
        if !report.dangling_removed.is_empty() {
            self.write_index(&kept).await?;
        }

        let indexed: HashSet<&str> = kept.iter().map(|s| s.id.as_str()).collect();
        for key in self.detail_keys().await? {
            let id = &key[PROJECT_KEY_PREFIX.len()..];
            if !indexed.contains(id) {
                self.storage.remove_item(&key).await?;
                report.orphans_removed.push(id.to_string());
            }
        }

        if report.is_clean() {
            tracing::debug!("Project storage is consistent");
        } else {
            tracing::warn!(
                orphans = report.orphans_removed.len(),
                dangling = report.dangling_removed.len(),
                "Repaired project storage"
            );
        }
        Ok(report)
    }

    pub async fn rename(&self, id: &str, name: impl Into<String>) -> ProjectResult<Project> {
        let mut project = self.require_detail(id).await?;
        project.name = name.into();
        project.touch();
        self.save(&project).await?;
        Ok(project)
    }

    pub async fn set_favorite(&self, id: &str, favorite: bool) -> ProjectResult<Project> {
        let mut project = self.require_detail(id).await?;
        project.is_favorite = favorite;
        project.touch();
        self.save(&project).await?;
        Ok(project)
    }

    async fn read_index(&self) -> ProjectResult<Vec<ProjectSummary>> {
        match self.read_index_strict().await {
            Err(ProjectError::Consistency(reason)) => {
                tracing::warn!("{}, treating as empty", reason);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Index for paths that rewrite it or delete records
    async fn read_index_strict(&self) -> ProjectResult<Vec<ProjectSummary>> {
        let Some(raw) = self.storage.get_item(PROJECT_LIST_KEY).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw)
            .map_err(|e| ProjectError::Consistency(format!("Project index is unreadable: {}", e)))
    }

    async fn write_index(&self, index: &[ProjectSummary]) -> ProjectResult<()> {
        let raw = serde_json::to_string(index)?;
        self.storage.set_item(PROJECT_LIST_KEY, &raw).await
    }

    async fn detail_keys(&self) -> ProjectResult<Vec<String>> {
        let mut keys: Vec<String> = self
            .storage
            .keys()
            .await?
            .into_iter()
            .filter(|k| k.starts_with(PROJECT_KEY_PREFIX))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageRecord, ImageSource};
    use crate::storage::MemoryStorage;

    fn project(name: &str) -> Project {
        Project::new(name, ImageRecord::new(format!("file:///{name}.jpg"), ImageSource::Gallery))
    }

    fn store() -> (ProjectStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (ProjectStore::new(Arc::new(storage.clone())), storage)
    }

    #[tokio::test]
    async fn test_new_project_goes_first() {
        let (store, _) = store();
        let a = project("a");
        let b = project("b");
        store.save(&a).await.unwrap();
        store.save(&b).await.unwrap();

        let ids: Vec<_> = store.list_summaries().await.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![b.id.clone(), a.id.clone()]);
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let (store, _) = store();
        let mut a = project("a");
        let b = project("b");
        store.save(&a).await.unwrap();
        store.save(&b).await.unwrap();

        a.name = "renamed".to_string();
        store.save(&a).await.unwrap();

        let index = store.list_summaries().await.unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index[0].id, b.id);
        assert_eq!(index[1].name, "renamed");
    }

    #[tokio::test]
    async fn test_small_cap_evicts_oldest() {
        let (store, storage) = store();
        let store = store.with_max_projects(2);
        let first = project("first");
        store.save(&first).await.unwrap();
        store.save(&project("second")).await.unwrap();
        store.save(&project("third")).await.unwrap();

        let index = store.list_summaries().await.unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.iter().all(|s| s.id != first.id));
        assert_eq!(store.get_detail(&first.id).await.unwrap(), None);
        // Index plus two details.
        assert_eq!(storage.len(), 3);
    }

    #[tokio::test]
    async fn test_corrupt_detail_is_not_found() {
        let (store, storage) = store();
        storage.set_item(&project_key("bad"), "{not json").await.unwrap();
        assert_eq!(store.get_detail("bad").await.unwrap(), None);
        assert!(store.require_detail("bad").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_corrupt_index_reads_as_empty() {
        let (store, storage) = store();
        storage.set_item(PROJECT_LIST_KEY, "oops").await.unwrap();
        assert!(store.list_summaries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_index_blocks_writes() {
        let (store, storage) = store();
        let kept = project("kept");
        store.save(&kept).await.unwrap();
        storage.set_item(PROJECT_LIST_KEY, "[{\"truncated").await.unwrap();

        let err = store.save(&project("new")).await.unwrap_err();
        assert!(matches!(err, ProjectError::Consistency(_)));
        let err = store.delete(&kept.id).await.unwrap_err();
        assert!(matches!(err, ProjectError::Consistency(_)));

        // Index untouched, only the original detail record exists.
        assert_eq!(storage.len(), 2);
        assert_eq!(
            storage.get_item(PROJECT_LIST_KEY).await.unwrap().as_deref(),
            Some("[{\"truncated")
        );
        assert!(store.get_detail(&kept.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let (store, storage) = store();
        let mut p = project("x");
        p.id = String::new();
        assert!(matches!(store.save(&p).await, Err(ProjectError::InvalidProject(_))));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_rename_and_favorite() {
        let (store, _) = store();
        let p = project("x");
        store.save(&p).await.unwrap();

        let renamed = store.rename(&p.id, "y").await.unwrap();
        assert_eq!(renamed.name, "y");
        assert!(renamed.updated_at >= p.updated_at);

        store.set_favorite(&p.id, true).await.unwrap();
        let summary = &store.list_summaries().await.unwrap()[0];
        assert!(summary.is_favorite);
        assert_eq!(summary.name, "y");

        assert!(store.rename("missing", "z").await.unwrap_err().is_not_found());
    }
}
