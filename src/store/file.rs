//! Plan file storage.
//!
//! One plan, one JSON file. Saves go through a temporary file and an
//! atomic rename so a crash mid-write never corrupts the document.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::plan::Plan;

use super::codec::PlanCodec;

/// Default plan file name.
pub const DEFAULT_PLAN_FILE: &str = "deploy-plan.json";

/// File-backed store for a single plan document.
#[derive(Debug)]
pub struct PlanStore {
    /// Path to the plan file.
    path: PathBuf,
    /// Document codec.
    codec: PlanCodec,
}

impl PlanStore {
    /// Creates a store for the given plan file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codec: PlanCodec::new(),
        }
    }

    /// Returns the path of the plan file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the plan, or returns `None` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<Option<Plan>> {
        if !self.path.exists() {
            debug!("Plan file does not exist: {}", self.path.display());
            return Ok(None);
        }

        info!("Loading plan from: {}", self.path.display());

        let bytes = fs::read(&self.path).await?;
        let plan = self.codec.import(&bytes)?;
        Ok(Some(plan))
    }

    /// Loads the plan, failing when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when there is no plan file yet.
    pub async fn load_required(&self) -> Result<Plan> {
        match self.load().await? {
            Some(plan) => Ok(plan),
            None => Err(StoreError::NotFound {
                path: self.path.clone(),
            }
            .into()),
        }
    }

    /// Saves the plan atomically.
    ///
    /// # Errors
    ///
    /// Returns an error when the plan cannot be encoded or written.
    pub async fn save(&self, plan: &Plan) -> Result<()> {
        info!("Saving plan to: {}", self.path.display());

        let bytes = self.codec.export(plan)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating plan directory: {}", parent.display());
                fs::create_dir_all(parent).await?;
            }
        }

        // Write to a temporary file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;

        fs::rename(&temp_path, &self.path).await?;

        debug!("Plan saved successfully");
        Ok(())
    }

    /// Returns true when a plan file exists at the store path.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Deletes the plan file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be removed.
    pub async fn delete(&self) -> Result<()> {
        if self.path.exists() {
            info!("Deleting plan file: {}", self.path.display());
            fs::remove_file(&self.path).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (PlanStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = PlanStore::new(temp_dir.path().join(DEFAULT_PLAN_FILE));
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let (store, _temp) = create_test_store();

        let mut plan = Plan::new();
        plan.project_name = String::from("checkout");
        store.save(&plan).await.expect("Failed to save plan");

        let loaded = store
            .load()
            .await
            .expect("Failed to load plan")
            .expect("Plan should exist");

        assert_eq!(loaded, plan);
    }

    #[tokio::test]
    async fn test_load_nonexistent() {
        let (store, _temp) = create_test_store();

        let result = store.load().await.expect("Load should not fail");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_load_required_missing() {
        let (store, _temp) = create_test_store();

        assert!(store.load_required().await.is_err());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let (store, _temp) = create_test_store();

        let mut plan = Plan::new();
        plan.project_name = String::from("first");
        store.save(&plan).await.expect("Failed to save plan");

        plan.project_name = String::from("second");
        store.save(&plan).await.expect("Failed to save plan");

        let loaded = store
            .load()
            .await
            .expect("Failed to load plan")
            .expect("Plan should exist");
        assert_eq!(loaded.project_name, "second");
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let (store, _temp) = create_test_store();

        assert!(!store.exists());
        store.save(&Plan::new()).await.expect("Failed to save plan");
        assert!(store.exists());

        store.delete().await.expect("Failed to delete plan");
        assert!(!store.exists());
    }

    #[tokio::test]
    async fn test_load_rejects_corrupt_file() {
        let (store, _temp) = create_test_store();

        tokio::fs::write(store.path(), b"{broken")
            .await
            .expect("Failed to write corrupt file");

        assert!(store.load().await.is_err());
    }
}
