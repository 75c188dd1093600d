//! Module settings persistence
//!
//! One record per tenant. A tenant without a record reads as all-enabled
//! defaults; that decision lives in the handlers, repositories only report
//! absence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::{CompanyId, ModuleSettings};
use crate::shared::errors::{AppError, Result};

#[async_trait]
pub trait ModuleSettingsRepository: Send + Sync {
    async fn load(&self, company_id: CompanyId) -> Result<Option<ModuleSettings>>;

    /// Replace the tenant's record
    async fn save(&self, settings: &ModuleSettings) -> Result<()>;

    async fn delete(&self, company_id: CompanyId) -> Result<()>;
}

/// Process-local repository, used for tests and `--in-memory`
#[derive(Default)]
pub struct InMemoryModuleSettingsRepository {
    records: DashMap<CompanyId, ModuleSettings>,
}

impl InMemoryModuleSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModuleSettingsRepository for InMemoryModuleSettingsRepository {
    async fn load(&self, company_id: CompanyId) -> Result<Option<ModuleSettings>> {
        Ok(self
            .records
            .get(&company_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, settings: &ModuleSettings) -> Result<()> {
        self.records.insert(settings.company_id, settings.clone());
        Ok(())
    }

    async fn delete(&self, company_id: CompanyId) -> Result<()> {
        self.records.remove(&company_id);
        Ok(())
    }
}

/// One pretty-printed JSON file per tenant, with a read cache
pub struct JsonFileModuleSettingsRepository {
    dir: PathBuf,
    cache: DashMap<CompanyId, ModuleSettings>,
    /// Suffix for scratch files, so overlapping saves never share one
    scratch_seq: AtomicU64,
}

impl JsonFileModuleSettingsRepository {
    /// Open (and create if needed) the data directory
    pub async fn open(dir: &Path) -> Result<Self> {
        tokio::fs::create_dir_all(dir).await?;
        Ok(Self {
            dir: dir.to_path_buf(),
            cache: DashMap::new(),
            scratch_seq: AtomicU64::new(0),
        })
    }

    fn record_path(&self, company_id: CompanyId) -> PathBuf {
        self.dir.join(format!("company-{}.json", company_id))
    }
}

#[async_trait]
impl ModuleSettingsRepository for JsonFileModuleSettingsRepository {
    async fn load(&self, company_id: CompanyId) -> Result<Option<ModuleSettings>> {
        if let Some(entry) = self.cache.get(&company_id) {
            return Ok(Some(entry.value().clone()));
        }

        let path = self.record_path(company_id);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let settings: ModuleSettings = serde_json::from_str(&content).map_err(|e| {
            AppError::Storage(format!("Corrupt record {}: {}", path.display(), e))
        })?;
        self.cache.insert(company_id, settings.clone());
        Ok(Some(settings))
    }

    async fn save(&self, settings: &ModuleSettings) -> Result<()> {
        let path = self.record_path(settings.company_id);
        let seq = self.scratch_seq.fetch_add(1, Ordering::Relaxed);
        let tmp = path.with_extension(format!("json.{}.tmp", seq));
        let content = serde_json::to_string_pretty(settings)?;

        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &path).await?;

        self.cache.insert(settings.company_id, settings.clone());
        Ok(())
    }

    async fn delete(&self, company_id: CompanyId) -> Result<()> {
        self.cache.remove(&company_id);
        match tokio::fs::remove_file(self.record_path(company_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!("crm-console-{}-{}-{}", name, std::process::id(), nanos))
    }

    #[tokio::test]
    async fn test_in_memory_isolates_tenants() {
        let repo = InMemoryModuleSettingsRepository::new();
        let mut settings = ModuleSettings::defaults(1);
        settings.client_menus.set("module_invoices", false);
        repo.save(&settings).await.unwrap();

        assert_eq!(repo.load(1).await.unwrap(), Some(settings));
        assert_eq!(repo.load(2).await.unwrap(), None);

        repo.delete(1).await.unwrap();
        assert_eq!(repo.load(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_file_survives_reopen() {
        let dir = scratch_dir("reopen");
        let mut settings = ModuleSettings::defaults(7);
        settings.employee_menus.set("module_shifts", false);

        let repo = JsonFileModuleSettingsRepository::open(&dir).await.unwrap();
        repo.save(&settings).await.unwrap();
        drop(repo);

        let reopened = JsonFileModuleSettingsRepository::open(&dir).await.unwrap();
        let loaded = reopened.load(7).await.unwrap().unwrap();
        assert!(!loaded.employee_menus.is_enabled("module_shifts"));
        assert_eq!(reopened.load(8).await.unwrap(), None);

        reopened.delete(7).await.unwrap();
        reopened.delete(7).await.unwrap();
        assert_eq!(reopened.load(7).await.unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_json_file_overlapping_saves_of_one_tenant() {
        let dir = scratch_dir("overlap");
        let repo = JsonFileModuleSettingsRepository::open(&dir).await.unwrap();
        let mut first = ModuleSettings::defaults(4);
        first.client_menus.set("module_tasks", false);
        let mut second = ModuleSettings::defaults(4);
        second.client_menus.set("module_tickets", false);

        let (a, b) = tokio::join!(repo.save(&first), repo.save(&second));
        a.unwrap();
        b.unwrap();

        let content = std::fs::read_to_string(dir.join("company-4.json")).unwrap();
        let on_disk: ModuleSettings = serde_json::from_str(&content).unwrap();
        assert!(on_disk == first || on_disk == second);
        let leftovers = std::fs::read_dir(&dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_json_file_reports_corrupt_record() {
        let dir = scratch_dir("corrupt");
        let repo = JsonFileModuleSettingsRepository::open(&dir).await.unwrap();
        std::fs::write(dir.join("company-3.json"), "{ not json").unwrap();

        let err = repo.load(3).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
