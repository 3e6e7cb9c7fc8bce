//! Store selection: one `JobRepository` over the configured backend.

use domain::adapters::memory_repo::InMemoryJobRepo;
use domain::service::JobService;
use domain::{CoreError, JobPost, JobRepository, PostId};
#[cfg(feature = "sqlite")]
use tracing::info;

use crate::config::Config;

// Local repo abstraction supporting memory or sqlite (feature-gated).
enum RepoKind {
    Memory(InMemoryJobRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite_adapter::SqliteJobRepo),
}

pub struct AnyRepo {
    kind: RepoKind,
}

impl AnyRepo {
    /// In-memory store holding the five sample postings.
    pub fn memory_seeded() -> Self {
        Self {
            kind: RepoKind::Memory(InMemoryJobRepo::seeded()),
        }
    }

    #[cfg(feature = "sqlite")]
    pub fn sqlite(repo: sqlite_adapter::SqliteJobRepo) -> Self {
        Self {
            kind: RepoKind::Sqlite(repo),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.kind {
            RepoKind::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            RepoKind::Sqlite(_) => "sqlite",
        }
    }
}

impl JobRepository for AnyRepo {
    fn list(&self) -> Result<Vec<JobPost>, CoreError> {
        match &self.kind {
            RepoKind::Memory(r) => r.list(),
            #[cfg(feature = "sqlite")]
            RepoKind::Sqlite(r) => r.list(),
        }
    }

    fn get(&self, id: PostId) -> Result<Option<JobPost>, CoreError> {
        match &self.kind {
            RepoKind::Memory(r) => r.get(id),
            #[cfg(feature = "sqlite")]
            RepoKind::Sqlite(r) => r.get(id),
        }
    }

    fn create(&self, post: JobPost) -> Result<(), CoreError> {
        match &self.kind {
            RepoKind::Memory(r) => r.create(post),
            #[cfg(feature = "sqlite")]
            RepoKind::Sqlite(r) => r.create(post),
        }
    }

    fn update(&self, post: &JobPost) -> Result<(), CoreError> {
        match &self.kind {
            RepoKind::Memory(r) => r.update(post),
            #[cfg(feature = "sqlite")]
            RepoKind::Sqlite(r) => r.update(post),
        }
    }

    fn delete(&self, id: PostId) -> Result<(), CoreError> {
        match &self.kind {
            RepoKind::Memory(r) => r.delete(id),
            #[cfg(feature = "sqlite")]
            RepoKind::Sqlite(r) => r.delete(id),
        }
    }

    fn search(&self, keyword: &str) -> Result<Vec<JobPost>, CoreError> {
        match &self.kind {
            RepoKind::Memory(r) => r.search(keyword),
            #[cfg(feature = "sqlite")]
            RepoKind::Sqlite(r) => r.search(keyword),
        }
    }
}

/// Construct the job service for the configured storage provider.
pub fn build_service(cfg: &Config) -> Result<JobService<AnyRepo>, CoreError> {
    match cfg.storage_provider {
        #[cfg(feature = "sqlite")]
        crate::config::StorageProvider::Sqlite => {
            let repo = sqlite_adapter::SqliteJobRepo::open_file(&cfg.db_path)?;
            let svc = JobService::new(AnyRepo::sqlite(repo));
            if cfg.seed_on_start && svc.list()?.is_empty() {
                let loaded = svc.load()?;
                info!(count = loaded, db_path = %cfg.db_path.display(), "seeded empty sqlite store");
            }
            Ok(svc)
        }
        // Config rejects sqlite when the feature is off
        _ => Ok(JobService::new(AnyRepo::memory_seeded())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_is_seeded() {
        let repo = AnyRepo::memory_seeded();
        assert_eq!(repo.backend_name(), "memory");
        assert_eq!(repo.list().unwrap().len(), 5);
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn sqlite_backend_seeds_once_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("jobs.db");
        let cfg = Config::from_lookup(|k| match k {
            "STORAGE_PROVIDER" => Some("sqlite".into()),
            "SEED_ON_START" => Some("1".into()),
            "DB_PATH" => Some(db.display().to_string()),
            _ => None,
        })
        .unwrap();

        let svc = build_service(&cfg).unwrap();
        assert_eq!(svc.list().unwrap().len(), 5);
        drop(svc);

        // Reopening a non-empty store does not seed again
        let svc = build_service(&cfg).unwrap();
        assert_eq!(svc.list().unwrap().len(), 5);
    }
}
