use crate::seed::sample_posts;
use crate::{CoreError, JobPost, JobRepository, PostId};

/// Application service sitting between the HTTP layer and a store.
///
/// It forwards every call unchanged and owns the one piece of behavior the
/// store does not: loading the sample postings on demand.
pub struct JobService<R: JobRepository> {
    repo: R,
}

impl<R: JobRepository> JobService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The underlying store, for diagnostics.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn list(&self) -> Result<Vec<JobPost>, CoreError> {
        self.repo.list()
    }

    pub fn get(&self, id: PostId) -> Result<Option<JobPost>, CoreError> {
        self.repo.get(id)
    }

    pub fn create(&self, post: JobPost) -> Result<(), CoreError> {
        self.repo.create(post)
    }

    pub fn update(&self, post: &JobPost) -> Result<(), CoreError> {
        self.repo.update(post)
    }

    pub fn delete(&self, id: PostId) -> Result<(), CoreError> {
        self.repo.delete(id)
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<JobPost>, CoreError> {
        self.repo.search(keyword)
    }

    /// Append the sample postings. Not idempotent: every call adds another
    /// copy, since the store does not reject duplicate ids.
    pub fn load(&self) -> Result<usize, CoreError> {
        let posts = sample_posts();
        let count = posts.len();
        for post in posts {
            self.repo.create(post)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_repo::InMemoryJobRepo;

    #[test]
    fn create_then_get_returns_same_record() {
        let svc = JobService::new(InMemoryJobRepo::seeded());
        let post = JobPost::new(6, "DevOps Engineer", "...", 3, ["Docker", "Kubernetes"]);
        svc.create(post.clone()).unwrap();
        assert_eq!(svc.get(6).unwrap(), Some(post));
        assert_eq!(svc.list().unwrap().len(), 6);
    }

    #[test]
    fn delete_then_get_is_none() {
        let svc = JobService::new(InMemoryJobRepo::seeded());
        svc.delete(2).unwrap();
        assert_eq!(svc.get(2).unwrap(), None);
        assert_eq!(svc.list().unwrap().len(), 4);
    }

    #[test]
    fn load_twice_doubles_rows() {
        let svc = JobService::new(InMemoryJobRepo::new());
        assert_eq!(svc.load().unwrap(), 5);
        assert_eq!(svc.load().unwrap(), 5);
        assert_eq!(svc.list().unwrap().len(), 10);
    }

    #[test]
    fn search_delegates() {
        let svc = JobService::new(InMemoryJobRepo::seeded());
        let hits = svc.search("React").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].post_id, 2);
    }
}
