use std::sync::{Mutex, MutexGuard};

use crate::seed::sample_posts;
use crate::{CoreError, JobPost, JobRepository, PostId};

/// Process-local store keeping postings in insertion order.
///
/// All access goes through the internal mutex; the vector itself is never
/// handed out. Duplicate ids may coexist, every id-based operation acts on
/// the first match.
pub struct InMemoryJobRepo {
    inner: Mutex<Vec<JobPost>>,
}

impl InMemoryJobRepo {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Store pre-populated with the five sample postings.
    pub fn seeded() -> Self {
        Self {
            inner: Mutex::new(sample_posts()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<JobPost>>, CoreError> {
        self.inner
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))
    }
}

impl Default for InMemoryJobRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRepository for InMemoryJobRepo {
    fn list(&self) -> Result<Vec<JobPost>, CoreError> {
        Ok(self.lock()?.clone())
    }

    fn get(&self, id: PostId) -> Result<Option<JobPost>, CoreError> {
        let posts = self.lock()?;
        Ok(posts.iter().find(|p| p.post_id == id).cloned())
    }

    fn create(&self, post: JobPost) -> Result<(), CoreError> {
        self.lock()?.push(post);
        Ok(())
    }

    fn update(&self, post: &JobPost) -> Result<(), CoreError> {
        let mut posts = self.lock()?;
        if let Some(slot) = posts.iter_mut().find(|p| p.post_id == post.post_id) {
            *slot = post.clone();
        }
        Ok(())
    }

    fn delete(&self, id: PostId) -> Result<(), CoreError> {
        let mut posts = self.lock()?;
        if let Some(idx) = posts.iter().position(|p| p.post_id == id) {
            posts.remove(idx);
        }
        Ok(())
    }

    fn search(&self, keyword: &str) -> Result<Vec<JobPost>, CoreError> {
        let posts = self.lock()?;
        Ok(posts
            .iter()
            .filter(|p| p.matches_keyword(keyword))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_post(id: PostId, profile: &str) -> JobPost {
        JobPost::new(id, profile, "desc", 1, ["Rust"])
    }

    #[test]
    fn create_get_roundtrip() {
        let repo = InMemoryJobRepo::new();
        let post = JobPost::new(6, "DevOps Engineer", "Ship it", 3, ["Docker", "Kubernetes"]);
        repo.create(post.clone()).unwrap();
        assert_eq!(repo.get(6).unwrap(), Some(post));
    }

    #[test]
    fn get_missing_is_none() {
        let repo = InMemoryJobRepo::seeded();
        assert_eq!(repo.get(99).unwrap(), None);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let repo = InMemoryJobRepo::new();
        for id in [3, 1, 2] {
            repo.create(mk_post(id, "p")).unwrap();
        }
        let ids: Vec<_> = repo.list().unwrap().iter().map(|p| p.post_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn duplicates_coexist_and_get_returns_first() {
        let repo = InMemoryJobRepo::new();
        repo.create(mk_post(1, "first")).unwrap();
        repo.create(mk_post(1, "second")).unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
        assert_eq!(repo.get(1).unwrap().unwrap().post_profile, "first");
    }

    #[test]
    fn update_replaces_in_place() {
        let repo = InMemoryJobRepo::seeded();
        let replacement = JobPost {
            post_id: 2,
            post_profile: "UI Engineer".into(),
            ..JobPost::default()
        };
        repo.update(&replacement).unwrap();

        let posts = repo.list().unwrap();
        assert_eq!(posts[1], replacement);
        assert_eq!(posts[1].post_desc, "");
        assert!(posts[1].post_tech_stack.is_empty());
    }

    #[test]
    fn update_missing_is_noop() {
        let repo = InMemoryJobRepo::seeded();
        repo.update(&mk_post(42, "ghost")).unwrap();
        assert_eq!(repo.list().unwrap().len(), 5);
        assert_eq!(repo.get(42).unwrap(), None);
    }

    #[test]
    fn delete_removes_first_match_only() {
        let repo = InMemoryJobRepo::new();
        repo.create(mk_post(1, "first")).unwrap();
        repo.create(mk_post(1, "second")).unwrap();
        repo.delete(1).unwrap();
        assert_eq!(repo.get(1).unwrap().unwrap().post_profile, "second");
    }

    #[test]
    fn delete_missing_keeps_size() {
        let repo = InMemoryJobRepo::seeded();
        repo.delete(99).unwrap();
        assert_eq!(repo.list().unwrap().len(), 5);
    }

    #[test]
    fn search_matches_title_or_description() {
        let repo = InMemoryJobRepo::seeded();
        let ids: Vec<_> = repo
            .search("Java")
            .unwrap()
            .iter()
            .map(|p| p.post_id)
            .collect();
        assert_eq!(ids, vec![1]);

        let ids: Vec<_> = repo
            .search("data")
            .unwrap()
            .iter()
            .map(|p| p.post_id)
            .collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn search_is_case_sensitive_and_empty_matches_all() {
        let repo = InMemoryJobRepo::seeded();
        assert!(repo.search("java developer").unwrap().is_empty());
        assert_eq!(repo.search("").unwrap().len(), 5);
    }

    #[test]
    fn concurrent_creates_are_all_kept() {
        let repo = InMemoryJobRepo::seeded();
        std::thread::scope(|scope| {
            for t in 0..8 {
                let repo = &repo;
                scope.spawn(move || {
                    for i in 0..50 {
                        repo.create(mk_post(100 + t * 50 + i, "Worker")).unwrap();
                        repo.get(1).unwrap();
                    }
                });
            }
        });

        let posts = repo.list().unwrap();
        assert_eq!(posts.len(), 5 + 8 * 50);
        let mut ids: Vec<_> = posts[5..].iter().map(|p| p.post_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (100..500).collect::<Vec<_>>());
    }
}
