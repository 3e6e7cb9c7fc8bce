//! Lightweight input validation for postings. Only the strict error mode of
//! the server applies these checks.

use crate::{CoreError, JobPost};

/// Upper bound on the title length, in characters.
pub const MAX_PROFILE_LEN: usize = 200;

pub fn validate_job_post(post: &JobPost) -> Result<(), CoreError> {
    let profile = post.post_profile.trim();
    if profile.is_empty() {
        return Err(CoreError::InvalidPost("postProfile must not be empty".into()));
    }
    if profile.chars().count() > MAX_PROFILE_LEN {
        return Err(CoreError::InvalidPost("postProfile too long".into()));
    }
    if post.req_experience < 0 {
        return Err(CoreError::InvalidPost(
            "reqExperience must not be negative".into(),
        ));
    }
    if post.post_tech_stack.iter().any(|t| t.trim().is_empty()) {
        return Err(CoreError::InvalidPost(
            "postTechStack entries must not be empty".into(),
        ));
    }
    Ok(())
}
