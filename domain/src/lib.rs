//! Domain library for the job board.
//!
//! This crate only depends on `serde` (inherits workspace metadata otherwise)
//! and holds the domain types, ports (traits), and error definitions. Keep
//! adapters and IO concerns out of this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a posting. Supplied by the caller, never generated.
pub type PostId = i32;

/// A single job posting.
///
/// Serialized in camelCase to match the public JSON shape. Missing or `null`
/// fields deserialize to their defaults, so a partial body replaces omitted
/// values with `0`, `""` or `[]`. Numeric fields also accept numeric strings
/// (`"5"`), which is what HTML form inputs submit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPost {
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub post_id: PostId,
    #[serde(deserialize_with = "null_as_default")]
    pub post_profile: String,
    #[serde(deserialize_with = "null_as_default")]
    pub post_desc: String,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub req_experience: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub post_tech_stack: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn int_or_numeric_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i32),
        Text(String),
    }

    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(0),
        Some(IntOrString::Int(n)) => Ok(n),
        Some(IntOrString::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed.parse::<i32>().map_err(|_| {
                serde::de::Error::custom(format!("expected an integer, got \"{}\"", raw))
            })
        }
    }
}

impl JobPost {
    pub fn new<P, D, I, S>(
        post_id: PostId,
        post_profile: P,
        post_desc: D,
        req_experience: i32,
        post_tech_stack: I,
    ) -> Self
    where
        P: Into<String>,
        D: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            post_id,
            post_profile: post_profile.into(),
            post_desc: post_desc.into(),
            req_experience,
            post_tech_stack: post_tech_stack.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the title or the description contains `keyword`
    /// (case-sensitive). An empty keyword matches every posting.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.post_profile.contains(keyword) || self.post_desc.contains(keyword)
    }
}

/// Repository port for storing and querying job postings.
///
/// Lookups and mutations act on the first posting with a matching id.
/// A missing id is not an error: `get` yields `None`, `update` and `delete`
/// are allowed to do nothing.
pub trait JobRepository: Send + Sync {
    /// All postings in insertion order.
    fn list(&self) -> Result<Vec<JobPost>, CoreError>;
    fn get(&self, id: PostId) -> Result<Option<JobPost>, CoreError>;
    /// Append a posting. No uniqueness check on `post_id`.
    fn create(&self, post: JobPost) -> Result<(), CoreError>;
    /// Replace the first posting with the same id wholesale.
    fn update(&self, post: &JobPost) -> Result<(), CoreError>;
    fn delete(&self, id: PostId) -> Result<(), CoreError>;
    /// Postings whose title or description contains `keyword`.
    fn search(&self, keyword: &str) -> Result<Vec<JobPost>, CoreError>;
}

/// Core domain errors (no external error crates to keep deps minimal).
#[derive(Debug)]
pub enum CoreError {
    InvalidPost(String),
    NotFound,
    Repository(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::InvalidPost(msg) => write!(f, "invalid job post: {}", msg),
            CoreError::NotFound => write!(f, "not found"),
            CoreError::Repository(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

impl Error for CoreError {}

/// Return a short about/version line for the binary to print.
pub fn about() -> String {
    let pkg = env!("CARGO_PKG_NAME");
    let ver = env!("CARGO_PKG_VERSION");
    format!("{} v{} - job board domain library", pkg, ver)
}

pub mod adapters;
pub mod seed;
pub mod service;
pub mod validate;
