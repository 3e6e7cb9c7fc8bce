//! sqlite-adapter: SQLite implementation of the JobRepository port.
//!
//! Purpose
//! - Provide a file-based store whose postings outlive the process.
//! - Implements the `JobRepository` trait from the `domain` crate.
//!
//! Notes
//! - Uses `rusqlite` with the `bundled` feature for portability.
//! - Rows are keyed by a surrogate `row_id`; `post_id` is indexed but not
//!   unique, so id-based operations act on the oldest matching row.
//! - `update` on an unknown id inserts a new row (upsert), unlike the
//!   in-memory store which ignores it.
//! - Tech stacks live in a child table ordered by position.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use domain::{CoreError, JobPost, JobRepository, PostId};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

const SELECT_POSTS: &str =
    "SELECT row_id, post_id, post_profile, post_desc, req_experience FROM job_posts";

/// SQLite-backed job store.
pub struct SqliteJobRepo {
    conn: Mutex<Connection>,
}

impl SqliteJobRepo {
    /// Open (or create) a SQLite database at the given path and ensure schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(map_sqerr)?;
        Self::with_connection(conn)
    }

    /// Private in-process database, gone when dropped.
    pub fn in_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(map_sqerr)?;
        Self::with_connection(conn)
    }

    /// Open the database at `path`, creating its parent directory if needed.
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    CoreError::Repository(format!("create dir {}: {e}", dir.display()))
                })?;
            }
        }
        Self::new(path)
    }

    fn with_connection(conn: Connection) -> Result<Self, CoreError> {
        init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, CoreError> {
        self.conn
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))
    }
}

fn init_schema(conn: &Connection) -> Result<(), CoreError> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS job_posts (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            post_id INTEGER NOT NULL,
            post_profile TEXT NOT NULL,
            post_desc TEXT NOT NULL,
            req_experience INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_job_posts_post_id ON job_posts(post_id);
        CREATE TABLE IF NOT EXISTS post_tech_stack (
            row_id INTEGER NOT NULL REFERENCES job_posts(row_id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            tech TEXT NOT NULL,
            PRIMARY KEY (row_id, position)
        );
        "#,
    )
    .map_err(map_sqerr)
}

fn map_sqerr<E: std::fmt::Display>(e: E) -> CoreError {
    CoreError::Repository(format!("sqlite error: {e}"))
}

fn first_row_id(conn: &Connection, id: PostId) -> Result<Option<i64>, CoreError> {
    conn.query_row(
        "SELECT row_id FROM job_posts WHERE post_id = ?1 ORDER BY row_id LIMIT 1",
        params![id],
        |row| row.get(0),
    )
    .optional()
    .map_err(map_sqerr)
}

fn load_tech_stack(conn: &Connection, row_id: i64) -> Result<Vec<String>, CoreError> {
    let mut stmt = conn
        .prepare("SELECT tech FROM post_tech_stack WHERE row_id = ?1 ORDER BY position")
        .map_err(map_sqerr)?;
    let mut rows = stmt.query(params![row_id]).map_err(map_sqerr)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(map_sqerr)? {
        out.push(row.get(0).map_err(map_sqerr)?);
    }
    Ok(out)
}

fn store_tech_stack(tx: &Transaction, row_id: i64, stack: &[String]) -> Result<(), CoreError> {
    let mut stmt = tx
        .prepare("INSERT INTO post_tech_stack(row_id, position, tech) VALUES (?1, ?2, ?3)")
        .map_err(map_sqerr)?;
    for (pos, tech) in stack.iter().enumerate() {
        stmt.execute(params![row_id, pos as i64, tech])
            .map_err(map_sqerr)?;
    }
    Ok(())
}

fn insert_post(tx: &Transaction, post: &JobPost) -> Result<(), CoreError> {
    tx.execute(
        "INSERT INTO job_posts(post_id, post_profile, post_desc, req_experience) VALUES (?1, ?2, ?3, ?4)",
        params![post.post_id, post.post_profile, post.post_desc, post.req_experience],
    )
    .map_err(map_sqerr)?;
    let row_id = tx.last_insert_rowid();
    store_tech_stack(tx, row_id, &post.post_tech_stack)
}

/// Run a `SELECT_POSTS`-shaped query and hydrate each row with its tech stack.
fn query_posts<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<JobPost>, CoreError> {
    let mut heads = Vec::new();
    {
        let mut stmt = conn.prepare(sql).map_err(map_sqerr)?;
        let mut rows = stmt.query(params).map_err(map_sqerr)?;
        while let Some(row) = rows.next().map_err(map_sqerr)? {
            let row_id: i64 = row.get(0).map_err(map_sqerr)?;
            let post = JobPost {
                post_id: row.get(1).map_err(map_sqerr)?,
                post_profile: row.get(2).map_err(map_sqerr)?,
                post_desc: row.get(3).map_err(map_sqerr)?,
                req_experience: row.get(4).map_err(map_sqerr)?,
                post_tech_stack: Vec::new(),
            };
            heads.push((row_id, post));
        }
    }
    let mut out = Vec::with_capacity(heads.len());
    for (row_id, mut post) in heads {
        post.post_tech_stack = load_tech_stack(conn, row_id)?;
        out.push(post);
    }
    Ok(out)
}

impl JobRepository for SqliteJobRepo {
    fn list(&self) -> Result<Vec<JobPost>, CoreError> {
        let conn = self.lock()?;
        query_posts(&conn, &format!("{SELECT_POSTS} ORDER BY row_id"), params![])
    }

    fn get(&self, id: PostId) -> Result<Option<JobPost>, CoreError> {
        let conn = self.lock()?;
        let mut found = query_posts(
            &conn,
            &format!("{SELECT_POSTS} WHERE post_id = ?1 ORDER BY row_id LIMIT 1"),
            params![id],
        )?;
        Ok(found.pop())
    }

    fn create(&self, post: JobPost) -> Result<(), CoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(map_sqerr)?;
        insert_post(&tx, &post)?;
        tx.commit().map_err(map_sqerr)
    }

    fn update(&self, post: &JobPost) -> Result<(), CoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(map_sqerr)?;
        match first_row_id(&tx, post.post_id)? {
            Some(row_id) => {
                tx.execute(
                    "UPDATE job_posts SET post_profile = ?1, post_desc = ?2, req_experience = ?3 WHERE row_id = ?4",
                    params![post.post_profile, post.post_desc, post.req_experience, row_id],
                )
                .map_err(map_sqerr)?;
                tx.execute(
                    "DELETE FROM post_tech_stack WHERE row_id = ?1",
                    params![row_id],
                )
                .map_err(map_sqerr)?;
                store_tech_stack(&tx, row_id, &post.post_tech_stack)?;
            }
            // Unknown id: save semantics, insert under the caller's id
            None => insert_post(&tx, post)?,
        }
        tx.commit().map_err(map_sqerr)
    }

    fn delete(&self, id: PostId) -> Result<(), CoreError> {
        let conn = self.lock()?;
        if let Some(row_id) = first_row_id(&conn, id)? {
            // Tech stack rows go with it via ON DELETE CASCADE
            conn.execute("DELETE FROM job_posts WHERE row_id = ?1", params![row_id])
                .map_err(map_sqerr)?;
        }
        Ok(())
    }

    fn search(&self, keyword: &str) -> Result<Vec<JobPost>, CoreError> {
        if keyword.is_empty() {
            return self.list();
        }
        let conn = self.lock()?;
        // instr() is case-sensitive, unlike LIKE for ASCII in SQLite
        query_posts(
            &conn,
            &format!(
                "{SELECT_POSTS} WHERE instr(post_profile, ?1) > 0 OR instr(post_desc, ?1) > 0 ORDER BY row_id"
            ),
            params![keyword],
        )
    }
}
