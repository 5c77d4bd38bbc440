//! Post store
//!
//! Keeps every post in one JSON document inside the data directory. Saving runs
//! the post's save hook and checks the field length limits before anything is
//! written. Posts handed out by the store are fresh instances, so their rendered
//! content is computed again on first access.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_EXCERPT_LENGTH, EXCERPT_MAX_LENGTH};
use crate::content::{ContentRenderer, Post, NAME_MAX_LENGTH, TITLE_MAX_LENGTH};
use crate::error::{Error, Result};

/// Store file name inside the data directory
const STORE_FILE: &str = "posts.json";

/// On-disk layout of the store
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDb {
    version: u32,
    next_id: u64,
    posts: IndexMap<u64, Post>,
}

impl StoreDb {
    /// Current store format version
    const VERSION: u32 = 1;

    fn new() -> Self {
        Self {
            version: Self::VERSION,
            next_id: 1,
            posts: IndexMap::new(),
        }
    }
}

/// JSON-file backed post storage
#[derive(Debug)]
pub struct PostStore {
    path: PathBuf,
    db: StoreDb,
    excerpt_length: usize,
}

impl PostStore {
    /// Open the store in `data_dir`, or start an empty one
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(STORE_FILE);
        let db = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let db: StoreDb = serde_json::from_str(&content)?;
            if db.version != StoreDb::VERSION {
                return Err(Error::StoreVersion {
                    found: db.version,
                    expected: StoreDb::VERSION,
                });
            }
            tracing::debug!("Loaded {} posts from {:?}", db.posts.len(), path);
            db
        } else {
            StoreDb::new()
        };

        Ok(Self {
            path,
            db,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
        })
    }

    /// Length of excerpts generated on save
    pub fn with_excerpt_length(mut self, excerpt_length: usize) -> Self {
        self.excerpt_length = excerpt_length;
        self
    }

    /// Save a post, assigning an id on its first save
    ///
    /// The save hook and the field checks run on a copy. Only once the store is
    /// written are the id, `modified_time` and a generated excerpt copied back to
    /// `post`; a failed save leaves both `post` and the store as they were.
    pub fn save<R: ContentRenderer + ?Sized>(
        &mut self,
        post: &mut Post,
        renderer: &R,
    ) -> Result<u64> {
        if post.id != 0 && !self.db.posts.contains_key(&post.id) {
            return Err(Error::NotFound(post.id));
        }

        let mut staged = post.clone();
        staged.before_save(renderer, self.excerpt_length);
        validate(&staged)?;

        let next_id = self.db.next_id;
        if staged.id == 0 {
            staged.id = next_id;
            self.db.next_id += 1;
        }
        let id = staged.id;
        let previous = self.db.posts.insert(id, staged.clone());

        if let Err(e) = self.flush() {
            self.db.next_id = next_id;
            match previous {
                Some(previous) => {
                    self.db.posts.insert(id, previous);
                }
                None => {
                    self.db.posts.shift_remove(&id);
                }
            }
            return Err(e);
        }

        post.id = id;
        post.modified_time = staged.modified_time;
        post.excerpt = staged.excerpt;
        tracing::info!("Saved post {} ({})", post.id, post.title);
        Ok(id)
    }

    /// Load a post
    pub fn get(&self, id: u64) -> Result<Post> {
        self.db.posts.get(&id).cloned().ok_or(Error::NotFound(id))
    }

    /// All posts, newest first
    pub fn list(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.db.posts.values().cloned().collect();
        posts.sort_by(|a, b| b.created_time.cmp(&a.created_time));
        posts
    }

    /// Count a view and persist only the counter
    pub fn increase_views(&mut self, id: u64) -> Result<u64> {
        let post = self.db.posts.get_mut(&id).ok_or(Error::NotFound(id))?;
        post.increase_views();
        let views = post.views;

        if let Err(e) = self.flush() {
            if let Some(post) = self.db.posts.get_mut(&id) {
                post.views -= 1;
            }
            return Err(e);
        }
        Ok(views)
    }

    pub fn len(&self) -> usize {
        self.db.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.db.posts.is_empty()
    }

    /// Write the store to disk
    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(&self.db)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Check required fields and length limits
fn validate(post: &Post) -> Result<()> {
    if post.title.trim().is_empty() {
        return Err(Error::FieldRequired { field: "title" });
    }
    if post.author.trim().is_empty() {
        return Err(Error::FieldRequired { field: "author" });
    }
    if post.category.name.trim().is_empty() {
        return Err(Error::FieldRequired { field: "category" });
    }

    check_length("title", &post.title, TITLE_MAX_LENGTH)?;
    check_length("excerpt", &post.excerpt, EXCERPT_MAX_LENGTH)?;
    check_length("category", &post.category.name, NAME_MAX_LENGTH)?;
    for tag in &post.tags {
        check_length("tag", &tag.name, NAME_MAX_LENGTH)?;
    }
    Ok(())
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(Error::FieldTooLong { field, max, len });
    }
    Ok(())
}
