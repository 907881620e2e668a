//! Document storage for users and posts
//!
//! `BlogStore` is the boundary to the document database. Every method maps to a
//! single-document operation so atomicity comes from the store itself.

pub mod memory;
pub mod models;
pub mod mongo;

pub use memory::InMemoryStore;
pub use models::{Comment, CommentRemoval, Post, PostFields, PostPatch, User};
pub use mongo::MongoStore;

use async_trait::async_trait;
use bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Post not found: {0}")]
    PostNotFound(ObjectId),
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Insert a user; fails with `DuplicateEmail` when the email is taken
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// All posts, newest first
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Posts whose `authorId` matches, newest first
    async fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, StoreError>;

    async fn count_posts(&self) -> Result<u64, StoreError>;

    async fn get_post(&self, id: ObjectId) -> Result<Option<Post>, StoreError>;

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError>;

    /// Merge the patch and return the stored post afterwards
    async fn update_post(&self, id: ObjectId, patch: &PostPatch) -> Result<Option<Post>, StoreError>;

    /// Returns false when nothing was deleted
    async fn delete_post(&self, id: ObjectId) -> Result<bool, StoreError>;

    /// Atomic increment-and-fetch of the like counter
    async fn increment_likes(&self, id: ObjectId) -> Result<Option<i64>, StoreError>;

    /// Append to the post's comment sequence; fails with `PostNotFound`
    async fn push_comment(&self, post_id: ObjectId, comment: &Comment) -> Result<(), StoreError>;

    /// Remove the comment with `comment_id`; fails with `PostNotFound`
    async fn pull_comment(
        &self,
        post_id: ObjectId,
        comment_id: ObjectId,
    ) -> Result<CommentRemoval, StoreError>;
}

/// Newest first; ties fall back to identifier order, which follows insertion
pub(crate) fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}
