//! In-memory store for tests and offline mode

use super::{sort_newest_first, BlogStore, Comment, CommentRemoval, Post, PostPatch, StoreError, User};
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryStore {
    /// Keyed by email
    users: RwLock<HashMap<String, User>>,
    posts: RwLock<HashMap<ObjectId, Post>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Database(e.to_string())
}

#[async_trait]
impl BlogStore for InMemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(lock_error)?;
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail(user.email.clone()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(lock_error)?;
        Ok(users.get(email).cloned())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().map_err(lock_error)?;
        let mut all: Vec<Post> = posts.values().cloned().collect();
        sort_newest_first(&mut all);
        Ok(all)
    }

    async fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().map_err(lock_error)?;
        let mut matching: Vec<Post> = posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        Ok(matching)
    }

    async fn count_posts(&self) -> Result<u64, StoreError> {
        let posts = self.posts.read().map_err(lock_error)?;
        Ok(posts.len() as u64)
    }

    async fn get_post(&self, id: ObjectId) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.read().map_err(lock_error)?;
        Ok(posts.get(&id).cloned())
    }

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        let mut posts = self.posts.write().map_err(lock_error)?;
        posts.insert(post.id, post.clone());
        Ok(())
    }

    async fn update_post(&self, id: ObjectId, patch: &PostPatch) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().map_err(lock_error)?;
        Ok(posts.get_mut(&id).map(|post| {
            post.apply(patch);
            post.clone()
        }))
    }

    async fn delete_post(&self, id: ObjectId) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().map_err(lock_error)?;
        Ok(posts.remove(&id).is_some())
    }

    async fn increment_likes(&self, id: ObjectId) -> Result<Option<i64>, StoreError> {
        let mut posts = self.posts.write().map_err(lock_error)?;
        Ok(posts.get_mut(&id).map(|post| {
            post.likes += 1;
            post.likes
        }))
    }

    async fn push_comment(&self, post_id: ObjectId, comment: &Comment) -> Result<(), StoreError> {
        let mut posts = self.posts.write().map_err(lock_error)?;
        let post = posts
            .get_mut(&post_id)
            .ok_or(StoreError::PostNotFound(post_id))?;
        post.comments.push(comment.clone());
        Ok(())
    }

    async fn pull_comment(
        &self,
        post_id: ObjectId,
        comment_id: ObjectId,
    ) -> Result<CommentRemoval, StoreError> {
        let mut posts = self.posts.write().map_err(lock_error)?;
        let post = posts
            .get_mut(&post_id)
            .ok_or(StoreError::PostNotFound(post_id))?;

        let before = post.comments.len();
        post.comments.retain(|c| c.id != comment_id);

        if post.comments.len() < before {
            Ok(CommentRemoval::Removed)
        } else {
            Ok(CommentRemoval::Absent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PostFields;
    use chrono::{TimeZone, Utc};

    fn post_at(secs: i64, author: &str) -> Post {
        Post::new(
            ObjectId::new(),
            PostFields {
                title: format!("post at {}", secs),
                author_id: author.to_string(),
                ..Default::default()
            },
            Utc.timestamp_opt(secs, 0).unwrap(),
        )
    }

    fn comment(content: &str) -> Comment {
        Comment {
            id: ObjectId::new(),
            content: content.to_string(),
            author_id: "u1".to_string(),
            author_name: "Reader".to_string(),
            created_at: Utc::now(),
            is_spam: false,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryStore::new();
        let user = User {
            id: ObjectId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        };

        store.insert_user(&user).await.unwrap();
        let again = User {
            id: ObjectId::new(),
            ..user.clone()
        };
        let result = store.insert_user(&again).await;

        assert!(matches!(result, Err(StoreError::DuplicateEmail(email)) if email == "ada@example.com"));
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first() {
        let store = InMemoryStore::new();
        let older = post_at(1, "a");
        let newer = post_at(2, "b");
        store.insert_post(&older).await.unwrap();
        store.insert_post(&newer).await.unwrap();

        let ids: Vec<ObjectId> = store.list_posts().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_list_by_author() {
        let store = InMemoryStore::new();
        store.insert_post(&post_at(1, "a")).await.unwrap();
        store.insert_post(&post_at(2, "b")).await.unwrap();
        store.insert_post(&post_at(3, "a")).await.unwrap();

        let posts = store.list_posts_by_author("a").await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.author_id == "a"));
        assert!(posts[0].created_at > posts[1].created_at);
    }

    #[tokio::test]
    async fn test_increment_missing_post() {
        let store = InMemoryStore::new();
        assert_eq!(store.increment_likes(ObjectId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pull_comment_outcomes() {
        let store = InMemoryStore::new();
        let post = post_at(1, "a");
        store.insert_post(&post).await.unwrap();

        let keep = comment("first");
        let removed = comment("second");
        store.push_comment(post.id, &keep).await.unwrap();
        store.push_comment(post.id, &removed).await.unwrap();

        assert_eq!(
            store.pull_comment(post.id, removed.id).await.unwrap(),
            CommentRemoval::Removed
        );
        assert_eq!(
            store.pull_comment(post.id, removed.id).await.unwrap(),
            CommentRemoval::Absent
        );

        let stored = store.get_post(post.id).await.unwrap().unwrap();
        assert_eq!(stored.comments, vec![keep.clone()]);

        let missing = store.pull_comment(ObjectId::new(), keep.id).await;
        assert!(matches!(missing, Err(StoreError::PostNotFound(_))));
    }
}
