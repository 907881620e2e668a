use super::{password, Clock, Result, ServiceError, SystemClock};
use crate::moderation::CommentClassifier;
use crate::storage::{BlogStore, Comment, CommentRemoval, Post, PostFields, PostPatch, User};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Comment fields supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct NewComment {
    pub content: String,
    pub author_id: String,
    pub author_name: String,
}

/// Blog operations over a `BlogStore`
pub struct BlogService {
    store: Arc<dyn BlogStore>,
    classifier: CommentClassifier,
    clock: Arc<dyn Clock>,
}

impl BlogService {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn BlogStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            classifier: CommentClassifier::new(),
            clock,
        }
    }

    /// Register a user. The store enforces email uniqueness on insert.
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let user = User {
            id: ObjectId::new(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password::hash_password(password)?,
            created_at: self.clock.now(),
        };

        self.store.insert_user(&user).await?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let Some(user) = self.store.find_user_by_email(email).await? else {
            warn!("Login failed: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !password::verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.store.list_posts().await?)
    }

    pub async fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<Post>> {
        Ok(self.store.list_posts_by_author(author_id).await?)
    }

    pub async fn count_posts(&self) -> Result<u64> {
        Ok(self.store.count_posts().await?)
    }

    pub async fn get_post(&self, id: ObjectId) -> Result<Post> {
        self.store.get_post(id).await?.ok_or_else(post_not_found)
    }

    pub async fn create_post(&self, fields: PostFields) -> Result<Post> {
        let post = Post::new(ObjectId::new(), fields, self.clock.now());
        self.store.insert_post(&post).await?;

        info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(post)
    }

    pub async fn update_post(&self, id: ObjectId, patch: &PostPatch) -> Result<Post> {
        let post = self
            .store
            .update_post(id, patch)
            .await?
            .ok_or_else(post_not_found)?;

        info!(post_id = %id, "Post updated");
        Ok(post)
    }

    pub async fn delete_post(&self, id: ObjectId) -> Result<()> {
        if !self.store.delete_post(id).await? {
            return Err(post_not_found());
        }

        info!(post_id = %id, "Post deleted");
        Ok(())
    }

    pub async fn like_post(&self, id: ObjectId) -> Result<i64> {
        self.store
            .increment_likes(id)
            .await?
            .ok_or_else(post_not_found)
    }

    /// Classify, then append. The spam flag is never recomputed afterwards.
    pub async fn add_comment(&self, post_id: ObjectId, new: NewComment) -> Result<Comment> {
        let verdict = self.classifier.check(&new.content);

        let comment = Comment {
            id: ObjectId::new(),
            content: new.content,
            author_id: new.author_id,
            author_name: new.author_name,
            created_at: self.clock.now(),
            is_spam: verdict.is_spam(),
        };

        self.store.push_comment(post_id, &comment).await?;

        if comment.is_spam {
            warn!(
                post_id = %post_id,
                comment_id = %comment.id,
                signals = ?verdict.signals,
                "Comment flagged as spam"
            );
        } else {
            info!(post_id = %post_id, comment_id = %comment.id, "Comment added");
        }

        Ok(comment)
    }

    /// Missing post is an error; a missing comment is a no-op
    pub async fn delete_comment(&self, post_id: ObjectId, comment_id: ObjectId) -> Result<CommentRemoval> {
        let removal = self.store.pull_comment(post_id, comment_id).await?;

        match removal {
            CommentRemoval::Removed => {
                info!(post_id = %post_id, comment_id = %comment_id, "Comment deleted")
            }
            CommentRemoval::Absent => {
                debug!(post_id = %post_id, comment_id = %comment_id, "Comment already absent")
            }
        }

        Ok(removal)
    }
}

fn post_not_found() -> ServiceError {
    ServiceError::NotFound("Post not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    /// Hands out queued timestamps in order
    struct ScriptedClock {
        times: Mutex<Vec<DateTime<Utc>>>,
    }

    impl ScriptedClock {
        fn new(secs: &[i64]) -> Self {
            let mut times: Vec<DateTime<Utc>> =
                secs.iter().map(|s| Utc.timestamp_opt(*s, 0).unwrap()).collect();
            times.reverse();
            Self {
                times: Mutex::new(times),
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&self) -> DateTime<Utc> {
            self.times.lock().unwrap().pop().expect("clock ran out of timestamps")
        }
    }

    fn service() -> BlogService {
        BlogService::new(Arc::new(InMemoryStore::new()))
    }

    fn fields(title: &str) -> PostFields {
        PostFields {
            title: title.to_string(),
            content: "Some content".to_string(),
            excerpt: "Some".to_string(),
            cover_image: "https://img.example/cover.png".to_string(),
            author_id: "author-1".to_string(),
            author_name: "Ada".to_string(),
            tags: vec!["rust".to_string(), "web".to_string()],
        }
    }

    fn comment(content: &str) -> NewComment {
        NewComment {
            content: content.to_string(),
            author_id: "reader-1".to_string(),
            author_name: "Reader".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_twice_conflicts() {
        let service = service();

        let user = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_ne!(user.password_hash, "pw");

        let second = service.create_user("Other", "ada@example.com", "pw2").await;
        assert!(matches!(second, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = service();
        let created = service.create_user("Ada", "ada@example.com", "pw").await.unwrap();

        let user = service.authenticate("ada@example.com", "pw").await.unwrap();
        assert_eq!(user.id, created.id);

        assert!(matches!(
            service.authenticate("ada@example.com", "nope").await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate("nobody@example.com", "pw").await,
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_plaintext_record_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let legacy: User = bson::from_document(bson::doc! {
            "_id": ObjectId::new(),
            "name": "Old",
            "email": "old@example.com",
            "password": "pw",
            "created_at": bson::DateTime::now(),
        })
        .unwrap();
        store.insert_user(&legacy).await.unwrap();
        let service = BlogService::new(store);

        let err = service.authenticate("old@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let input = fields("Hello");

        let created = service.create_post(input.clone()).await.unwrap();
        let fetched = service.get_post(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, input.title);
        assert_eq!(fetched.content, input.content);
        assert_eq!(fetched.excerpt, input.excerpt);
        assert_eq!(fetched.cover_image, input.cover_image);
        assert_eq!(fetched.author_id, input.author_id);
        assert_eq!(fetched.author_name, input.author_name);
        assert_eq!(fetched.tags, input.tags);
        assert_eq!(fetched.likes, 0);
        assert!(fetched.comments.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let result = service().get_post(ObjectId::new()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_like_twice() {
        let service = service();
        let post = service.create_post(fields("Likes")).await.unwrap();

        assert_eq!(service.like_post(post.id).await.unwrap(), 1);
        assert_eq!(service.like_post(post.id).await.unwrap(), 2);
        assert_eq!(service.get_post(post.id).await.unwrap().likes, 2);
    }

    #[tokio::test]
    async fn test_like_missing_post() {
        let result = service().like_post(ObjectId::new()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = Arc::new(InMemoryStore::new());
        let service = BlogService::with_clock(store, Arc::new(ScriptedClock::new(&[1, 2])));

        let p1 = service.create_post(fields("P1")).await.unwrap();
        let p2 = service.create_post(fields("P2")).await.unwrap();

        let ids: Vec<ObjectId> = service.list_posts().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p2.id, p1.id]);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let service = service();
        let post = service.create_post(fields("Before")).await.unwrap();

        let updated = service
            .update_post(
                post.id,
                &PostPatch {
                    title: Some("After".to_string()),
                    tags: Some(vec!["edited".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title, "After");
        assert_eq!(updated.tags, vec!["edited".to_string()]);
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_post() {
        let service = service();
        let id = ObjectId::new();

        assert!(matches!(
            service.update_post(id, &PostPatch::default()).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(service.delete_post(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_post() {
        let service = service();
        let post = service.create_post(fields("Doomed")).await.unwrap();

        service.delete_post(post.id).await.unwrap();
        assert!(matches!(service.get_post(post.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_comment_is_classified_once() {
        let service = service();
        let post = service.create_post(fields("Comments")).await.unwrap();

        let clean = service.add_comment(post.id, comment("Nice read")).await.unwrap();
        let spam = service
            .add_comment(post.id, comment("Win at the casino, click here"))
            .await
            .unwrap();

        assert!(!clean.is_spam);
        assert!(spam.is_spam);

        let stored = service.get_post(post.id).await.unwrap();
        assert_eq!(stored.comments, vec![clean, spam]);
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let result = service().add_comment(ObjectId::new(), comment("hi")).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_then_delete_comment() {
        let service = service();
        let post = service.create_post(fields("Thread")).await.unwrap();

        let first = service.add_comment(post.id, comment("first")).await.unwrap();
        let second = service.add_comment(post.id, comment("second")).await.unwrap();
        let third = service.add_comment(post.id, comment("third")).await.unwrap();

        let removal = service.delete_comment(post.id, second.id).await.unwrap();
        assert_eq!(removal, CommentRemoval::Removed);

        let stored = service.get_post(post.id).await.unwrap();
        assert_eq!(stored.comments, vec![first, third]);
    }

    #[tokio::test]
    async fn test_delete_comment_outcomes() {
        let service = service();
        let post = service.create_post(fields("Thread")).await.unwrap();

        let absent = service.delete_comment(post.id, ObjectId::new()).await.unwrap();
        assert_eq!(absent, CommentRemoval::Absent);

        let missing_post = service.delete_comment(ObjectId::new(), ObjectId::new()).await;
        assert!(matches!(missing_post, Err(ServiceError::NotFound(_))));
    }
}
