use super::{BlogStore, Comment, CommentRemoval, Post, PostPatch, StoreError, User};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};
use tracing::info;

const USERS: &str = "users";
const POSTS: &str = "posts";
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB-backed store. Comments live inside post documents.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect and make sure the unique email index exists
    pub async fn connect(uri: &str, fallback_database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await.map_err(database_error)?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(fallback_database));

        info!(database = %db.name(), "Connected to MongoDB");

        let store = Self { db };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique_email = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.users()
            .create_index(unique_email)
            .await
            .map_err(database_error)?;

        info!("Ensured unique index on users.email");
        Ok(())
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS)
    }

    fn posts(&self) -> Collection<Post> {
        self.db.collection(POSTS)
    }

    async fn find_posts(&self, filter: bson::Document) -> Result<Vec<Post>, StoreError> {
        let cursor = self
            .posts()
            .find(filter)
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(database_error)?;

        cursor.try_collect().await.map_err(database_error)
    }
}

fn database_error(e: mongodb::error::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl BlogStore for MongoStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        match self.users().insert_one(user).await {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(StoreError::DuplicateEmail(user.email.clone())),
            Err(e) => Err(database_error(e)),
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.users()
            .find_one(doc! { "email": email })
            .await
            .map_err(database_error)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.find_posts(doc! {}).await
    }

    async fn list_posts_by_author(&self, author_id: &str) -> Result<Vec<Post>, StoreError> {
        self.find_posts(doc! { "authorId": author_id }).await
    }

    async fn count_posts(&self) -> Result<u64, StoreError> {
        self.posts()
            .count_documents(doc! {})
            .await
            .map_err(database_error)
    }

    async fn get_post(&self, id: ObjectId) -> Result<Option<Post>, StoreError> {
        self.posts()
            .find_one(doc! { "_id": id })
            .await
            .map_err(database_error)
    }

    async fn insert_post(&self, post: &Post) -> Result<(), StoreError> {
        self.posts()
            .insert_one(post)
            .await
            .map_err(database_error)?;
        Ok(())
    }

    async fn update_post(&self, id: ObjectId, patch: &PostPatch) -> Result<Option<Post>, StoreError> {
        // `$set` with an empty document is rejected by the server
        if patch.is_empty() {
            return self.get_post(id).await;
        }

        self.posts()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": patch.to_set_document() })
            .return_document(ReturnDocument::After)
            .await
            .map_err(database_error)
    }

    async fn delete_post(&self, id: ObjectId) -> Result<bool, StoreError> {
        let result = self
            .posts()
            .delete_one(doc! { "_id": id })
            .await
            .map_err(database_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn increment_likes(&self, id: ObjectId) -> Result<Option<i64>, StoreError> {
        let updated = self
            .posts()
            .find_one_and_update(doc! { "_id": id }, doc! { "$inc": { "likes": 1_i64 } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(database_error)?;
        Ok(updated.map(|post| post.likes))
    }

    async fn push_comment(&self, post_id: ObjectId, comment: &Comment) -> Result<(), StoreError> {
        let comment = bson::to_bson(comment).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let result = self
            .posts()
            .update_one(doc! { "_id": post_id }, doc! { "$push": { "comments": comment } })
            .await
            .map_err(database_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::PostNotFound(post_id));
        }
        Ok(())
    }

    async fn pull_comment(
        &self,
        post_id: ObjectId,
        comment_id: ObjectId,
    ) -> Result<CommentRemoval, StoreError> {
        let result = self
            .posts()
            .update_one(
                doc! { "_id": post_id },
                doc! { "$pull": { "comments": { "_id": comment_id } } },
            )
            .await
            .map_err(database_error)?;

        if result.matched_count == 0 {
            Err(StoreError::PostNotFound(post_id))
        } else if result.modified_count == 0 {
            Ok(CommentRemoval::Absent)
        } else {
            Ok(CommentRemoval::Removed)
        }
    }
}
