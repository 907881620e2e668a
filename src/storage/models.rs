use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Read a missing or `null` field as its default. Older documents store
/// absent request fields as explicit nulls.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// User document (`users` collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Argon2id PHC string. Older records keep a plaintext `password`.
    #[serde(alias = "password", default, deserialize_with = "null_as_default")]
    pub password_hash: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Post document (`posts` collection) with its comments embedded in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cover_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Set once at creation, never recomputed
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_spam: bool,
}

/// Caller-supplied post fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub cover_image: String,
    pub author_id: String,
    pub author_name: String,
    pub tags: Vec<String>,
}

impl Post {
    pub fn new(id: ObjectId, fields: PostFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            excerpt: fields.excerpt,
            cover_image: fields.cover_image,
            author_id: fields.author_id,
            author_name: fields.author_name,
            created_at,
            tags: fields.tags,
            likes: 0,
            comments: Vec::new(),
        }
    }

    /// Merge a patch in place
    pub fn apply(&mut self, patch: &PostPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(excerpt) = &patch.excerpt {
            self.excerpt = excerpt.clone();
        }
        if let Some(cover_image) = &patch.cover_image {
            self.cover_image = cover_image.clone();
        }
        if let Some(author_id) = &patch.author_id {
            self.author_id = author_id.clone();
        }
        if let Some(author_name) = &patch.author_name {
            self.author_name = author_name.clone();
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
    }
}

/// Partial post update. Identifier, likes, comments and timestamp are server-owned
/// and have no field here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub author_id: Option<String>,
    pub author_name: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// `$set` document for the patch, keyed by stored field names
    pub fn to_set_document(&self) -> bson::Document {
        let mut set = bson::Document::new();
        if let Some(title) = &self.title {
            set.insert("title", title.clone());
        }
        if let Some(content) = &self.content {
            set.insert("content", content.clone());
        }
        if let Some(excerpt) = &self.excerpt {
            set.insert("excerpt", excerpt.clone());
        }
        if let Some(cover_image) = &self.cover_image {
            set.insert("coverImage", cover_image.clone());
        }
        if let Some(author_id) = &self.author_id {
            set.insert("authorId", author_id.clone());
        }
        if let Some(author_name) = &self.author_name {
            set.insert("authorName", author_name.clone());
        }
        if let Some(tags) = &self.tags {
            set.insert("tags", tags.clone());
        }
        set
    }
}

/// Outcome of pulling a comment from a post that exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentRemoval {
    Removed,
    Absent,
}
