use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog post authored by a user within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category entity - posts must reference an existing category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Comment entity - a user's comment on a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Reaction entity - liked and favorited state of one user on one post.
/// The two facets are independent; there is at most one row per (user, post).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reaction {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub liked: bool,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

// Any role other than "admin" is an ordinary member.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        if s == "admin" {
            UserRole::Admin
        } else {
            UserRole::Member
        }
    }
}

/// The acting user, as resolved by the authentication layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub role: UserRole,
}

/// Author projection joined onto listed posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub role: UserRole,
}

/// Post with author and category resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetails {
    #[serde(flatten)]
    pub post: Post,
    pub author: Option<UserSummary>,
    pub category: Option<Category>,
}

/// Listed post annotated with its reaction totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithReactions {
    #[serde(flatten)]
    pub details: PostDetails,
    pub likes: i64,
    pub favorites: i64,
}

// ============================================================================
// Inputs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePostInput {
    pub description: String,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentInput {
    pub slug: String,
    pub user_id: Uuid,
    pub comment: String,
}

/// Row handed to the post store on creation
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub private: bool,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub comment: String,
}

/// Reaction upsert; `None` facets keep their stored value (false on insert)
#[derive(Debug, Clone, Default)]
pub struct ReactionUpsert {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub liked: Option<bool>,
    pub favorite: Option<bool>,
}

impl ReactionUpsert {
    pub fn like(user_id: Uuid, post_id: Uuid) -> Self {
        Self {
            user_id,
            post_id,
            liked: Some(true),
            favorite: None,
        }
    }

    pub fn favorite(user_id: Uuid, post_id: Uuid) -> Self {
        Self {
            user_id,
            post_id,
            liked: None,
            favorite: Some(true),
        }
    }
}
