//! Persistence layer.
//!
//! Each store is a trait so the post service can be wired against the
//! PostgreSQL repositories in production and against in-memory doubles in
//! tests.
pub mod categories;
pub mod comments;
pub mod posts;
pub mod reactions;

pub use categories::CategoryRepository;
pub use comments::CommentRepository;
pub use posts::PostRepository;
pub use reactions::ReactionRepository;

use crate::domain::models::{
    Category, NewComment, NewPost, Post, PostDetails, PostWithReactions, Reaction, ReactionUpsert,
};
use crate::error::ServiceResult;
use uuid::Uuid;

/// Posts owned by the blog service
#[async_trait::async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new post and return it with its generated id and timestamps
    async fn insert(&self, new_post: NewPost) -> ServiceResult<Post>;

    async fn find_by_id(&self, post_id: Uuid) -> ServiceResult<Option<Post>>;

    /// Exact slug lookup
    async fn find_by_slug(&self, slug: &str) -> ServiceResult<Option<Post>>;

    /// Every post with author and category joined
    async fn list_details(&self) -> ServiceResult<Vec<PostDetails>>;

    /// Set description and category, refresh `updated_at`.
    /// Returns `None` when no post has this id.
    async fn update_description_and_category(
        &self,
        post_id: Uuid,
        description: &str,
        category_id: Uuid,
    ) -> ServiceResult<Option<Post>>;

    /// Remove a post; returns false when nothing was deleted
    async fn delete(&self, post_id: Uuid) -> ServiceResult<bool>;

    /// Number of posts whose slug contains `fragment`, ignoring case
    async fn count_slug_matches(&self, fragment: &str) -> ServiceResult<i64>;

    async fn exists_for_author(&self, post_id: Uuid, author_id: Uuid) -> ServiceResult<bool>;

    async fn exists_by_slug_and_author(&self, slug: &str, author_id: Uuid)
        -> ServiceResult<bool>;

    async fn any_by_author(&self, author_id: Uuid) -> ServiceResult<bool>;

    /// Joined posts with like/favorite totals grouped by post id
    async fn list_with_reaction_counts(&self) -> ServiceResult<Vec<PostWithReactions>>;
}

#[async_trait::async_trait]
pub trait CategoryStore: Send + Sync {
    /// Fails with `NotFound` when the category does not exist
    async fn get_or_fail(&self, category_id: Uuid) -> ServiceResult<Category>;
}

#[async_trait::async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, comment: NewComment) -> ServiceResult<()>;
}

#[async_trait::async_trait]
pub trait ReactionStore: Send + Sync {
    /// Upsert on (user_id, post_id), setting only the provided facets.
    /// Must be atomic per pair.
    async fn update_or_create(&self, upsert: ReactionUpsert) -> ServiceResult<()>;

    async fn get_all(&self) -> ServiceResult<Vec<Reaction>>;
}
