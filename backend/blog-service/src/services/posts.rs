/// Post service - slug assignment, reactions, visibility and authorship checks
use crate::config::ReactionCountStrategy;
use crate::domain::models::{
    AddCommentInput, CreatePostInput, NewComment, NewPost, Post, PostDetails, PostWithReactions,
    ReactionUpsert, UpdatePostInput, User, UserRole,
};
use crate::domain::Visibility;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{CategoryStore, CommentStore, PostStore, ReactionStore};
use std::sync::Arc;
use uuid::Uuid;

use super::{reactions, slug};

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostStore>,
    categories: Arc<dyn CategoryStore>,
    comments: Arc<dyn CommentStore>,
    reactions: Arc<dyn ReactionStore>,
    count_strategy: ReactionCountStrategy,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        categories: Arc<dyn CategoryStore>,
        comments: Arc<dyn CommentStore>,
        reactions: Arc<dyn ReactionStore>,
    ) -> Self {
        Self {
            posts,
            categories,
            comments,
            reactions,
            count_strategy: ReactionCountStrategy::default(),
        }
    }

    pub fn with_count_strategy(mut self, strategy: ReactionCountStrategy) -> Self {
        self.count_strategy = strategy;
        self
    }

    /// All posts with author and category resolved, unfiltered
    pub async fn list_all(&self) -> ServiceResult<Vec<PostDetails>> {
        self.posts.list_details().await
    }

    /// Create a post with a slug derived from its title.
    ///
    /// The slug gets a `-<n>` suffix where `n` counts existing slugs that
    /// contain the base slug anywhere, case-insensitively. That count also
    /// includes unrelated slugs that merely contain the base (e.g. `rust` is
    /// found inside `trust-issues`), so numbering can skip values.
    pub async fn create(&self, author_id: Uuid, input: CreatePostInput) -> ServiceResult<Post> {
        let base = slug::slugify(&input.title);
        if base.is_empty() {
            return Err(ServiceError::Validation(format!(
                "title '{}' does not produce a usable slug",
                input.title
            )));
        }

        let matches = self.posts.count_slug_matches(&base).await?;
        let category = self.categories.get_or_fail(input.category_id).await?;

        let post = self
            .posts
            .insert(NewPost {
                title: input.title,
                slug: slug::disambiguate(&base, matches),
                description: input.description,
                author_id,
                category_id: category.id,
                private: false,
            })
            .await?;

        tracing::info!(
            post_id = %post.id,
            slug = %post.slug,
            %author_id,
            slug_matches = matches,
            "post created"
        );

        Ok(post)
    }

    /// Replace description and category. Title and slug never change.
    pub async fn update(&self, post_id: Uuid, input: UpdatePostInput) -> ServiceResult<Post> {
        let category = self.categories.get_or_fail(input.category_id).await?;

        let post = self
            .posts
            .update_description_and_category(post_id, &input.description, category.id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(%post_id, "update on unknown post");
                ServiceError::post_not_found(post_id)
            })?;

        tracing::info!(%post_id, category_id = %category.id, "post updated");
        Ok(post)
    }

    /// Delete a post and return it as it was before removal
    pub async fn delete_post(&self, post_id: Uuid) -> ServiceResult<Post> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::post_not_found(post_id))?;

        if !self.posts.delete(post_id).await? {
            // Removed concurrently between the lookup and the delete.
            tracing::warn!(%post_id, "post vanished before delete");
            return Err(ServiceError::post_not_found(post_id));
        }

        tracing::info!(%post_id, slug = %post.slug, "post deleted");
        Ok(post)
    }

    /// Exact slug lookup; absence is not an error
    pub async fn get_by_slug(&self, slug: &str) -> ServiceResult<Option<Post>> {
        self.posts.find_by_slug(slug).await
    }

    pub async fn add_comment(&self, input: AddCommentInput) -> ServiceResult<Post> {
        let post = self.require_by_slug(&input.slug).await?;

        self.comments
            .create(NewComment {
                user_id: input.user_id,
                post_id: post.id,
                comment: input.comment,
            })
            .await?;

        tracing::info!(post_id = %post.id, user_id = %input.user_id, "comment added");
        Ok(post)
    }

    /// Mark the post as liked by the user; the favorite facet is left as is
    pub async fn like(&self, user_id: Uuid, slug: &str) -> ServiceResult<Post> {
        let post = self.require_by_slug(slug).await?;
        self.reactions
            .update_or_create(ReactionUpsert::like(user_id, post.id))
            .await?;

        tracing::info!(post_id = %post.id, %user_id, "post liked");
        Ok(post)
    }

    /// Mark the post as favorited by the user; the liked facet is left as is
    pub async fn favorite(&self, user_id: Uuid, slug: &str) -> ServiceResult<Post> {
        let post = self.require_by_slug(slug).await?;
        self.reactions
            .update_or_create(ReactionUpsert::favorite(user_id, post.id))
            .await?;

        tracing::info!(post_id = %post.id, %user_id, "post favorited");
        Ok(post)
    }

    /// Posts visible to the viewer, each with exact like and favorite totals
    pub async fn list_with_reaction_counts(
        &self,
        viewer_role: UserRole,
    ) -> ServiceResult<Vec<PostWithReactions>> {
        let annotated = match self.count_strategy {
            ReactionCountStrategy::InMemory => {
                let posts = self.posts.list_details().await?;
                let all_reactions = self.reactions.get_all().await?;
                reactions::attach_counts(posts, &all_reactions)
            }
            ReactionCountStrategy::StoreAggregate => {
                self.posts.list_with_reaction_counts().await?
            }
        };

        let visibility = Visibility::for_role(viewer_role);
        Ok(annotated
            .into_iter()
            .filter(|p| visibility.allows(&p.details.post))
            .collect())
    }

    /// All posts for admins; public posts only for everyone else
    pub async fn list_private_aware(&self, user: &User) -> ServiceResult<Vec<PostDetails>> {
        let posts = self.posts.list_details().await?;
        let visibility = Visibility::for_role(user.role);

        Ok(posts
            .into_iter()
            .filter(|p| visibility.allows(&p.post))
            .collect())
    }

    /// Admin, or author of the post with this id
    pub async fn is_owner_or_admin(&self, user: &User, post_id: Uuid) -> ServiceResult<bool> {
        if user.role.is_admin() {
            return Ok(true);
        }
        self.posts.exists_for_author(post_id, user.id).await
    }

    /// Admin, or author of any post at all.
    ///
    /// This is how the ownership check behaved when its id filter was not
    /// applied. Kept for callers that relied on it; prefer
    /// [`Self::is_owner_or_admin`].
    pub async fn is_admin_or_any_post_author(&self, user: &User) -> ServiceResult<bool> {
        if user.role.is_admin() {
            return Ok(true);
        }
        self.posts.any_by_author(user.id).await
    }

    /// True when a post with this slug is authored by the user
    pub async fn owns_post_by_slug(&self, user: &User, slug: &str) -> ServiceResult<bool> {
        self.posts.exists_by_slug_and_author(slug, user.id).await
    }

    /// True when the user authored the post with this slug.
    ///
    /// The name reads as the opposite of what it computes; call sites negate
    /// it. Same predicate as [`Self::owns_post_by_slug`].
    pub async fn is_forbidden(&self, user: &User, slug: &str) -> ServiceResult<bool> {
        self.owns_post_by_slug(user, slug).await
    }

    async fn require_by_slug(&self, slug: &str) -> ServiceResult<Post> {
        match self.posts.find_by_slug(slug).await? {
            Some(post) => Ok(post),
            None => {
                tracing::debug!(%slug, "no post for slug");
                Err(ServiceError::post_not_found(slug))
            }
        }
    }
}
