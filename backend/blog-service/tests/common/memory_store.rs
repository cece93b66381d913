//! In-memory stores for service tests
//!
//! One shared state behind a mutex implements every store trait, so tests can
//! wire a `PostService` without PostgreSQL and inspect what was persisted.

use blog_service::domain::models::{
    Category, Comment, NewComment, NewPost, Post, PostDetails, PostWithReactions, Reaction,
    ReactionUpsert, User, UserRole, UserSummary,
};
use blog_service::error::{ServiceError, ServiceResult};
use blog_service::repository::{CategoryStore, CommentStore, PostStore, ReactionStore};
use blog_service::PostService;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct MemoryDb {
    users: HashMap<Uuid, UserSummary>,
    categories: HashMap<Uuid, Category>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    reactions: Vec<Reaction>,
}

impl MemoryDb {
    fn details(&self, post: &Post) -> PostDetails {
        PostDetails {
            post: post.clone(),
            author: self.users.get(&post.author_id).cloned(),
            category: self.categories.get(&post.category_id).cloned(),
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    db: Arc<Mutex<MemoryDb>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post service wired entirely to this store
    pub fn service(&self) -> PostService {
        PostService::new(
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
            Arc::new(self.clone()),
        )
    }

    pub fn add_user(&self, username: &str, role: UserRole) -> User {
        let id = Uuid::new_v4();
        self.db.lock().unwrap().users.insert(
            id,
            UserSummary {
                id,
                username: username.to_string(),
                role,
            },
        );
        User { id, role }
    }

    pub fn add_category(&self, name: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.db
            .lock()
            .unwrap()
            .categories
            .insert(category.id, category.clone());
        category
    }

    pub fn set_private(&self, post_id: Uuid, private: bool) {
        let mut db = self.db.lock().unwrap();
        if let Some(post) = db.posts.iter_mut().find(|p| p.id == post_id) {
            post.private = private;
        }
    }

    pub fn reactions(&self) -> Vec<Reaction> {
        self.db.lock().unwrap().reactions.clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.db.lock().unwrap().comments.clone()
    }

    pub fn post_count(&self) -> usize {
        self.db.lock().unwrap().posts.len()
    }
}

#[async_trait::async_trait]
impl PostStore for MemoryStore {
    async fn insert(&self, new_post: NewPost) -> ServiceResult<Post> {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: new_post.title,
            slug: new_post.slug,
            description: new_post.description,
            author_id: new_post.author_id,
            category_id: new_post.category_id,
            private: new_post.private,
            created_at: now,
            updated_at: now,
        };
        self.db.lock().unwrap().posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, post_id: Uuid) -> ServiceResult<Option<Post>> {
        let db = self.db.lock().unwrap();
        Ok(db.posts.iter().find(|p| p.id == post_id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> ServiceResult<Option<Post>> {
        let db = self.db.lock().unwrap();
        Ok(db.posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn list_details(&self) -> ServiceResult<Vec<PostDetails>> {
        let db = self.db.lock().unwrap();
        Ok(db.posts.iter().map(|p| db.details(p)).collect())
    }

    async fn update_description_and_category(
        &self,
        post_id: Uuid,
        description: &str,
        category_id: Uuid,
    ) -> ServiceResult<Option<Post>> {
        let mut db = self.db.lock().unwrap();
        let Some(post) = db.posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };
        post.description = description.to_string();
        post.category_id = category_id;
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn delete(&self, post_id: Uuid) -> ServiceResult<bool> {
        let mut db = self.db.lock().unwrap();
        let before = db.posts.len();
        db.posts.retain(|p| p.id != post_id);
        Ok(db.posts.len() < before)
    }

    async fn count_slug_matches(&self, fragment: &str) -> ServiceResult<i64> {
        let needle = fragment.to_lowercase();
        let db = self.db.lock().unwrap();
        Ok(db
            .posts
            .iter()
            .filter(|p| p.slug.to_lowercase().contains(&needle))
            .count() as i64)
    }

    async fn exists_for_author(&self, post_id: Uuid, author_id: Uuid) -> ServiceResult<bool> {
        let db = self.db.lock().unwrap();
        Ok(db
            .posts
            .iter()
            .any(|p| p.id == post_id && p.author_id == author_id))
    }

    async fn exists_by_slug_and_author(
        &self,
        slug: &str,
        author_id: Uuid,
    ) -> ServiceResult<bool> {
        let db = self.db.lock().unwrap();
        Ok(db
            .posts
            .iter()
            .any(|p| p.slug == slug && p.author_id == author_id))
    }

    async fn any_by_author(&self, author_id: Uuid) -> ServiceResult<bool> {
        let db = self.db.lock().unwrap();
        Ok(db.posts.iter().any(|p| p.author_id == author_id))
    }

    async fn list_with_reaction_counts(&self) -> ServiceResult<Vec<PostWithReactions>> {
        let db = self.db.lock().unwrap();
        Ok(db
            .posts
            .iter()
            .map(|p| PostWithReactions {
                details: db.details(p),
                likes: db
                    .reactions
                    .iter()
                    .filter(|r| r.post_id == p.id && r.liked)
                    .count() as i64,
                favorites: db
                    .reactions
                    .iter()
                    .filter(|r| r.post_id == p.id && r.favorite)
                    .count() as i64,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl CategoryStore for MemoryStore {
    async fn get_or_fail(&self, category_id: Uuid) -> ServiceResult<Category> {
        let db = self.db.lock().unwrap();
        db.categories
            .get(&category_id)
            .cloned()
            .ok_or_else(|| ServiceError::category_not_found(category_id))
    }
}

#[async_trait::async_trait]
impl CommentStore for MemoryStore {
    async fn create(&self, comment: NewComment) -> ServiceResult<()> {
        self.db.lock().unwrap().comments.push(Comment {
            id: Uuid::new_v4(),
            user_id: comment.user_id,
            post_id: comment.post_id,
            comment: comment.comment,
            created_at: Utc::now(),
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReactionStore for MemoryStore {
    async fn update_or_create(&self, upsert: ReactionUpsert) -> ServiceResult<()> {
        let now = Utc::now();
        let mut db = self.db.lock().unwrap();

        match db
            .reactions
            .iter_mut()
            .find(|r| r.user_id == upsert.user_id && r.post_id == upsert.post_id)
        {
            Some(existing) => {
                if let Some(liked) = upsert.liked {
                    existing.liked = liked;
                }
                if let Some(favorite) = upsert.favorite {
                    existing.favorite = favorite;
                }
                existing.updated_at = now;
            }
            None => db.reactions.push(Reaction {
                user_id: upsert.user_id,
                post_id: upsert.post_id,
                liked: upsert.liked.unwrap_or(false),
                favorite: upsert.favorite.unwrap_or(false),
                created_at: now,
                updated_at: now,
            }),
        }
        Ok(())
    }

    async fn get_all(&self) -> ServiceResult<Vec<Reaction>> {
        Ok(self.db.lock().unwrap().reactions.clone())
    }
}

/// Category store whose backend is always down
pub struct UnavailableCategoryStore;

#[async_trait::async_trait]
impl CategoryStore for UnavailableCategoryStore {
    async fn get_or_fail(&self, _category_id: Uuid) -> ServiceResult<Category> {
        Err(ServiceError::Internal("category store unavailable".to_string()))
    }
}
