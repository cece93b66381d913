use crate::domain::models::{Comment, NewComment};
use crate::error::ServiceResult;
use sqlx::PgPool;
use uuid::Uuid;

use super::CommentStore;

/// Repository for Comment operations
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a comment and return the stored row
    pub async fn create_comment(&self, comment: &NewComment) -> ServiceResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (user_id, post_id, comment)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, post_id, comment, created_at
            "#,
        )
        .bind(comment.user_id)
        .bind(comment.post_id)
        .bind(&comment.comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Comments on a post, newest first
    pub async fn get_comments_by_post(&self, post_id: Uuid) -> ServiceResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, user_id, post_id, comment, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}

#[async_trait::async_trait]
impl CommentStore for CommentRepository {
    async fn create(&self, comment: NewComment) -> ServiceResult<()> {
        let stored = self.create_comment(&comment).await?;
        tracing::debug!(comment_id = %stored.id, post_id = %stored.post_id, "comment stored");
        Ok(())
    }
}
