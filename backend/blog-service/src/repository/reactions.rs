use crate::domain::models::{Reaction, ReactionUpsert};
use crate::error::ServiceResult;
use sqlx::PgPool;
use uuid::Uuid;

use super::ReactionStore;

/// Repository for like/favorite reactions
#[derive(Clone)]
pub struct ReactionRepository {
    pool: PgPool,
}

impl ReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert a reaction row in a single statement.
    /// Facets passed as NULL keep the existing value, or default to false on insert.
    pub async fn upsert(&self, upsert: &ReactionUpsert) -> ServiceResult<Reaction> {
        let reaction = sqlx::query_as::<_, Reaction>(
            r#"
            INSERT INTO reactions (user_id, post_id, liked, favorite)
            VALUES ($1, $2, COALESCE($3, FALSE), COALESCE($4, FALSE))
            ON CONFLICT (user_id, post_id) DO UPDATE
            SET liked = COALESCE($3, reactions.liked),
                favorite = COALESCE($4, reactions.favorite),
                updated_at = NOW()
            RETURNING user_id, post_id, liked, favorite, created_at, updated_at
            "#,
        )
        .bind(upsert.user_id)
        .bind(upsert.post_id)
        .bind(upsert.liked)
        .bind(upsert.favorite)
        .fetch_one(&self.pool)
        .await?;

        Ok(reaction)
    }

    pub async fn find(&self, user_id: Uuid, post_id: Uuid) -> ServiceResult<Option<Reaction>> {
        let reaction = sqlx::query_as::<_, Reaction>(
            r#"
            SELECT user_id, post_id, liked, favorite, created_at, updated_at
            FROM reactions
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reaction)
    }
}

#[async_trait::async_trait]
impl ReactionStore for ReactionRepository {
    async fn update_or_create(&self, upsert: ReactionUpsert) -> ServiceResult<()> {
        self.upsert(&upsert).await?;
        Ok(())
    }

    async fn get_all(&self) -> ServiceResult<Vec<Reaction>> {
        let reactions = sqlx::query_as::<_, Reaction>(
            r#"
            SELECT user_id, post_id, liked, favorite, created_at, updated_at
            FROM reactions
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reactions)
    }
}
