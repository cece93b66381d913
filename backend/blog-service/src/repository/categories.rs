use crate::domain::models::Category;
use crate::error::{ServiceError, ServiceResult};
use sqlx::PgPool;
use uuid::Uuid;

use super::CategoryStore;

/// Repository for Category lookups
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, category_id: Uuid) -> ServiceResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }
}

#[async_trait::async_trait]
impl CategoryStore for CategoryRepository {
    async fn get_or_fail(&self, category_id: Uuid) -> ServiceResult<Category> {
        self.find_by_id(category_id)
            .await?
            .ok_or_else(|| ServiceError::category_not_found(category_id))
    }
}
