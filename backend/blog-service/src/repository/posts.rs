use crate::domain::models::{
    Category, NewPost, Post, PostDetails, PostWithReactions, UserRole, UserSummary,
};
use crate::error::ServiceResult;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use super::PostStore;

const POST_COLUMNS: &str = r#"
    p.id, p.title, p.slug, p.description, p.author_id, p.category_id, p.private,
    p.created_at, p.updated_at,
    u.id AS author_ref, u.username AS author_username, u.role AS author_role,
    c.id AS category_ref, c.name AS category_name, c.created_at AS category_created_at
"#;

const POST_JOINS: &str = r#"
    FROM posts p
    LEFT JOIN users u ON u.id = p.author_id
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Repository for Post operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_details(r: &PgRow) -> PostDetails {
        let post = Post {
            id: r.get("id"),
            title: r.get("title"),
            slug: r.get("slug"),
            description: r.get("description"),
            author_id: r.get("author_id"),
            category_id: r.get("category_id"),
            private: r.get("private"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        };

        let author = r
            .get::<Option<Uuid>, _>("author_ref")
            .map(|id| UserSummary {
                id,
                username: r.get("author_username"),
                role: UserRole::from(r.get::<String, _>("author_role").as_str()),
            });

        let category = r
            .get::<Option<Uuid>, _>("category_ref")
            .map(|id| Category {
                id,
                name: r.get("category_name"),
                created_at: r.get("category_created_at"),
            });

        PostDetails {
            post,
            author,
            category,
        }
    }
}

#[async_trait::async_trait]
impl PostStore for PostRepository {
    async fn insert(&self, new_post: NewPost) -> ServiceResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, slug, description, author_id, category_id, private)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, slug, description, author_id, category_id, private,
                      created_at, updated_at
            "#,
        )
        .bind(&new_post.title)
        .bind(&new_post.slug)
        .bind(&new_post.description)
        .bind(new_post.author_id)
        .bind(new_post.category_id)
        .bind(new_post.private)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, post_id: Uuid) -> ServiceResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, slug, description, author_id, category_id, private,
                   created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_by_slug(&self, slug: &str) -> ServiceResult<Option<Post>> {
        // Slugs are not unique at the schema level; the oldest match wins.
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, slug, description, author_id, category_id, private,
                   created_at, updated_at
            FROM posts
            WHERE slug = $1
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_details(&self) -> ServiceResult<Vec<PostDetails>> {
        let sql = format!(
            "SELECT {} {} ORDER BY p.created_at ASC, p.id ASC",
            POST_COLUMNS, POST_JOINS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(Self::row_to_details).collect())
    }

    async fn update_description_and_category(
        &self,
        post_id: Uuid,
        description: &str,
        category_id: Uuid,
    ) -> ServiceResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET description = $1, category_id = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING id, title, slug, description, author_id, category_id, private,
                      created_at, updated_at
            "#,
        )
        .bind(description)
        .bind(category_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn delete(&self, post_id: Uuid) -> ServiceResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_slug_matches(&self, fragment: &str) -> ServiceResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM posts
            WHERE STRPOS(LOWER(slug), LOWER($1)) > 0
            "#,
        )
        .bind(fragment)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn exists_for_author(&self, post_id: Uuid, author_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM posts
                WHERE id = $1 AND author_id = $2
            )
            "#,
        )
        .bind(post_id)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_slug_and_author(
        &self,
        slug: &str,
        author_id: Uuid,
    ) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM posts
                WHERE slug = $1 AND author_id = $2
            )
            "#,
        )
        .bind(slug)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn any_by_author(&self, author_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM posts
                WHERE author_id = $1
            )
            "#,
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_with_reaction_counts(&self) -> ServiceResult<Vec<PostWithReactions>> {
        let sql = format!(
            r#"
            SELECT {},
                   COALESCE(rc.likes, 0) AS likes,
                   COALESCE(rc.favorites, 0) AS favorites
            {}
            LEFT JOIN (
                SELECT post_id,
                       COUNT(*) FILTER (WHERE liked) AS likes,
                       COUNT(*) FILTER (WHERE favorite) AS favorites
                FROM reactions
                GROUP BY post_id
            ) rc ON rc.post_id = p.id
            ORDER BY p.created_at ASC, p.id ASC
            "#,
            POST_COLUMNS, POST_JOINS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let posts = rows
            .iter()
            .map(|r| PostWithReactions {
                details: Self::row_to_details(r),
                likes: r.get("likes"),
                favorites: r.get("favorites"),
            })
            .collect();

        Ok(posts)
    }
}
