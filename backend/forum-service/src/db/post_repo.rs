use crate::error::{AppError, Result};
use crate::models::{CreatePostRequest, Post, PostColumn, UpdatePostRequest};
use crate::query::{fetch_page, ListQuery, Page, PostFilter, TableSource};
use async_trait::async_trait;
use sqlx::PgPool;

pub type PostListQuery = ListQuery<PostFilter, PostColumn>;

const POST_COLUMNS: &str =
    "p.id, p.user_id, p.title, p.description, p.created_at, p.category, p.reporter_ids";

pub const POSTS: TableSource = TableSource {
    from: "posts p",
    columns: POST_COLUMNS,
    alias: "p",
};

/// Persistence for posts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, req: &CreatePostRequest) -> Result<Post>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>>;

    /// Like `find_by_id`, but a missing row is `AppError::NotFound`
    async fn find_one_or_fail(&self, id: i32) -> Result<Post> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", id)))
    }

    /// Merge the present fields of `req` into post `id`
    async fn update(&self, id: i32, req: &UpdatePostRequest) -> Result<Post>;

    /// Delete post `id`; its comments and reports go with it
    async fn remove(&self, id: i32) -> Result<()>;

    async fn list(&self, query: &PostListQuery) -> Result<Page<Post>>;

    /// Record `user_id` as a reporter of post `id`. Repeats are no-ops.
    async fn add_reporter(&self, id: i32, user_id: i32) -> Result<Post>;
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, req: &CreatePostRequest) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts AS p (user_id, title, description, category, created_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
            RETURNING p.id, p.user_id, p.title, p.description, p.created_at, p.category, p.reporter_ids
            "#,
        )
        .bind(req.user_id)
        .bind(&req.title)
        .bind(&req.description)
        .bind(req.category.unwrap_or_default())
        .bind(req.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(post_id = post.id, user_id = post.user_id, "Post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {} FROM posts p WHERE p.id = $1",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update(&self, id: i32, req: &UpdatePostRequest) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts AS p
            SET title = COALESCE($2, p.title),
                description = COALESCE($3, p.description),
                category = COALESCE($4, p.category)
            WHERE p.id = $1
            RETURNING p.id, p.user_id, p.title, p.description, p.created_at, p.category, p.reporter_ids
            "#,
        )
        .bind(id)
        .bind(req.title.as_deref())
        .bind(req.description.as_deref())
        .bind(req.category)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;

        tracing::debug!(post_id = id, "Post updated");
        Ok(post)
    }

    async fn remove(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("post {}", id)));
        }

        tracing::info!(post_id = id, "Post removed");
        Ok(())
    }

    async fn list(&self, query: &PostListQuery) -> Result<Page<Post>> {
        let page = fetch_page(
            &self.pool,
            &POSTS,
            &query.filter,
            &query.ordering,
            query.pagination,
        )
        .await?;
        Ok(page)
    }

    async fn add_reporter(&self, id: i32, user_id: i32) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts AS p
            SET reporter_ids = CASE
                WHEN $2 = ANY(p.reporter_ids) THEN p.reporter_ids
                ELSE array_append(p.reporter_ids, $2)
            END
            WHERE p.id = $1
            RETURNING p.id, p.user_id, p.title, p.description, p.created_at, p.category, p.reporter_ids
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;

        tracing::info!(post_id = id, reporter_id = user_id, "Post reporter recorded");
        Ok(post)
    }
}
