use crate::error::{AppError, Result};
use crate::models::{Comment, CommentColumn, CreateCommentRequest, UpdateCommentRequest};
use crate::query::{fetch_page, CommentFilter, ListQuery, Page, TableSource};
use async_trait::async_trait;
use sqlx::PgPool;

pub type CommentListQuery = ListQuery<CommentFilter, CommentColumn>;

// Owning post is loaded in the same statement; see `Comment::from_row`.
const COMMENT_COLUMNS: &str = "c.id, c.user_id, c.content, c.created_at, c.post_id, \
     p.user_id AS post_user_id, p.title AS post_title, \
     p.category AS post_category, p.created_at AS post_created_at";

pub const COMMENTS: TableSource = TableSource {
    from: "comments c JOIN posts p ON p.id = c.post_id",
    columns: COMMENT_COLUMNS,
    alias: "c",
};

/// Persistence for comments
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Insert a comment; `ParentNotFound` when the post does not exist
    async fn create(&self, req: &CreateCommentRequest) -> Result<Comment>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>>;

    async fn find_one_or_fail(&self, id: i32) -> Result<Comment> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {}", id)))
    }

    async fn update(&self, id: i32, req: &UpdateCommentRequest) -> Result<Comment>;

    async fn remove(&self, id: i32) -> Result<()>;

    async fn list(&self, query: &CommentListQuery) -> Result<Page<Comment>>;
}

#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn create(&self, req: &CreateCommentRequest) -> Result<Comment> {
        let mut tx = self.pool.begin().await?;

        // Share lock keeps the post alive until the insert commits
        let parent: Option<i32> =
            sqlx::query_scalar("SELECT id FROM posts WHERE id = $1 FOR SHARE")
                .bind(req.post_id)
                .fetch_optional(&mut *tx)
                .await?;
        if parent.is_none() {
            tracing::debug!(post_id = req.post_id, "Comment rejected, post missing");
            return Err(AppError::ParentNotFound(format!("post {}", req.post_id)));
        }

        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            WITH c AS (
                INSERT INTO comments (user_id, content, post_id, created_at)
                VALUES ($1, $2, $3, COALESCE($4, NOW()))
                RETURNING id, user_id, content, created_at, post_id
            )
            SELECT {} FROM c JOIN posts p ON p.id = c.post_id
            "#,
            COMMENT_COLUMNS
        ))
        .bind(req.user_id)
        .bind(&req.content)
        .bind(req.post_id)
        .bind(req.created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            comment_id = comment.id,
            post_id = comment.post_id,
            "Comment created"
        );
        Ok(comment)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM {} WHERE c.id = $1",
            COMMENT_COLUMNS, COMMENTS.from
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn update(&self, id: i32, req: &UpdateCommentRequest) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            WITH c AS (
                UPDATE comments
                SET content = COALESCE($2, content)
                WHERE id = $1
                RETURNING id, user_id, content, created_at, post_id
            )
            SELECT {} FROM c JOIN posts p ON p.id = c.post_id
            "#,
            COMMENT_COLUMNS
        ))
        .bind(id)
        .bind(req.content.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("comment {}", id)))?;

        Ok(comment)
    }

    async fn remove(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("comment {}", id)));
        }

        tracing::info!(comment_id = id, "Comment removed");
        Ok(())
    }

    async fn list(&self, query: &CommentListQuery) -> Result<Page<Comment>> {
        let page = fetch_page(
            &self.pool,
            &COMMENTS,
            &query.filter,
            &query.ordering,
            query.pagination,
        )
        .await?;
        Ok(page)
    }
}
