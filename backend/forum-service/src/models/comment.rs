use super::{OwnedByUser, PostCategory};
use crate::query::SortColumn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use validator::Validate;

/// Owning post as loaded alongside a comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub category: PostCategory,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub post_id: i32,
    pub post: PostSummary,
}

// Rows come from `comments c JOIN posts p`; post columns are prefixed `post_`.
impl<'r> FromRow<'r, PgRow> for Comment {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let post_id: i32 = row.try_get("post_id")?;
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
            post_id,
            post: PostSummary {
                id: post_id,
                user_id: row.try_get("post_user_id")?,
                title: row.try_get("post_title")?,
                category: row.try_get("post_category")?,
                created_at: row.try_get("post_created_at")?,
            },
        })
    }
}

impl OwnedByUser for Comment {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(alias = "idUsuario")]
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[serde(alias = "conteudo")]
    #[validate(length(min = 1, max = 500))]
    pub content: String,
    #[serde(alias = "publicacaoId")]
    #[validate(range(min = 1))]
    pub post_id: i32,
    #[serde(default, alias = "dataHora")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[serde(default, alias = "conteudo")]
    #[validate(length(min = 1, max = 500))]
    pub content: Option<String>,
}

/// Sortable comment columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentColumn {
    #[default]
    Id,
    UserId,
    CreatedAt,
    PostId,
}

impl SortColumn for CommentColumn {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "user_id" | "idUsuario" => Some(Self::UserId),
            "created_at" | "dataHora" => Some(Self::CreatedAt),
            "post_id" | "publicacaoId" => Some(Self::PostId),
            _ => None,
        }
    }

    fn column_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "user_id",
            Self::CreatedAt => "created_at",
            Self::PostId => "post_id",
        }
    }
}
