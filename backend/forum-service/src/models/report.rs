use super::OwnedByUser;
use crate::query::SortColumn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Report {
    pub id: i32,
    /// Reporting user
    pub user_id: i32,
    pub reason: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub post_id: i32,
}

impl OwnedByUser for Report {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[serde(alias = "idUsuario")]
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[serde(alias = "motivo")]
    #[validate(length(min = 1, max = 100))]
    pub reason: String,
    #[serde(alias = "descricao")]
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[serde(alias = "publicacaoId")]
    #[validate(range(min = 1))]
    pub post_id: i32,
    #[serde(default, alias = "dataHora")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReportRequest {
    #[serde(default, alias = "motivo")]
    #[validate(length(min = 1, max = 100))]
    pub reason: Option<String>,
    #[serde(default, alias = "descricao")]
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
}

/// Sortable report columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportColumn {
    #[default]
    Id,
    UserId,
    Reason,
    CreatedAt,
    PostId,
}

impl SortColumn for ReportColumn {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "user_id" | "idUsuario" => Some(Self::UserId),
            "reason" | "motivo" => Some(Self::Reason),
            "created_at" | "dataHora" => Some(Self::CreatedAt),
            "post_id" | "publicacaoId" => Some(Self::PostId),
            _ => None,
        }
    }

    fn column_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "user_id",
            Self::Reason => "reason",
            Self::CreatedAt => "created_at",
            Self::PostId => "post_id",
        }
    }
}
