use super::OwnedByUser;
use crate::query::SortColumn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "post_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostCategory {
    #[default]
    #[serde(alias = "GERAL")]
    General,
    #[serde(alias = "SAUDE")]
    Health,
    #[serde(alias = "NUTRICAO")]
    Nutrition,
    #[serde(alias = "EXERCICIO")]
    Exercise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub category: PostCategory,
    /// Users who flagged this post; append-only
    pub reporter_ids: Vec<i32>,
}

impl Post {
    pub fn is_reported(&self) -> bool {
        !self.reporter_ids.is_empty()
    }
}

impl OwnedByUser for Post {
    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(alias = "idUsuario")]
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[serde(alias = "titulo")]
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(alias = "descricao")]
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[serde(default, alias = "categoria")]
    pub category: Option<PostCategory>,
    #[serde(default, alias = "dataHora")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial update merged into an existing post
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[serde(default, alias = "titulo")]
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[serde(default, alias = "descricao")]
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
    #[serde(default, alias = "categoria")]
    pub category: Option<PostCategory>,
}

/// Sortable post columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostColumn {
    #[default]
    Id,
    UserId,
    Title,
    CreatedAt,
    Category,
}

impl SortColumn for PostColumn {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "user_id" | "idUsuario" => Some(Self::UserId),
            "title" | "titulo" => Some(Self::Title),
            "created_at" | "dataHora" => Some(Self::CreatedAt),
            "category" | "categoria" => Some(Self::Category),
            _ => None,
        }
    }

    fn column_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "user_id",
            Self::Title => "title",
            Self::CreatedAt => "created_at",
            Self::Category => "category",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_legacy_field_names() {
        let req: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "idUsuario": 7,
            "titulo": "Cuidados com idosos",
            "descricao": "Dicas de alimentação",
            "categoria": "NUTRITION"
        }))
        .unwrap();

        assert_eq!(req.user_id, 7);
        assert_eq!(req.category, Some(PostCategory::Nutrition));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn overlong_title_fails_validation() {
        let req = CreatePostRequest {
            user_id: 1,
            title: "x".repeat(101),
            description: "d".to_string(),
            category: None,
            created_at: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(UpdatePostRequest::default().validate().is_ok());
    }

    #[test]
    fn legacy_category_labels_are_accepted() {
        let category: PostCategory = serde_json::from_value(serde_json::json!("GERAL")).unwrap();
        assert_eq!(category, PostCategory::General);

        let filter: crate::query::PostFilter =
            serde_json::from_value(serde_json::json!({"categoria": "SAUDE"})).unwrap();
        assert_eq!(filter.category, Some(PostCategory::Health));

        assert_eq!(
            serde_json::to_value(PostCategory::General).unwrap(),
            serde_json::json!("GENERAL")
        );
    }
}
