//! Filter predicates for list queries.
//!
//! Each entity exposes a small fixed vocabulary of optional filter keys.
//! Absent keys add no condition. Every value is a bound parameter.

use crate::models::PostCategory;
use serde::Deserialize;
use sqlx::{Encode, Postgres, QueryBuilder, Type};

/// Condition sink that writes `WHERE` / `AND` between predicates
pub struct Conditions<'b> {
    builder: &'b mut QueryBuilder<'static, Postgres>,
    alias: &'static str,
    written: usize,
}

impl<'b> Conditions<'b> {
    pub fn new(builder: &'b mut QueryBuilder<'static, Postgres>, alias: &'static str) -> Self {
        Self {
            builder,
            alias,
            written: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    fn open(&mut self) -> &mut QueryBuilder<'static, Postgres> {
        self.builder
            .push(if self.written == 0 { " WHERE " } else { " AND " });
        self.written += 1;
        &mut *self.builder
    }

    /// `alias."column" = $n`
    pub fn eq<T>(&mut self, column: &'static str, value: T)
    where
        T: 'static + Encode<'static, Postgres> + Type<Postgres> + Send,
    {
        let alias = self.alias;
        self.open()
            .push(format!("{}.\"{}\" = ", alias, column))
            .push_bind(value);
    }

    /// Accent- and case-insensitive substring match
    pub fn contains_unaccented(&mut self, column: &'static str, term: &str) {
        let alias = self.alias;
        self.open()
            .push(format!("unaccent(lower({}.\"{}\"))", alias, column))
            .push(" LIKE '%' || unaccent(lower(")
            .push_bind(escape_like(term))
            .push(")) || '%' ESCAPE '\\'");
    }

    /// Array column emptiness
    pub fn array_non_empty(&mut self, column: &'static str, non_empty: bool) {
        let alias = self.alias;
        self.open().push(format!(
            "cardinality({}.\"{}\") {}",
            alias,
            column,
            if non_empty { "> 0" } else { "= 0" }
        ));
    }
}

/// Escape LIKE metacharacters so the term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Set of predicates applied to one entity's query
pub trait FilterSet: Send + Sync {
    fn apply(&self, conditions: &mut Conditions<'_>);
}

/// Unfiltered listing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl FilterSet for NoFilter {
    fn apply(&self, _conditions: &mut Conditions<'_>) {}
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PostFilter {
    /// Accent-insensitive title substring
    #[serde(default, alias = "titulo")]
    pub title: Option<String>,
    #[serde(default, alias = "isReported")]
    pub is_reported: Option<bool>,
    #[serde(default, alias = "categoria")]
    pub category: Option<PostCategory>,
    #[serde(default, alias = "idUsuario")]
    pub user_id: Option<i32>,
}

impl FilterSet for PostFilter {
    fn apply(&self, conditions: &mut Conditions<'_>) {
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            conditions.contains_unaccented("title", title);
        }
        if let Some(reported) = self.is_reported {
            conditions.array_non_empty("reporter_ids", reported);
        }
        if let Some(category) = self.category {
            conditions.eq("category", category);
        }
        if let Some(user_id) = self.user_id {
            conditions.eq("user_id", user_id);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommentFilter {
    #[serde(default, alias = "publicacaoId")]
    pub post_id: Option<i32>,
    #[serde(default, alias = "idUsuario")]
    pub user_id: Option<i32>,
}

impl FilterSet for CommentFilter {
    fn apply(&self, conditions: &mut Conditions<'_>) {
        if let Some(post_id) = self.post_id {
            conditions.eq("post_id", post_id);
        }
        if let Some(user_id) = self.user_id {
            conditions.eq("user_id", user_id);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportFilter {
    #[serde(default, alias = "publicacaoId")]
    pub post_id: Option<i32>,
    #[serde(default, alias = "idUsuario")]
    pub user_id: Option<i32>,
}

impl FilterSet for ReportFilter {
    fn apply(&self, conditions: &mut Conditions<'_>) {
        if let Some(post_id) = self.post_id {
            conditions.eq("post_id", post_id);
        }
        if let Some(user_id) = self.user_id {
            conditions.eq("user_id", user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FilterSet>(filter: &F) -> (String, usize) {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM posts p");
        let written = {
            let mut conditions = Conditions::new(&mut builder, "p");
            filter.apply(&mut conditions);
            conditions.len()
        };
        (builder.sql().to_string(), written)
    }

    #[test]
    fn empty_filter_adds_nothing() {
        let (sql, written) = render(&PostFilter::default());
        assert_eq!(sql, "SELECT * FROM posts p");
        assert_eq!(written, 0);
    }

    #[test]
    fn title_uses_unaccent_with_bound_term() {
        let filter = PostFilter {
            title: Some("titulo".to_string()),
            ..Default::default()
        };
        let (sql, _) = render(&filter);
        assert_eq!(
            sql,
            "SELECT * FROM posts p WHERE unaccent(lower(p.\"title\")) LIKE '%' || unaccent(lower($1)) || '%' ESCAPE '\\'"
        );
    }

    #[test]
    fn blank_title_is_no_constraint() {
        let filter = PostFilter {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(render(&filter).1, 0);
    }

    #[test]
    fn predicates_are_joined_with_and() {
        let filter = PostFilter {
            title: Some("dica".to_string()),
            is_reported: Some(true),
            user_id: Some(7),
            ..Default::default()
        };
        let (sql, written) = render(&filter);
        assert_eq!(written, 3);
        assert!(sql.contains(" AND cardinality(p.\"reporter_ids\") > 0"));
        assert!(sql.ends_with(" AND p.\"user_id\" = $2"));
    }

    #[test]
    fn not_reported_matches_empty_list() {
        let filter = PostFilter {
            is_reported: Some(false),
            ..Default::default()
        };
        assert!(render(&filter).0.ends_with("WHERE cardinality(p.\"reporter_ids\") = 0"));
    }

    #[test]
    fn legacy_keys_deserialize() {
        let filter: PostFilter =
            serde_json::from_value(serde_json::json!({"titulo": "titulo", "isReported": true}))
                .unwrap();
        assert_eq!(filter.title.as_deref(), Some("titulo"));
        assert_eq!(filter.is_reported, Some(true));
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
