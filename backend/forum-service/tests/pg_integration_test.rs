//! Integration Tests: PostgreSQL Stores
//!
//! Runs the stores and services against a real database.
//!
//! Coverage:
//! - Accent-insensitive title filter and enriched envelope
//! - Count reflects filters, not the page window
//! - Ordering and pagination on real rows
//! - Deleting a post cascades to its comments and reports
//! - Children of missing posts are rejected without writes
//! - Reporter list is append-only and idempotent
//!
//! Architecture:
//! - Uses testcontainers for PostgreSQL (requires Docker, hence `#[ignore]`)
//! - Identity service replaced by an in-memory mock

mod common;

use common::mock_identity_client::MockIdentityClient;
use common::postgres::setup_test_db;
use forum_service::db::post_repo::PostListQuery;
use forum_service::db::{CommentStore, PgCommentStore, PgPostStore, PgReportStore, PostStore, ReportStore};
use forum_service::enrichment::IdentityGateway;
use forum_service::models::{
    CreateCommentRequest, CreatePostRequest, CreateReportRequest, PostCategory, PostColumn,
    UpdatePostRequest,
};
use forum_service::query::{Ordering, Pagination, PostFilter, SortDirection};
use forum_service::{AppError, ForumServices};
use identity_client::User;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

fn post_request(user_id: i32, title: &str, category: PostCategory) -> CreatePostRequest {
    CreatePostRequest {
        user_id,
        title: title.to_string(),
        description: "Conteúdo de teste".to_string(),
        category: Some(category),
        created_at: None,
    }
}

fn services(pool: PgPool, identity: &MockIdentityClient) -> ForumServices {
    ForumServices::new(
        pool,
        IdentityGateway::new(Arc::new(identity.clone()), Duration::from_secs(5)),
    )
}

async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("count query")
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_title_filter_ignores_accents_and_case() {
    let pool = setup_test_db().await.expect("Failed to setup test database");
    let identity = MockIdentityClient::new(vec![User::new(7, "Maria")]);
    let forum = services(pool, &identity);

    forum
        .posts
        .create(post_request(7, "Meu Título Favorito", PostCategory::Health))
        .await
        .unwrap();
    forum
        .posts
        .create(post_request(8, "Receitas", PostCategory::Nutrition))
        .await
        .unwrap();

    let query = PostListQuery {
        filter: PostFilter {
            title: Some("titulo".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let response = forum.posts.list(query).await.unwrap();
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["count"], 1);
    assert_eq!(body["pageSize"], 10);
    assert_eq!(body["data"][0]["title"], "Meu Título Favorito");
    assert_eq!(body["data"][0]["usuario"], serde_json::json!({"id": 7, "name": "Maria"}));
    assert_eq!(identity.batch_calls(), vec![vec![7]]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_count_is_filtered_total_not_page_length() {
    let pool = setup_test_db().await.expect("Failed to setup test database");
    let store = PgPostStore::new(pool);

    for i in 0..5 {
        store
            .create(&post_request(1, &format!("Saúde {}", i), PostCategory::Health))
            .await
            .unwrap();
    }
    store
        .create(&post_request(1, "Geral", PostCategory::General))
        .await
        .unwrap();

    let query = PostListQuery {
        filter: PostFilter {
            category: Some(PostCategory::Health),
            ..Default::default()
        },
        ordering: Ordering::new(PostColumn::Title, SortDirection::Desc),
        pagination: Pagination::new(2, 1),
    };
    let page = store.list(&query).await.unwrap();

    assert_eq!(page.count, 5);
    assert_eq!(
        page.rows.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        vec!["Saúde 3", "Saúde 2"]
    );
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_reported_filter_and_idempotent_reporters() {
    let pool = setup_test_db().await.expect("Failed to setup test database");
    let store = PgPostStore::new(pool);

    let flagged = store
        .create(&post_request(1, "Polêmico", PostCategory::General))
        .await
        .unwrap();
    store
        .create(&post_request(1, "Tranquilo", PostCategory::General))
        .await
        .unwrap();

    store.add_reporter(flagged.id, 5).await.unwrap();
    let post = store.add_reporter(flagged.id, 5).await.unwrap();
    assert_eq!(post.reporter_ids, vec![5]);
    assert!(post.is_reported());

    let reported = PostListQuery {
        filter: PostFilter {
            is_reported: Some(true),
            ..Default::default()
        },
        ..Default::default()
    };
    let page = store.list(&reported).await.unwrap();
    assert_eq!(page.count, 1);
    assert_eq!(page.rows[0].id, flagged.id);

    let clean = PostListQuery {
        filter: PostFilter {
            is_reported: Some(false),
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(store.list(&clean).await.unwrap().rows[0].title, "Tranquilo");

    let err = store.add_reporter(9_999, 5).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_deleting_post_cascades_to_children() {
    let pool = setup_test_db().await.expect("Failed to setup test database");
    let posts = PgPostStore::new(pool.clone());
    let comments = PgCommentStore::new(pool.clone());
    let reports = PgReportStore::new(pool.clone());

    let post = posts
        .create(&post_request(1, "Para apagar", PostCategory::General))
        .await
        .unwrap();
    let comment = comments
        .create(&CreateCommentRequest {
            user_id: 2,
            content: "Comentário".to_string(),
            post_id: post.id,
            created_at: None,
        })
        .await
        .unwrap();
    assert_eq!(comment.post.title, "Para apagar");

    reports
        .create(&CreateReportRequest {
            user_id: 3,
            reason: "Spam".to_string(),
            description: "Repetido".to_string(),
            post_id: post.id,
            created_at: None,
        })
        .await
        .unwrap();

    posts.remove(post.id).await.unwrap();

    assert!(comments.find_by_id(comment.id).await.unwrap().is_none());
    assert_eq!(count_rows(&pool, "reports").await, 0);
    assert!(matches!(
        posts.remove(post.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_children_of_missing_post_are_not_written() {
    let pool = setup_test_db().await.expect("Failed to setup test database");
    let comments = PgCommentStore::new(pool.clone());
    let reports = PgReportStore::new(pool.clone());

    let err = reports
        .create(&CreateReportRequest {
            user_id: 3,
            reason: "Spam".to_string(),
            description: "Post inexistente".to_string(),
            post_id: 4_242,
            created_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ParentNotFound(_)));

    let err = comments
        .create(&CreateCommentRequest {
            user_id: 2,
            content: "Olá".to_string(),
            post_id: 4_242,
            created_at: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ParentNotFound(_)));

    assert_eq!(count_rows(&pool, "reports").await, 0);
    assert_eq!(count_rows(&pool, "comments").await, 0);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_partial_update_keeps_other_fields() {
    let pool = setup_test_db().await.expect("Failed to setup test database");
    let identity = MockIdentityClient::new(vec![User::new(1, "Ana")]);
    let forum = services(pool, &identity);

    let post = forum
        .posts
        .create(post_request(1, "Original", PostCategory::Exercise))
        .await
        .unwrap();
    let updated = forum
        .posts
        .update(
            post.id,
            UpdatePostRequest {
                title: Some("Editado".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Editado");
    assert_eq!(updated.description, post.description);
    assert_eq!(updated.category, PostCategory::Exercise);

    let enriched = forum.posts.find_one(post.id).await.unwrap();
    assert_eq!(enriched.user.clone(), forum_service::enrichment::UserRecord::Found(User::new(1, "Ana")));
    assert_eq!(identity.single_call_count(), 1);
}
