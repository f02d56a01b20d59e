/// Forum Service Library
///
/// Posts, comments and reports for the forum, with list queries that
/// filter, order and paginate in SQL and rows enriched with owner data from
/// the identity service.
///
/// # Modules
///
/// - `query`: Ordering, pagination, filter predicates and the page executor
/// - `enrichment`: Bounded identity lookups and response assembly
/// - `models`: Data structures for posts, comments, reports
/// - `services`: Business logic layer
/// - `db`: Database access layer and stores
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use db::{PgCommentStore, PgPostStore, PgReportStore};
use enrichment::IdentityGateway;
use services::{CommentService, PostService, ReportService};
use sqlx::PgPool;
use std::sync::Arc;

/// Entity services sharing one pool and one identity gateway
#[derive(Clone)]
pub struct ForumServices {
    pub posts: PostService,
    pub comments: CommentService,
    pub reports: ReportService,
}

impl ForumServices {
    pub fn new(pool: PgPool, gateway: IdentityGateway) -> Self {
        Self {
            posts: PostService::new(Arc::new(PgPostStore::new(pool.clone())), gateway.clone()),
            comments: CommentService::new(
                Arc::new(PgCommentStore::new(pool.clone())),
                gateway.clone(),
            ),
            reports: ReportService::new(Arc::new(PgReportStore::new(pool)), gateway),
        }
    }
}
