/// Database access layer for forum-service
///
/// - pool: connection pool creation and schema bootstrap
/// - post_repo / comment_repo / report_repo: one store trait per entity plus
///   its PostgreSQL implementation
pub mod comment_repo;
pub mod pool;
pub mod post_repo;
pub mod report_repo;

pub use comment_repo::{CommentStore, PgCommentStore};
pub use pool::{create_pool, ping, run_migrations};
pub use post_repo::{PgPostStore, PostStore};
pub use report_repo::{PgReportStore, ReportStore};

#[cfg(test)]
pub use comment_repo::MockCommentStore;
#[cfg(test)]
pub use post_repo::MockPostStore;
#[cfg(test)]
pub use report_repo::MockReportStore;
