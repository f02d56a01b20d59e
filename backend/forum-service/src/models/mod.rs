/// Data models for forum-service
///
/// - Post: top-level forum item, owns comments and reports
/// - Comment: child item attached to exactly one post
/// - Report: complaint record referencing a post
pub mod comment;
pub mod post;
pub mod report;

pub use comment::{Comment, CommentColumn, CreateCommentRequest, PostSummary, UpdateCommentRequest};
pub use post::{CreatePostRequest, Post, PostCategory, PostColumn, UpdatePostRequest};
pub use report::{CreateReportRequest, Report, ReportColumn, UpdateReportRequest};

/// Rows that belong to a user held by the identity service
pub trait OwnedByUser {
    fn owner_id(&self) -> i32;
}
