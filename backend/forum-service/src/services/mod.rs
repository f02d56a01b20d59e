/// Business logic layer for forum-service
///
/// Each service validates input, calls its store and enriches the rows it
/// returns with owner data from the identity service.
pub mod comments;
pub mod posts;
pub mod reports;

pub use comments::CommentService;
pub use posts::PostService;
pub use reports::ReportService;
