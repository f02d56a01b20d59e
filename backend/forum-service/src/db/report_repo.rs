use crate::error::{AppError, Result};
use crate::models::{CreateReportRequest, Report, ReportColumn, UpdateReportRequest};
use crate::query::{fetch_page, ListQuery, Page, ReportFilter, TableSource};
use async_trait::async_trait;
use sqlx::PgPool;

pub type ReportListQuery = ListQuery<ReportFilter, ReportColumn>;

const REPORT_COLUMNS: &str = "r.id, r.user_id, r.reason, r.description, r.created_at, r.post_id";

pub const REPORTS: TableSource = TableSource {
    from: "reports r",
    columns: REPORT_COLUMNS,
    alias: "r",
};

/// Persistence for reports
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Insert a report; `ParentNotFound` when the post does not exist
    async fn create(&self, req: &CreateReportRequest) -> Result<Report>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Report>>;

    async fn find_one_or_fail(&self, id: i32) -> Result<Report> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("report {}", id)))
    }

    async fn update(&self, id: i32, req: &UpdateReportRequest) -> Result<Report>;

    async fn remove(&self, id: i32) -> Result<()>;

    async fn list(&self, query: &ReportListQuery) -> Result<Page<Report>>;
}

#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn create(&self, req: &CreateReportRequest) -> Result<Report> {
        let mut tx = self.pool.begin().await?;

        let parent: Option<i32> =
            sqlx::query_scalar("SELECT id FROM posts WHERE id = $1 FOR SHARE")
                .bind(req.post_id)
                .fetch_optional(&mut *tx)
                .await?;
        if parent.is_none() {
            tracing::debug!(post_id = req.post_id, "Report rejected, post missing");
            return Err(AppError::ParentNotFound(format!("post {}", req.post_id)));
        }

        let report = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports AS r (user_id, reason, description, post_id, created_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
            RETURNING r.id, r.user_id, r.reason, r.description, r.created_at, r.post_id
            "#,
        )
        .bind(req.user_id)
        .bind(&req.reason)
        .bind(&req.description)
        .bind(req.post_id)
        .bind(req.created_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            report_id = report.id,
            post_id = report.post_id,
            user_id = report.user_id,
            "Report created"
        );
        Ok(report)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "SELECT {} FROM reports r WHERE r.id = $1",
            REPORT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }

    async fn update(&self, id: i32, req: &UpdateReportRequest) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(
            r#"
            UPDATE reports AS r
            SET reason = COALESCE($2, r.reason),
                description = COALESCE($3, r.description)
            WHERE r.id = $1
            RETURNING r.id, r.user_id, r.reason, r.description, r.created_at, r.post_id
            "#,
        )
        .bind(id)
        .bind(req.reason.as_deref())
        .bind(req.description.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("report {}", id)))?;

        Ok(report)
    }

    async fn remove(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("report {}", id)));
        }

        tracing::info!(report_id = id, "Report removed");
        Ok(())
    }

    async fn list(&self, query: &ReportListQuery) -> Result<Page<Report>> {
        let page = fetch_page(
            &self.pool,
            &REPORTS,
            &query.filter,
            &query.ordering,
            query.pagination,
        )
        .await?;
        Ok(page)
    }
}
