/// Report service - complaints filed against posts
use crate::db::report_repo::{ReportListQuery, ReportStore};
use crate::enrichment::{enrich_one, enrich_page, Enriched, IdentityGateway, PaginatedResponse};
use crate::error::Result;
use crate::metrics::queries::record_list;
use crate::models::{CreateReportRequest, Report, UpdateReportRequest};
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ReportStore>,
    gateway: IdentityGateway,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>, gateway: IdentityGateway) -> Self {
        Self { store, gateway }
    }

    /// Fails with `ParentNotFound` and writes nothing when the post is gone
    pub async fn create(&self, req: CreateReportRequest) -> Result<Report> {
        req.validate()?;
        self.store.create(&req).await
    }

    pub async fn list(&self, query: ReportListQuery) -> Result<PaginatedResponse<Enriched<Report>>> {
        record_list("reports");
        let page = self.store.list(&query).await?;
        enrich_page(&self.gateway, page, query.pagination).await
    }

    pub async fn find_one(&self, id: i32) -> Result<Enriched<Report>> {
        let report = self.store.find_one_or_fail(id).await?;
        enrich_one(&self.gateway, report).await
    }

    pub async fn update(&self, id: i32, req: UpdateReportRequest) -> Result<Report> {
        req.validate()?;
        self.store.update(id, &req).await
    }

    pub async fn remove(&self, id: i32) -> Result<()> {
        self.store.remove(id).await
    }
}
