/// Comment service - comments always belong to an existing post
use crate::db::comment_repo::{CommentListQuery, CommentStore};
use crate::enrichment::{enrich_one, enrich_page, Enriched, IdentityGateway, PaginatedResponse};
use crate::error::Result;
use crate::metrics::queries::record_list;
use crate::models::{Comment, CreateCommentRequest, UpdateCommentRequest};
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn CommentStore>,
    gateway: IdentityGateway,
}

impl CommentService {
    pub fn new(store: Arc<dyn CommentStore>, gateway: IdentityGateway) -> Self {
        Self { store, gateway }
    }

    pub async fn create(&self, req: CreateCommentRequest) -> Result<Comment> {
        req.validate()?;
        self.store.create(&req).await
    }

    pub async fn list(
        &self,
        query: CommentListQuery,
    ) -> Result<PaginatedResponse<Enriched<Comment>>> {
        record_list("comments");
        let page = self.store.list(&query).await?;
        enrich_page(&self.gateway, page, query.pagination).await
    }

    pub async fn find_one(&self, id: i32) -> Result<Enriched<Comment>> {
        let comment = self.store.find_one_or_fail(id).await?;
        enrich_one(&self.gateway, comment).await
    }

    pub async fn update(&self, id: i32, req: UpdateCommentRequest) -> Result<Comment> {
        req.validate()?;
        self.store.update(id, &req).await
    }

    pub async fn remove(&self, id: i32) -> Result<()> {
        self.store.remove(id).await
    }
}
