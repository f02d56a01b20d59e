/// Post service - create, list, read, update, delete and report posts
use crate::db::post_repo::{PostListQuery, PostStore};
use crate::enrichment::{enrich_one, enrich_page, Enriched, IdentityGateway, PaginatedResponse};
use crate::error::Result;
use crate::metrics::queries::record_list;
use crate::models::{CreatePostRequest, Post, UpdatePostRequest};
use std::sync::Arc;
use validator::Validate;

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    gateway: IdentityGateway,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, gateway: IdentityGateway) -> Self {
        Self { store, gateway }
    }

    pub async fn create(&self, req: CreatePostRequest) -> Result<Post> {
        req.validate()?;
        self.store.create(&req).await
    }

    /// One page of posts with owners inlined
    pub async fn list(&self, query: PostListQuery) -> Result<PaginatedResponse<Enriched<Post>>> {
        record_list("posts");
        let page = self.store.list(&query).await?;
        enrich_page(&self.gateway, page, query.pagination).await
    }

    pub async fn find_one(&self, id: i32) -> Result<Enriched<Post>> {
        let post = self.store.find_one_or_fail(id).await?;
        enrich_one(&self.gateway, post).await
    }

    pub async fn update(&self, id: i32, req: UpdatePostRequest) -> Result<Post> {
        req.validate()?;
        self.store.update(id, &req).await
    }

    /// Deletes the post together with its comments and reports
    pub async fn remove(&self, id: i32) -> Result<()> {
        self.store.remove(id).await
    }

    /// Flag a post as reported by `user_id`
    pub async fn add_reporter(&self, id: i32, user_id: i32) -> Result<Post> {
        self.store.add_reporter(id, user_id).await
    }
}
