use super::gateway::IdentityGateway;
use crate::error::Result;
use crate::models::OwnedByUser;
use crate::query::{Page, Pagination};
use identity_client::User;
use serde::Serialize;
use std::collections::HashMap;

/// User attached to a row: the identity record, or a marker when the
/// identity service does not know the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserRecord {
    Found(User),
    Missing {
        id: i32,
        #[serde(rename = "notFound")]
        not_found: bool,
    },
}

impl UserRecord {
    pub fn missing(id: i32) -> Self {
        UserRecord::Missing {
            id,
            not_found: true,
        }
    }

    pub fn resolve(id: i32, user: Option<User>) -> Self {
        user.map(UserRecord::Found)
            .unwrap_or_else(|| UserRecord::missing(id))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, UserRecord::Missing { .. })
    }
}

/// Entity with its owner inlined under `usuario`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enriched<T> {
    #[serde(flatten)]
    pub entity: T,
    #[serde(rename = "usuario")]
    pub user: UserRecord,
}

/// List envelope: `{data, count, pageSize}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    /// Size of the filtered set, independent of the page window
    pub count: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, count: i64, pagination: Pagination) -> Self {
        Self {
            data,
            count,
            page_size: pagination.page_size(),
        }
    }
}

/// Merge rows with users by owner id, keeping row order
pub fn assemble<T: OwnedByUser>(rows: Vec<T>, users: &HashMap<i32, User>) -> Vec<Enriched<T>> {
    rows.into_iter()
        .map(|entity| {
            let owner = entity.owner_id();
            Enriched {
                user: UserRecord::resolve(owner, users.get(&owner).cloned()),
                entity,
            }
        })
        .collect()
}

/// Enrich one page of rows with a single batched lookup
pub async fn enrich_page<T: OwnedByUser>(
    gateway: &IdentityGateway,
    page: Page<T>,
    pagination: Pagination,
) -> Result<PaginatedResponse<Enriched<T>>> {
    let owners: Vec<i32> = page.rows.iter().map(OwnedByUser::owner_id).collect();
    let users = gateway.lookup_many(&owners).await?;
    Ok(PaginatedResponse::new(
        assemble(page.rows, &users),
        page.count,
        pagination,
    ))
}

pub async fn enrich_one<T: OwnedByUser>(gateway: &IdentityGateway, entity: T) -> Result<Enriched<T>> {
    let owner = entity.owner_id();
    let user = gateway.lookup_one(owner).await?;
    Ok(Enriched {
        entity,
        user: UserRecord::resolve(owner, user),
    })
}
