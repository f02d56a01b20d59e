//! List query construction: ordering, pagination, filters and the
//! count/page executor shared by every store.

pub mod executor;
pub mod filter;
pub mod ordering;
pub mod pagination;

pub use executor::{count_query, fetch_page, page_query, Page, TableSource};
pub use filter::{
    escape_like, CommentFilter, Conditions, FilterSet, NoFilter, PostFilter, ReportFilter,
};
pub use ordering::{Ordering, SortColumn, SortDirection};
pub use pagination::{Pagination, PaginationParams, MAX_PAGE_SIZE};

/// Everything a list request carries besides the entity type
#[derive(Debug, Clone, Default)]
pub struct ListQuery<F, C: SortColumn> {
    pub filter: F,
    pub ordering: Ordering<C>,
    pub pagination: Pagination,
}

impl<F, C: SortColumn> ListQuery<F, C> {
    /// Build from raw transport values; never fails
    pub fn from_raw(filter: F, ordering: Option<&str>, params: &PaginationParams) -> Self {
        Self {
            filter,
            ordering: Ordering::parse(ordering),
            pagination: Pagination::from_params(params),
        }
    }
}
