//! Count + page queries over one table source.
//!
//! Both statements share the same filter predicates, so `count` is always
//! the size of the filtered set regardless of the page window. Both run in
//! one read-only `REPEATABLE READ` transaction, so they see the same rows.

use super::filter::{Conditions, FilterSet};
use super::ordering::{Ordering, SortColumn};
use super::pagination::Pagination;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row};

/// Static description of where an entity's rows come from
#[derive(Debug, Clone, Copy)]
pub struct TableSource {
    /// `FROM` clause, including joins
    pub from: &'static str,
    /// Select list
    pub columns: &'static str,
    /// Alias owning the filter and sort columns
    pub alias: &'static str,
}

/// Count and page read from one snapshot
pub const READ_SNAPSHOT: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// Rows of one page plus the total filtered count
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub count: i64,
}

pub fn count_query<F: FilterSet>(source: &TableSource, filter: &F) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", source.from));
    filter.apply(&mut Conditions::new(&mut builder, source.alias));
    builder
}

pub fn page_query<F, C>(
    source: &TableSource,
    filter: &F,
    ordering: &Ordering<C>,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres>
where
    F: FilterSet,
    C: SortColumn,
{
    let mut builder =
        QueryBuilder::new(format!("SELECT {} FROM {}", source.columns, source.from));
    filter.apply(&mut Conditions::new(&mut builder, source.alias));

    let (column, direction) = ordering.build();
    builder.push(format!(" ORDER BY {}.{} {}", source.alias, column, direction));
    // Stable pages when the sort key has duplicates
    if ordering.column() != C::default() {
        builder.push(format!(", {}.\"id\" ASC", source.alias));
    }

    builder.push(" LIMIT ");
    builder.push_bind(pagination.limit());
    builder.push(" OFFSET ");
    builder.push_bind(pagination.offset());
    builder
}

/// Run the count and page statements for one list request
pub async fn fetch_page<T, F, C>(
    pool: &PgPool,
    source: &TableSource,
    filter: &F,
    ordering: &Ordering<C>,
    pagination: Pagination,
) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    F: FilterSet,
    C: SortColumn,
{
    let mut tx = pool.begin().await?;
    sqlx::query(READ_SNAPSHOT).execute(&mut *tx).await?;

    let mut count = count_query(source, filter);
    let count: i64 = count.build().fetch_one(&mut *tx).await?.try_get(0)?;

    let mut page = page_query(source, filter, ordering, pagination);
    let rows = page.build_query_as::<T>().fetch_all(&mut *tx).await?;

    tx.commit().await?;

    tracing::debug!(
        from = source.from,
        count = count,
        returned = rows.len(),
        limit = pagination.limit(),
        offset = pagination.offset(),
        "Fetched page"
    );

    Ok(Page { rows, count })
}
