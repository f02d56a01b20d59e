//! User enrichment for forum rows.
//!
//! Rows only store the owner's id; the identity service owns the user
//! record. The gateway fetches users under a bounded timeout and the
//! assembler merges them back into rows.

pub mod assembler;
pub mod gateway;
#[cfg(test)]
pub(crate) mod testing;

pub use assembler::{assemble, enrich_one, enrich_page, Enriched, PaginatedResponse, UserRecord};
pub use gateway::{dedup_ids, IdentityGateway, DEFAULT_LOOKUP_TIMEOUT};
