//! Identity Service Client
//!
//! Typed client for the identity microservice that owns user records.
//! The forum never persists users; it asks the identity service for them
//! when rendering posts, comments and reports.
//!
//! Two message patterns are supported, mirroring the identity service contract:
//! - `{role: "info", cmd: "get"}` with `{id}` for a single user
//! - `{role: "info", cmd: "getAll"}` with `{ids: [...]}` for a batch
pub mod config;
pub mod http;
pub mod user;

pub use config::IdentityConfig;
pub use http::HttpIdentityClient;
pub use user::User;

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Errors surfaced by identity lookups
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity request timed out after {0:?}")]
    Timeout(Duration),

    #[error("identity transport error: {0}")]
    Transport(String),

    #[error("identity service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid identity response: {0}")]
    InvalidResponse(String),

    #[error("identity client configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;

/// Message pattern understood by the identity service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pattern {
    pub role: &'static str,
    pub cmd: &'static str,
}

impl Pattern {
    pub const GET: Pattern = Pattern {
        role: "info",
        cmd: "get",
    };

    pub const GET_ALL: Pattern = Pattern {
        role: "info",
        cmd: "getAll",
    };
}

/// Read-only access to user records owned by the identity service.
///
/// Implementations perform exactly one outbound request per call. Callers
/// are responsible for bounding latency; see `HttpIdentityClient` for the
/// transport-level timeout.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Fetch one user. `Ok(None)` means the identity service has no such user.
    async fn get_user(&self, user_id: i32) -> Result<Option<User>>;

    /// Fetch many users in one request. Missing users are omitted.
    async fn get_users(&self, user_ids: &[i32]) -> Result<Vec<User>>;
}
