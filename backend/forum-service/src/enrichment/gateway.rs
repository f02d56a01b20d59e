use crate::error::{AppError, Result};
use crate::metrics::identity::record_lookup;
use identity_client::{IdentityClient, User};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Bounded access to the identity service.
///
/// Each call site issues at most one request. There are no retries: a
/// timeout or transport failure fails the caller's request.
#[derive(Clone)]
pub struct IdentityGateway {
    client: Arc<dyn IdentityClient>,
    timeout: Duration,
}

impl IdentityGateway {
    pub fn new(client: Arc<dyn IdentityClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a single user. `Ok(None)` when the identity service has no such user.
    pub async fn lookup_one(&self, user_id: i32) -> Result<Option<User>> {
        tracing::debug!(user_id = user_id, "Looking up user");
        self.bounded("one", self.client.get_user(user_id)).await
    }

    /// Fetch all distinct users among `user_ids` in one batched request.
    pub async fn lookup_many(&self, user_ids: &[i32]) -> Result<HashMap<i32, User>> {
        let ids = dedup_ids(user_ids.iter().copied());
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        tracing::debug!(requested = user_ids.len(), distinct = ids.len(), "Looking up users");
        let users = self.bounded("many", self.client.get_users(&ids)).await?;

        if users.len() < ids.len() {
            tracing::debug!(
                distinct = ids.len(),
                found = users.len(),
                "Identity service omitted some users"
            );
        }

        Ok(users.into_iter().map(|user| (user.id, user)).collect())
    }

    async fn bounded<T, F>(&self, kind: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = identity_client::Result<T>>,
    {
        let started = Instant::now();
        match timeout(self.timeout, call).await {
            Ok(Ok(value)) => {
                record_lookup(kind, "ok", started.elapsed());
                Ok(value)
            }
            Ok(Err(e)) => {
                let err = AppError::from(e);
                let outcome = match err {
                    AppError::EnrichmentTimeout(_) => "timeout",
                    _ => "error",
                };
                record_lookup(kind, outcome, started.elapsed());
                tracing::warn!(kind = kind, error = %err, "Identity lookup failed");
                Err(err)
            }
            Err(_) => {
                record_lookup(kind, "timeout", started.elapsed());
                tracing::warn!(
                    kind = kind,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Identity lookup timed out"
                );
                Err(AppError::EnrichmentTimeout(self.timeout))
            }
        }
    }
}

/// Distinct ids in first-seen order
pub fn dedup_ids(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
