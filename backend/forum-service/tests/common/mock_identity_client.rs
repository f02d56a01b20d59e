//! Mock IdentityClient for Integration Tests
//!
//! In-memory stand-in for the identity service. Counts calls so tests can
//! verify that a page is enriched with a single batched lookup.

use async_trait::async_trait;
use identity_client::{IdentityClient, IdentityError, User};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockIdentityClient {
    users: Arc<Mutex<HashMap<i32, User>>>,
    batch_calls: Arc<Mutex<Vec<Vec<i32>>>>,
    single_call_count: Arc<Mutex<usize>>,
    delay: Option<Duration>,
    unreachable: bool,
}

impl MockIdentityClient {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users.into_iter().map(|u| (u.id, u)).collect())),
            ..Default::default()
        }
    }

    /// Answers only after `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call fails at the transport level
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn batch_calls(&self) -> Vec<Vec<i32>> {
        self.batch_calls.lock().unwrap().clone()
    }

    pub fn single_call_count(&self) -> usize {
        *self.single_call_count.lock().unwrap()
    }

    async fn before_reply(&self) -> identity_client::Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unreachable {
            return Err(IdentityError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityClient for MockIdentityClient {
    async fn get_user(&self, user_id: i32) -> identity_client::Result<Option<User>> {
        *self.single_call_count.lock().unwrap() += 1;
        self.before_reply().await?;
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }

    async fn get_users(&self, user_ids: &[i32]) -> identity_client::Result<Vec<User>> {
        self.batch_calls.lock().unwrap().push(user_ids.to_vec());
        self.before_reply().await?;
        let users = self.users.lock().unwrap();
        Ok(user_ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }
}
