//! In-process identity client for unit tests.

use async_trait::async_trait;
use identity_client::{IdentityClient, IdentityError, User};
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

/// Knows every id except those in `unknown`; records each call.
#[derive(Default)]
pub struct FakeIdentityClient {
    pub unknown: HashSet<i32>,
    pub delay: Option<Duration>,
    pub fail: bool,
    pub single_calls: Mutex<Vec<i32>>,
    pub batch_calls: Mutex<Vec<Vec<i32>>>,
}

impl FakeIdentityClient {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn without(ids: impl IntoIterator<Item = i32>) -> Self {
        Self {
            unknown: ids.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn batches(&self) -> Vec<Vec<i32>> {
        self.batch_calls.lock().unwrap().clone()
    }

    pub fn singles(&self) -> Vec<i32> {
        self.single_calls.lock().unwrap().clone()
    }

    async fn respond(&self) -> identity_client::Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(IdentityError::Transport("connection reset".into()));
        }
        Ok(())
    }

    fn user(&self, id: i32) -> Option<User> {
        (!self.unknown.contains(&id)).then(|| User::new(id, format!("user-{}", id)))
    }
}

#[async_trait]
impl IdentityClient for FakeIdentityClient {
    async fn get_user(&self, user_id: i32) -> identity_client::Result<Option<User>> {
        self.single_calls.lock().unwrap().push(user_id);
        self.respond().await?;
        Ok(self.user(user_id))
    }

    async fn get_users(&self, user_ids: &[i32]) -> identity_client::Result<Vec<User>> {
        self.batch_calls.lock().unwrap().push(user_ids.to_vec());
        self.respond().await?;
        Ok(user_ids.iter().filter_map(|id| self.user(*id)).collect())
    }
}
