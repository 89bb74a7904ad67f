//! Current-user lookup used to tag outbound toll events

use crate::gateway::errors::GatewayResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User record returned by the identity lookup. Only `email` is consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserRecord {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            id: None,
            full_name: None,
            role: None,
        }
    }
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn current_user(&self) -> GatewayResult<UserRecord>;
}

#[async_trait]
impl<R: IdentityResolver + ?Sized> IdentityResolver for Arc<R> {
    async fn current_user(&self) -> GatewayResult<UserRecord> {
        (**self).current_user().await
    }
}

/// Resolver that always answers with the same user
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user: UserRecord,
}

impl StaticIdentity {
    pub fn new(user: UserRecord) -> Self {
        Self { user }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self::new(UserRecord::with_email(email))
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentity {
    async fn current_user(&self) -> GatewayResult<UserRecord> {
        Ok(self.user.clone())
    }
}
