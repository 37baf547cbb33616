//! Notice store trait

use async_trait::async_trait;

use super::entity::{Notice, SessionId};
use crate::domain::DomainError;

/// Holds at most one pending notice per session until it is taken
#[async_trait]
pub trait NoticeStore: Send + Sync + std::fmt::Debug {
    /// Schedule a notice for the next request of the session, replacing any pending one
    async fn put(&self, session: &SessionId, notice: Notice) -> Result<(), DomainError>;

    /// Remove and return the pending notice; a second call yields `None`
    async fn take(&self, session: &SessionId) -> Result<Option<Notice>, DomainError>;
}
