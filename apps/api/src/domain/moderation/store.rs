use async_trait::async_trait;
use uuid::Uuid;

use super::custom_filter::CustomFilterRegistration;
use super::filter_rule::FilterRule;
use crate::domain::shared::errors::DomainError;

/// Persistence boundary for the moderation tables.
#[async_trait]
pub trait FilterStore: Send + Sync {
    /// Rules in insertion order.
    async fn load_rules(&self) -> Result<Vec<FilterRule>, DomainError>;
    async fn insert_rule(&self, rule: &FilterRule) -> Result<(), DomainError>;
    /// Returns whether a rule was removed.
    async fn delete_rule(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn load_registrations(&self) -> Result<Vec<CustomFilterRegistration>, DomainError>;
    /// Insert or overwrite the row keyed by `full_name`.
    async fn save_registration(
        &self,
        registration: &CustomFilterRegistration,
    ) -> Result<(), DomainError>;
}
