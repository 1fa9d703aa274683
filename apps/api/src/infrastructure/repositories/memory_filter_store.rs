use crate::domain::{
    moderation::{
        custom_filter::CustomFilterRegistration, filter_rule::FilterRule, store::FilterStore,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local moderation tables. Counts registration writes so tests can
/// assert that counters were persisted.
#[derive(Default)]
pub struct InMemoryFilterStore {
    rules: RwLock<Vec<FilterRule>>,
    registrations: RwLock<Vec<CustomFilterRegistration>>,
    registration_writes: AtomicUsize,
}

impl InMemoryFilterStore {
    pub fn with_rules(rules: Vec<FilterRule>) -> Self {
        Self {
            rules: RwLock::new(rules),
            ..Self::default()
        }
    }

    pub fn with_registrations(mut self, registrations: Vec<CustomFilterRegistration>) -> Self {
        self.registrations = RwLock::new(registrations);
        self
    }

    pub fn registration_writes(&self) -> usize {
        self.registration_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilterStore for InMemoryFilterStore {
    async fn load_rules(&self) -> Result<Vec<FilterRule>, DomainError> {
        Ok(self.rules.read().await.clone())
    }

    async fn insert_rule(&self, rule: &FilterRule) -> Result<(), DomainError> {
        self.rules.write().await.push(rule.clone());
        Ok(())
    }

    async fn delete_rule(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rules = self.rules.write().await;
        let before = rules.len();
        rules.retain(|rule| rule.id != id);
        Ok(rules.len() != before)
    }

    async fn load_registrations(&self) -> Result<Vec<CustomFilterRegistration>, DomainError> {
        Ok(self.registrations.read().await.clone())
    }

    async fn save_registration(
        &self,
        registration: &CustomFilterRegistration,
    ) -> Result<(), DomainError> {
        let mut rows = self.registrations.write().await;
        match rows
            .iter_mut()
            .find(|row| row.full_name == registration.full_name)
        {
            Some(row) => *row = registration.clone(),
            None => rows.push(registration.clone()),
        }
        self.registration_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
