//! Shared moderation state: the rule table, the custom filter registrations and
//! the spam filter implementations, loaded once and written through to the store.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::registry::SpamFilterRegistry;
use crate::domain::moderation::custom_filter::{
    CustomFilterRegistration, SpamFilter, sort_for_dispatch,
};
use crate::domain::moderation::filter_rule::{
    FilterAction, FilterOperator, FilterRule, FilterSubject,
};
use crate::domain::moderation::store::FilterStore;
use crate::domain::shared::errors::DomainError;

pub struct ModerationContext {
    store: Arc<dyn FilterStore>,
    registry: SpamFilterRegistry,
    rules: RwLock<Vec<FilterRule>>,
    registrations: Mutex<Vec<CustomFilterRegistration>>,
}

impl ModerationContext {
    /// Load both tables and register any compiled-in filter the store has not seen yet.
    ///
    /// A failure to read the registration table is logged and leaves the custom
    /// filter stage empty; rule loading failures are returned.
    pub async fn load(
        store: Arc<dyn FilterStore>,
        registry: SpamFilterRegistry,
    ) -> Result<Self, DomainError> {
        let rules = store.load_rules().await?;
        let (registrations, registrations_loaded) = match store.load_registrations().await {
            Ok(rows) => (rows, true),
            Err(e) => {
                tracing::warn!(error = %e, "Could not load custom filter registrations, custom filters disabled");
                (Vec::new(), false)
            }
        };

        let context = Self {
            store,
            registry,
            rules: RwLock::new(rules),
            registrations: Mutex::new(registrations),
        };

        if registrations_loaded {
            context.sync_registrations().await?;
        }

        tracing::info!(
            rules = context.rules.read().await.len(),
            custom_filters = context.registrations.lock().await.len(),
            "Moderation context loaded"
        );
        Ok(context)
    }

    pub fn registry(&self) -> &SpamFilterRegistry {
        &self.registry
    }

    pub fn spam_filter(&self, full_name: &str) -> Option<Arc<dyn SpamFilter>> {
        self.registry.get(full_name)
    }

    /// Read access to the rule table in store order.
    pub async fn read_rules(&self) -> tokio::sync::RwLockReadGuard<'_, Vec<FilterRule>> {
        self.rules.read().await
    }

    pub async fn rules(&self) -> Vec<FilterRule> {
        self.rules.read().await.clone()
    }

    /// Append a rule. An existing rule on the same subject and pattern is removed first.
    pub async fn add_rule(&self, rule: FilterRule) -> Result<FilterRule, DomainError> {
        if rule.filter.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Filter pattern cannot be empty".to_string(),
            ));
        }

        let mut rules = self.rules.write().await;

        let duplicates: Vec<Uuid> = rules
            .iter()
            .filter(|existing| existing.same_target(&rule))
            .map(|existing| existing.id)
            .collect();
        for id in duplicates {
            self.store.delete_rule(id).await?;
            rules.retain(|existing| existing.id != id);
            tracing::info!(
                rule_id = %id,
                subject = %rule.subject,
                filter = %rule.filter,
                "Replacing existing filter rule for the same subject and pattern"
            );
        }

        self.store.insert_rule(&rule).await?;
        rules.push(rule.clone());
        tracing::info!(
            rule_id = %rule.id,
            action = %rule.action,
            subject = %rule.subject,
            operator = %rule.operator,
            "Filter rule added"
        );
        Ok(rule)
    }

    /// Allow or block an IP address. Blank input is ignored.
    pub async fn add_ip_to_filter(
        &self,
        ip: &str,
        is_spam: bool,
    ) -> Result<Option<FilterRule>, DomainError> {
        let ip = ip.trim();
        if ip.is_empty() {
            return Ok(None);
        }
        let rule = FilterRule::new(
            FilterAction::for_spam(is_spam),
            FilterSubject::Ip,
            FilterOperator::Equals,
            ip,
        );
        self.add_rule(rule).await.map(Some)
    }

    /// Allow or block an email address. Values without an `@` are ignored.
    pub async fn add_email_to_filter(
        &self,
        email: &str,
        is_spam: bool,
    ) -> Result<Option<FilterRule>, DomainError> {
        let email = email.trim();
        if !email.contains('@') {
            tracing::debug!(email, "Ignoring email filter without '@'");
            return Ok(None);
        }
        let rule = FilterRule::new(
            FilterAction::for_spam(is_spam),
            FilterSubject::Email,
            FilterOperator::Equals,
            email,
        );
        self.add_rule(rule).await.map(Some)
    }

    pub async fn remove_rule(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rules = self.rules.write().await;
        let removed = self.store.delete_rule(id).await?;
        rules.retain(|rule| rule.id != id);
        if removed {
            tracing::info!(rule_id = %id, "Filter rule removed");
        }
        Ok(removed)
    }

    /// Registrations in dispatch order.
    pub async fn registrations(&self) -> Vec<CustomFilterRegistration> {
        let mut rows = self.registrations.lock().await.clone();
        sort_for_dispatch(&mut rows);
        rows
    }

    pub async fn update_registration(
        &self,
        full_name: &str,
        priority: Option<i32>,
        enabled: Option<bool>,
    ) -> Result<CustomFilterRegistration, DomainError> {
        let mut registrations = self.registrations.lock().await;
        let row = registrations
            .iter_mut()
            .find(|row| row.full_name == full_name)
            .ok_or_else(|| DomainError::NotFound(format!("Custom filter {}", full_name)))?;

        if let Some(priority) = priority {
            row.priority = priority;
        }
        if let Some(enabled) = enabled {
            row.enabled = enabled;
        }
        self.store.save_registration(row).await?;
        Ok(row.clone())
    }

    /// Append a zero-counter row for every compiled-in filter missing from the table.
    pub async fn sync_registrations(&self) -> Result<usize, DomainError> {
        let mut registrations = self.registrations.lock().await;
        let mut next_priority = registrations
            .iter()
            .map(|row| row.priority + 1)
            .max()
            .unwrap_or(0);
        let mut added = 0;

        for filter in self.registry.iter() {
            if registrations
                .iter()
                .any(|row| row.full_name == filter.full_name())
            {
                continue;
            }
            let row =
                CustomFilterRegistration::discovered(filter.full_name(), filter.name(), next_priority);
            self.store.save_registration(&row).await?;
            tracing::info!(filter = filter.full_name(), priority = next_priority, "Registered custom filter");
            registrations.push(row);
            next_priority += 1;
            added += 1;
        }

        Ok(added)
    }

    /// Count one check, and one catch when `caught`, then persist the row.
    pub async fn record_check(&self, full_name: &str, caught: bool) -> Result<(), DomainError> {
        self.bump(full_name, |row| {
            row.total_checked += 1;
            if caught {
                row.total_caught += 1;
            }
        })
        .await
    }

    pub async fn record_report(&self, full_name: &str) -> Result<(), DomainError> {
        self.bump(full_name, |row| row.total_reported += 1).await
    }

    async fn bump<F>(&self, full_name: &str, update: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut CustomFilterRegistration),
    {
        let mut registrations = self.registrations.lock().await;
        let Some(row) = registrations.iter_mut().find(|row| row.full_name == full_name) else {
            return Err(DomainError::NotFound(format!("Custom filter {}", full_name)));
        };
        update(row);
        self.store.save_registration(row).await
    }
}
