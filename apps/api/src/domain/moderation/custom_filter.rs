use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::comment::entity::Comment;

/// A pluggable spam detector run after the built-in rules have had their say.
#[async_trait]
pub trait SpamFilter: Send + Sync {
    /// Unique key the filter is registered and persisted under.
    fn full_name(&self) -> &'static str;

    /// Short name written into `Comment::moderated_by` when the filter catches spam.
    fn name(&self) -> &'static str;

    /// Whether the filter can run at all (credentials present, model loaded, ...).
    async fn initialize(&self) -> bool {
        true
    }

    /// Returns `true` when the comment is spam.
    async fn check(&self, comment: &Comment) -> anyhow::Result<bool>;

    /// Told when an administrator reports that the filter got a comment wrong.
    async fn report(&self, _comment: &Comment) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Persisted bookkeeping for one custom filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct CustomFilterRegistration {
    pub full_name: String,
    pub name: String,
    pub total_checked: i64,
    pub total_caught: i64,
    pub total_reported: i64,
    pub priority: i32,
    pub enabled: bool,
}

impl CustomFilterRegistration {
    pub fn discovered(full_name: &str, name: &str, priority: i32) -> Self {
        Self {
            full_name: full_name.to_string(),
            name: name.to_string(),
            total_checked: 0,
            total_caught: 0,
            total_reported: 0,
            priority,
            enabled: true,
        }
    }
}

/// Run order: priority first, then name.
pub fn sort_for_dispatch(registrations: &mut [CustomFilterRegistration]) {
    registrations.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
}
