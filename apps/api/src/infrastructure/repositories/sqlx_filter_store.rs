use crate::domain::{
    moderation::{
        custom_filter::CustomFilterRegistration,
        filter_rule::{FilterAction, FilterOperator, FilterRule, FilterSubject},
        store::FilterStore,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct FilterRuleRow {
    id: Uuid,
    action: String,
    subject: String,
    operator: String,
    filter: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<FilterRuleRow> for FilterRule {
    type Error = DomainError;

    fn try_from(row: FilterRuleRow) -> Result<Self, Self::Error> {
        Ok(FilterRule {
            id: row.id,
            action: row.action.parse::<FilterAction>()?,
            subject: row.subject.parse::<FilterSubject>()?,
            operator: row.operator.parse::<FilterOperator>()?,
            filter: row.filter,
            created_at: row.created_at,
        })
    }
}

pub struct SqlxFilterStore {
    pub pool: PgPool,
}

impl SqlxFilterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FilterStore for SqlxFilterStore {
    async fn load_rules(&self) -> Result<Vec<FilterRule>, DomainError> {
        let rows = sqlx::query_as::<_, FilterRuleRow>(
            "SELECT id, action, subject, operator, filter, created_at \
             FROM comment_filters ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut rules = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match FilterRule::try_from(row) {
                Ok(rule) => rules.push(rule),
                Err(e) => tracing::warn!(rule_id = %id, error = %e, "Skipping unreadable filter rule"),
            }
        }
        Ok(rules)
    }

    async fn insert_rule(&self, rule: &FilterRule) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO comment_filters (id, action, subject, operator, filter, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(rule.id)
        .bind(rule.action.as_str())
        .bind(rule.subject.as_str())
        .bind(rule.operator.as_str())
        .bind(&rule.filter)
        .bind(rule.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_rule(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM comment_filters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn load_registrations(&self) -> Result<Vec<CustomFilterRegistration>, DomainError> {
        let rows = sqlx::query_as::<_, CustomFilterRegistration>(
            "SELECT full_name, name, total_checked, total_caught, total_reported, priority, enabled \
             FROM custom_filters",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn save_registration(
        &self,
        registration: &CustomFilterRegistration,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO custom_filters \
                (full_name, name, total_checked, total_caught, total_reported, priority, enabled) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (full_name) DO UPDATE SET \
                name = EXCLUDED.name, \
                total_checked = EXCLUDED.total_checked, \
                total_caught = EXCLUDED.total_caught, \
                total_reported = EXCLUDED.total_reported, \
                priority = EXCLUDED.priority, \
                enabled = EXCLUDED.enabled",
        )
        .bind(&registration.full_name)
        .bind(&registration.name)
        .bind(registration.total_checked)
        .bind(registration.total_caught)
        .bind(registration.total_reported)
        .bind(registration.priority)
        .bind(registration.enabled)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
