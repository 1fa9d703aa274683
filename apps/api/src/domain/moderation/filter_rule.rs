use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::shared::errors::DomainError;

/// What happens to a comment when a filter rule matches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FilterAction {
    Allow,
    Block,
    Delete,
}

/// The comment field a filter rule is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FilterSubject {
    #[serde(rename = "IP")]
    Ip,
    Author,
    Website,
    Email,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum FilterOperator {
    Equals,
    Contains,
}

impl FilterAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Block => "Block",
            Self::Delete => "Delete",
        }
    }

    pub fn for_spam(is_spam: bool) -> Self {
        if is_spam { Self::Block } else { Self::Allow }
    }
}

impl FilterSubject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip => "IP",
            Self::Author => "Author",
            Self::Website => "Website",
            Self::Email => "Email",
            Self::Comment => "Comment",
        }
    }
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::Contains => "Contains",
        }
    }
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FilterSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "block" => Ok(Self::Block),
            "delete" => Ok(Self::Delete),
            other => Err(DomainError::ValidationError(format!(
                "Unknown filter action: {}",
                other
            ))),
        }
    }
}

impl FromStr for FilterSubject {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ip" => Ok(Self::Ip),
            "author" => Ok(Self::Author),
            "website" => Ok(Self::Website),
            "email" => Ok(Self::Email),
            "comment" => Ok(Self::Comment),
            other => Err(DomainError::ValidationError(format!(
                "Unknown filter subject: {}",
                other
            ))),
        }
    }
}

impl FromStr for FilterOperator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equals" => Ok(Self::Equals),
            "contains" => Ok(Self::Contains),
            other => Err(DomainError::ValidationError(format!(
                "Unknown filter operator: {}",
                other
            ))),
        }
    }
}

/// One administrator defined moderation rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterRule {
    pub id: Uuid,
    pub action: FilterAction,
    pub subject: FilterSubject,
    pub operator: FilterOperator,
    pub filter: String,
    pub created_at: DateTime<Utc>,
}

impl FilterRule {
    pub fn new(
        action: FilterAction,
        subject: FilterSubject,
        operator: FilterOperator,
        filter: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            action,
            subject,
            operator,
            filter: filter.into(),
            created_at: Utc::now(),
        }
    }

    /// The pattern as it is compared: trimmed and lower-cased.
    pub fn normalized_filter(&self) -> String {
        self.filter.trim().to_lowercase()
    }

    /// Two rules target the same thing when subject and pattern agree,
    /// whatever their action or operator.
    pub fn same_target(&self, other: &FilterRule) -> bool {
        self.subject == other.subject && self.normalized_filter() == other.normalized_filter()
    }
}
