use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::domain::moderation::filter_rule::{FilterAction, FilterOperator, FilterSubject};

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct AddFilterRuleRequest {
    pub action: FilterAction,
    pub subject: FilterSubject,
    pub operator: FilterOperator,
    #[validate(length(min = 1, max = 500))]
    pub filter: String,
}

/// Body of the allow/block shortcuts for a single IP or email.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListEntryRequest {
    pub value: String,
    #[serde(default)]
    pub is_spam: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct UpdateCustomFilterRequest {
    #[validate(range(min = 0, max = 1000))]
    pub priority: Option<i32>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MistakeReportResponse {
    pub comment_id: uuid::Uuid,
    pub reported_filters: Vec<String>,
}
