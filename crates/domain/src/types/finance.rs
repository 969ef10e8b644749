//! Finance types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ResourceId;
use super::Resource;

/// Aggregated finance statistics. [`Default`] is the zeroed fallback shown
/// when the statistics request fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinanceStatistics {
    #[serde(default)]
    pub total_profit: f64,
    #[serde(default)]
    pub total_turnover: f64,
    #[serde(default)]
    pub total_order_quantity: u64,
    #[serde(default)]
    pub average_profit: f64,
    #[serde(default)]
    pub average_turnover: f64,
}

/// Per-period finance series (profit, turnover, order count)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub profit: Vec<f64>,
    #[serde(default)]
    pub turnover: Vec<f64>,
    #[serde(default)]
    pub order_quantity: Vec<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for FinanceRecord {
    fn resource_id(&self) -> Option<ResourceId> {
        self.id
    }
}

/// Query filters for finance records; empty fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinanceFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl FinanceFilter {
    /// `(name, value)` query pairs for the populated filters.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        [("startDate", &self.start_date), ("endDate", &self.end_date), ("period", &self.period)]
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
            .collect()
    }
}
