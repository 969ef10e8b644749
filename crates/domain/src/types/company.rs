//! Company (customer/supplier master data) types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ResourceId;
use super::Resource;

/// Company record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    /// Fields this client does not interpret are carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource for Company {
    fn resource_id(&self) -> Option<ResourceId> {
        self.id
    }
}

/// Create/update body for a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
}
