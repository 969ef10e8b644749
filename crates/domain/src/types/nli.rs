//! Natural-language query types

use serde::{Deserialize, Serialize};

/// Body of a natural-language query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NliRequest {
    pub input: String,
    #[serde(default)]
    pub confirmed: bool,
}

/// Assistant reply; `need_confirm` asks the caller to resend with
/// `confirmed = true` before a side-effecting command is executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NliReply {
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub need_confirm: bool,
}
