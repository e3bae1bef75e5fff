use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::api::validation::parse_checkbox;
use crate::models::cafe::NewCafe;

/// A cafe as emitted by the JSON API, see [`crate::models::cafe::Cafe::to_map`].
pub type CafeMap = Map<String, Value>;

/// `{"response": {"success": "..."}}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub response: SuccessMessage,
}

#[derive(Debug, Serialize)]
pub struct SuccessMessage {
    pub success: String,
}

impl SuccessResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            response: SuccessMessage {
                success: message.into(),
            },
        }
    }
}

/// `{"error": {"<reason>": "<message>"}}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: BTreeMap<String, String>,
}

impl ErrorResponse {
    pub fn new(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: BTreeMap::from([(reason.into(), message.into())]),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RandomCafeResponse {
    pub cafe: CafeMap,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub cafes: Vec<CafeMap>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime: u64,
    pub cafes: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub loc: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceQuery {
    pub new_price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportClosedQuery {
    pub api_key: Option<String>,
}

/// Form-encoded body of `POST /api/add`. Field names follow the public API,
/// not the column names.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddCafeRequest {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub loc: Option<String>,
    pub seats: Option<String>,
    pub toilet: Option<String>,
    pub wifi: Option<String>,
    pub sockets: Option<String>,
    pub calls: Option<String>,
    pub coffee_price: Option<String>,
}

impl AddCafeRequest {
    #[must_use]
    pub fn to_new_cafe(&self) -> NewCafe {
        NewCafe {
            name: trimmed(self.name.as_deref()),
            map_url: trimmed(self.map_url.as_deref()),
            img_url: trimmed(self.img_url.as_deref()),
            location: trimmed(self.loc.as_deref()),
            seats: trimmed(self.seats.as_deref()),
            has_toilet: parse_checkbox(self.toilet.as_deref()),
            has_wifi: parse_checkbox(self.wifi.as_deref()),
            has_sockets: parse_checkbox(self.sockets.as_deref()),
            can_take_calls: parse_checkbox(self.calls.as_deref()),
            coffee_price: optional(self.coffee_price.as_deref()),
        }
    }
}

/// Body of the HTML add form. Field names match the columns.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CafeForm {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub location: Option<String>,
    pub seats: Option<String>,
    pub has_toilet: Option<String>,
    pub has_wifi: Option<String>,
    pub has_sockets: Option<String>,
    pub can_take_calls: Option<String>,
    pub coffee_price: Option<String>,
    pub csrf_token: Option<String>,
}

impl CafeForm {
    #[must_use]
    pub fn to_new_cafe(&self) -> NewCafe {
        NewCafe {
            name: trimmed(self.name.as_deref()),
            map_url: trimmed(self.map_url.as_deref()),
            img_url: trimmed(self.img_url.as_deref()),
            location: trimmed(self.location.as_deref()),
            seats: trimmed(self.seats.as_deref()),
            has_toilet: parse_checkbox(self.has_toilet.as_deref()),
            has_wifi: parse_checkbox(self.has_wifi.as_deref()),
            has_sockets: parse_checkbox(self.has_sockets.as_deref()),
            can_take_calls: parse_checkbox(self.can_take_calls.as_deref()),
            coffee_price: optional(self.coffee_price.as_deref()),
        }
    }
}

fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Blank input means "no value".
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
