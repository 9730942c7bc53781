use serde::{Deserialize, Serialize};

use crate::domain::nullable::null_as_default;
use crate::domain::{Order, ResourceId};
use crate::errors::KountaResult;

use super::shift::Shift;

/// Topic Kounta fires when a sale is completed.
pub const TOPIC_ORDER_COMPLETED: &str = "orders/completed";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebHook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub topic: String,
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "WebHookFilter::is_empty"
    )]
    pub filter: WebHookFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebHookFilter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_ids: Vec<i64>,
}

impl WebHookFilter {
    pub fn is_empty(&self) -> bool {
        self.site_ids.is_empty()
    }
}

impl WebHook {
    /// Sale-completed hook delivering JSON to `address`, optionally limited
    /// to `site_ids`.
    pub fn sale_completed(address: impl Into<String>, site_ids: Vec<i64>) -> Self {
        Self {
            id: None,
            topic: TOPIC_ORDER_COMPLETED.to_string(),
            address: address.into(),
            format: "json".to_string(),
            filter: WebHookFilter { site_ids },
        }
    }
}

/// Decode the body Kounta posts to an `orders/*` webhook address.
pub fn parse_order_notification(body: &[u8]) -> KountaResult<Order> {
    Ok(serde_json::from_slice(body)?)
}

/// Decode the body Kounta posts to a `shifts/*` webhook address.
pub fn parse_shift_notification(body: &[u8]) -> KountaResult<Shift> {
    Ok(serde_json::from_slice(body)?)
}
