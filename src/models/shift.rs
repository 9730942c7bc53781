use serde::{Deserialize, Serialize};

use crate::domain::nullable::null_as_default;

use super::company::Staff;

/// A staff member's shift. Timestamps are kept as Kounta formats them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    #[serde(default, deserialize_with = "null_as_default")]
    pub started_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finished_at: String,
    #[serde(rename = "staff_member", default, deserialize_with = "null_as_default")]
    pub staff: Staff,
    #[serde(default, deserialize_with = "null_as_default")]
    pub breaks: Vec<ShiftBreak>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftBreak {
    #[serde(default, deserialize_with = "null_as_default")]
    pub started_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finished_at: String,
}
