//! Wire types shared by the audit service and its clients.
//!
//! Field names follow the camelCase spelling the audit pages already use.

mod assets;
mod id;
mod people;
mod site;

pub use assets::*;
pub use id::{RecordId, present};
pub use people::*;
pub use site::*;

/// `{message, id?}` returned by every create, update and delete.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MessageReply {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TotalReply {
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerifyReply {
    pub success: bool,
    pub role: Option<String>,
}
