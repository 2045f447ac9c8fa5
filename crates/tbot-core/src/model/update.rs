use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::error::TbotError;

/// One inbound notification.
///
/// Ids are unique and increase over time; the update loop uses them to
/// compute the next polling offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    #[serde(rename = "update_id")]
    pub id: i64,
    /// Absent for update kinds this client does not model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// An item on the update stream: either an update or a surfaced error,
/// in delivery order.
#[derive(Debug)]
pub enum UpdateEvent {
    Update(Update),
    Error(TbotError),
}

impl UpdateEvent {
    pub fn update(&self) -> Option<&Update> {
        match self {
            UpdateEvent::Update(u) => Some(u),
            UpdateEvent::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&TbotError> {
        match self {
            UpdateEvent::Update(_) => None,
            UpdateEvent::Error(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<Update, TbotError> {
        match self {
            UpdateEvent::Update(u) => Ok(u),
            UpdateEvent::Error(e) => Err(e),
        }
    }
}
