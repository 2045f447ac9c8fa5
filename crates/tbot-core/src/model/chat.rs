use serde::{Deserialize, Serialize};
use std::fmt;

/// A Telegram user or bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id, self.first_name)?;
        if let Some(ref last) = self.last_name {
            write!(f, " {last}")?;
        }
        if let Some(ref username) = self.username {
            write!(f, " (@{username})")?;
        }
        Ok(())
    }
}

/// The chat a message originated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
    /// Title for channels and group chats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// First name of the other party in a private chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Chat {
    pub fn is_private_chat(&self) -> bool {
        self.chat_type == "private"
    }

    /// Groups and supergroups both count.
    pub fn is_group_chat(&self) -> bool {
        matches!(self.chat_type.as_str(), "group" | "supergroup")
    }

    pub fn is_channel(&self) -> bool {
        self.chat_type == "channel"
    }
}

impl fmt::Display for Chat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.is_private_chat() {
            "P"
        } else if self.is_group_chat() {
            "G"
        } else {
            "C"
        };
        write!(f, "{} ({tag})", self.id)?;

        if let Some(ref title) = self.title {
            write!(f, " \"{title}\"")?;
        }
        if let Some(ref first) = self.first_name {
            write!(f, " {first}")?;
        }
        if let Some(ref last) = self.last_name {
            write!(f, " {last}")?;
        }
        if let Some(ref username) = self.username {
            write!(f, " (@{username})")?;
        }
        Ok(())
    }
}
