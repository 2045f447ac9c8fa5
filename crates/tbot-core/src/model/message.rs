use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::chat::{Chat, User};
use super::media::{Audio, Contact, Document, Location, PhotoSize, Sticker, Video, Voice};

/// A message, as delivered in an update or returned by a send call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    /// Empty for messages posted to channels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    pub chat: Chat,
    /// Unix timestamp.
    #[serde(default)]
    pub date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_from: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Caption for photo, video and document messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    /// Available sizes of the photo, smallest first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_participant: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_chat_participant: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_chat_photo: Option<Vec<PhotoSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_chat_photo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_chat_created: Option<bool>,
}

impl Message {
    pub fn is_forwarded(&self) -> bool {
        self.forward_from.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.reply_to_message.is_some()
    }

    /// When the message was sent, if the timestamp is representable.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.date, 0)
    }

    /// Determine what the message carries.
    ///
    /// Forwarded messages and replies still report their content kind.
    pub fn kind(&self) -> MessageKind {
        if self.text.is_some() {
            MessageKind::Text
        } else if self.audio.is_some() {
            MessageKind::Audio
        } else if self.document.is_some() {
            MessageKind::Document
        } else if self.photo.is_some() {
            MessageKind::Photo
        } else if self.sticker.is_some() {
            MessageKind::Sticker
        } else if self.video.is_some() {
            MessageKind::Video
        } else if self.voice.is_some() {
            MessageKind::Voice
        } else if self.contact.is_some() {
            MessageKind::Contact
        } else if self.location.is_some() {
            MessageKind::Location
        } else if self.new_chat_participant.is_some() {
            MessageKind::NewChatParticipant
        } else if self.left_chat_participant.is_some() {
            MessageKind::LeftChatParticipant
        } else if self.new_chat_title.is_some() {
            MessageKind::NewChatTitle
        } else if self.new_chat_photo.is_some() {
            MessageKind::NewChatPhoto
        } else if self.delete_chat_photo.is_some() {
            MessageKind::DeleteChatPhoto
        } else if self.group_chat_created.is_some() {
            MessageKind::GroupChatCreated
        } else {
            MessageKind::Unknown
        }
    }
}

/// Content kind of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Audio,
    Document,
    Photo,
    Sticker,
    Video,
    Voice,
    Contact,
    Location,
    NewChatParticipant,
    LeftChatParticipant,
    NewChatTitle,
    NewChatPhoto,
    DeleteChatPhoto,
    GroupChatCreated,
    /// Probably a newer API object this client does not model.
    Unknown,
}

impl MessageKind {
    /// Service messages about changes in a group chat.
    pub fn is_chat_action(&self) -> bool {
        matches!(
            self,
            MessageKind::NewChatParticipant
                | MessageKind::LeftChatParticipant
                | MessageKind::NewChatTitle
                | MessageKind::NewChatPhoto
                | MessageKind::DeleteChatPhoto
                | MessageKind::GroupChatCreated
        )
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Text => "Text",
            MessageKind::Audio => "Audio",
            MessageKind::Document => "Document",
            MessageKind::Photo => "Photo",
            MessageKind::Sticker => "Sticker",
            MessageKind::Video => "Video",
            MessageKind::Voice => "Voice",
            MessageKind::Contact => "Contact",
            MessageKind::Location => "Location",
            MessageKind::NewChatParticipant => "NewChatParticipant",
            MessageKind::LeftChatParticipant => "LeftChatParticipant",
            MessageKind::NewChatTitle => "NewChatTitle",
            MessageKind::NewChatPhoto => "NewChatPhoto",
            MessageKind::DeleteChatPhoto => "DeletedChatPhoto",
            MessageKind::GroupChatCreated => "GroupChatCreated",
            MessageKind::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}
