//! Outgoing requests.
//!
//! Every remote operation is one [`Request`] variant. A request knows its API
//! method name and encodes itself into a [`Payload`] that any
//! [`Transport`](crate::traits::Transport) can send.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use crate::error::TbotError;
use crate::model::Chat;

#[cfg(test)]
mod tests;

/// Where an outgoing message goes: a chat id or a public channel's `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChatTarget {
    Chat(i64),
    Channel(String),
}

impl From<i64> for ChatTarget {
    fn from(id: i64) -> Self {
        ChatTarget::Chat(id)
    }
}

impl From<&Chat> for ChatTarget {
    // Bots never receive from channels by username, the numeric id always works.
    fn from(chat: &Chat) -> Self {
        ChatTarget::Chat(chat.id)
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Chat(id) => write!(f, "{id}"),
            ChatTarget::Channel(name) => f.write_str(name),
        }
    }
}

/// How the client should render the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
    #[serde(rename = "HTML")]
    Html,
}

/// Activity indicator shown to the user while the bot works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadDocument,
    FindLocation,
}

/// A custom keyboard with reply options.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReplyKeyboardMarkup {
    /// Rows of button labels.
    pub keyboard: Vec<Vec<String>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
    pub selective: bool,
}

impl ReplyKeyboardMarkup {
    pub fn new(keyboard: Vec<Vec<String>>) -> Self {
        Self {
            keyboard,
            ..Default::default()
        }
    }
}

/// Reply markup attached to a message. Only one kind can be set at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    HideKeyboard { selective: bool },
    ForceReply { selective: bool },
}

impl Serialize for ReplyMarkup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReplyMarkup::Keyboard(keyboard) => keyboard.serialize(serializer),
            ReplyMarkup::HideKeyboard { selective } => {
                let mut s = serializer.serialize_struct("ReplyKeyboardHide", 2)?;
                s.serialize_field("hide_keyboard", &true)?;
                s.serialize_field("selective", selective)?;
                s.end()
            }
            ReplyMarkup::ForceReply { selective } => {
                let mut s = serializer.serialize_struct("ForceReply", 2)?;
                s.serialize_field("force_reply", &true)?;
                s.serialize_field("selective", selective)?;
                s.end()
            }
        }
    }
}

/// File content for media uploads.
#[derive(Clone, PartialEq, Eq)]
pub enum InputFile {
    /// Read from disk when the request is sent.
    Path(PathBuf),
    Memory { file_name: String, data: Vec<u8> },
    /// A file already stored on the Telegram servers.
    FileId(String),
}

impl fmt::Debug for InputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFile::Path(path) => f.debug_tuple("Path").field(path).finish(),
            InputFile::Memory { file_name, data } => f
                .debug_struct("Memory")
                .field("file_name", file_name)
                .field("len", &data.len())
                .finish(),
            InputFile::FileId(id) => f.debug_tuple("FileId").field(id).finish(),
        }
    }
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    /// `multipart/form-data` with plain text fields and one file part.
    Multipart {
        fields: Vec<(String, String)>,
        file_field: &'static str,
        file: InputFile,
    },
}

/// Fields shared by everything that sends a message into a chat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingBase {
    pub chat_id: ChatTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl OutgoingBase {
    fn new(chat_id: ChatTarget) -> Self {
        Self {
            chat_id,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }
}

macro_rules! outgoing_base_setters {
    ($($ty:ty),+ $(,)?) => {$(
        impl $ty {
            /// Send the message as a reply to `message_id`.
            pub fn with_reply_to(mut self, message_id: i64) -> Self {
                self.base.reply_to_message_id = Some(message_id);
                self
            }

            /// Attach reply markup, replacing any previously set markup.
            pub fn with_reply_markup(mut self, markup: ReplyMarkup) -> Self {
                self.base.reply_markup = Some(markup);
                self
            }
        }
    )+};
}

outgoing_base_setters!(
    OutgoingMessage,
    OutgoingLocation,
    OutgoingPhoto,
    OutgoingAudio,
    OutgoingDocument,
    OutgoingSticker,
    OutgoingVideo,
    OutgoingVoice,
);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingMessage {
    #[serde(flatten)]
    pub base: OutgoingBase,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,
}

impl OutgoingMessage {
    pub fn new(chat_id: impl Into<ChatTarget>, text: impl Into<String>) -> Self {
        Self {
            base: OutgoingBase::new(chat_id.into()),
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
        }
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn with_disable_web_page_preview(mut self, disable: bool) -> Self {
        self.disable_web_page_preview = disable;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingForward {
    pub chat_id: ChatTarget,
    pub from_chat_id: ChatTarget,
    pub message_id: i64,
}

impl OutgoingForward {
    pub fn new(chat_id: impl Into<ChatTarget>, from: &Chat, message_id: i64) -> Self {
        Self {
            chat_id: chat_id.into(),
            from_chat_id: from.into(),
            message_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingLocation {
    #[serde(flatten)]
    pub base: OutgoingBase,
    pub latitude: f64,
    pub longitude: f64,
}

impl OutgoingLocation {
    pub fn new(chat_id: impl Into<ChatTarget>, latitude: f64, longitude: f64) -> Self {
        Self {
            base: OutgoingBase::new(chat_id.into()),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingChatAction {
    pub chat_id: ChatTarget,
    pub action: ChatAction,
}

impl OutgoingChatAction {
    pub fn new(chat_id: impl Into<ChatTarget>, action: ChatAction) -> Self {
        Self {
            chat_id: chat_id.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingPhoto {
    #[serde(flatten)]
    pub base: OutgoingBase,
    #[serde(skip)]
    pub photo: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl OutgoingPhoto {
    pub fn new(chat_id: impl Into<ChatTarget>, photo: InputFile) -> Self {
        Self {
            base: OutgoingBase::new(chat_id.into()),
            photo,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingAudio {
    #[serde(flatten)]
    pub base: OutgoingBase,
    #[serde(skip)]
    pub audio: InputFile,
    /// Seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl OutgoingAudio {
    pub fn new(chat_id: impl Into<ChatTarget>, audio: InputFile) -> Self {
        Self {
            base: OutgoingBase::new(chat_id.into()),
            audio,
            duration: None,
            performer: None,
            title: None,
        }
    }

    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration = Some(secs);
        self
    }

    pub fn with_performer(mut self, performer: impl Into<String>) -> Self {
        self.performer = Some(performer.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingDocument {
    #[serde(flatten)]
    pub base: OutgoingBase,
    #[serde(skip)]
    pub document: InputFile,
}

impl OutgoingDocument {
    pub fn new(chat_id: impl Into<ChatTarget>, document: InputFile) -> Self {
        Self {
            base: OutgoingBase::new(chat_id.into()),
            document,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingSticker {
    #[serde(flatten)]
    pub base: OutgoingBase,
    #[serde(skip)]
    pub sticker: InputFile,
}

impl OutgoingSticker {
    pub fn new(chat_id: impl Into<ChatTarget>, sticker: InputFile) -> Self {
        Self {
            base: OutgoingBase::new(chat_id.into()),
            sticker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingVideo {
    #[serde(flatten)]
    pub base: OutgoingBase,
    #[serde(skip)]
    pub video: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl OutgoingVideo {
    pub fn new(chat_id: impl Into<ChatTarget>, video: InputFile) -> Self {
        Self {
            base: OutgoingBase::new(chat_id.into()),
            video,
            duration: None,
            caption: None,
        }
    }

    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration = Some(secs);
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingVoice {
    #[serde(flatten)]
    pub base: OutgoingBase,
    #[serde(skip)]
    pub voice: InputFile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl OutgoingVoice {
    pub fn new(chat_id: impl Into<ChatTarget>, voice: InputFile) -> Self {
        Self {
            base: OutgoingBase::new(chat_id.into()),
            voice,
            duration: None,
        }
    }

    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration = Some(secs);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfilePhotosRequest {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// 1-100, the API defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl UserProfilePhotosRequest {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            offset: None,
            limit: None,
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetFileRequest {
    pub file_id: String,
}

/// One remote operation with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    SendMessage(OutgoingMessage),
    ForwardMessage(OutgoingForward),
    SendLocation(OutgoingLocation),
    SendChatAction(OutgoingChatAction),
    SendPhoto(OutgoingPhoto),
    SendAudio(OutgoingAudio),
    SendDocument(OutgoingDocument),
    SendSticker(OutgoingSticker),
    SendVideo(OutgoingVideo),
    SendVoice(OutgoingVoice),
    GetUserProfilePhotos(UserProfilePhotosRequest),
    GetFile(GetFileRequest),
}

impl Request {
    /// Bot API method name.
    pub fn method(&self) -> &'static str {
        match self {
            Request::SendMessage(_) => "sendMessage",
            Request::ForwardMessage(_) => "forwardMessage",
            Request::SendLocation(_) => "sendLocation",
            Request::SendChatAction(_) => "sendChatAction",
            Request::SendPhoto(_) => "sendPhoto",
            Request::SendAudio(_) => "sendAudio",
            Request::SendDocument(_) => "sendDocument",
            Request::SendSticker(_) => "sendSticker",
            Request::SendVideo(_) => "sendVideo",
            Request::SendVoice(_) => "sendVoice",
            Request::GetUserProfilePhotos(_) => "getUserProfilePhotos",
            Request::GetFile(_) => "getFile",
        }
    }

    /// Encode the parameters. Media with a local file become multipart,
    /// everything else is JSON.
    pub fn into_payload(self) -> Result<Payload, TbotError> {
        match self {
            Request::SendMessage(r) => json_payload(&r),
            Request::ForwardMessage(r) => json_payload(&r),
            Request::SendLocation(r) => json_payload(&r),
            Request::SendChatAction(r) => json_payload(&r),
            Request::GetUserProfilePhotos(r) => json_payload(&r),
            Request::GetFile(r) => json_payload(&r),
            Request::SendPhoto(r) => media_payload(serde_json::to_value(&r)?, "photo", r.photo),
            Request::SendAudio(r) => media_payload(serde_json::to_value(&r)?, "audio", r.audio),
            Request::SendDocument(r) => {
                media_payload(serde_json::to_value(&r)?, "document", r.document)
            }
            Request::SendSticker(r) => {
                media_payload(serde_json::to_value(&r)?, "sticker", r.sticker)
            }
            Request::SendVideo(r) => media_payload(serde_json::to_value(&r)?, "video", r.video),
            Request::SendVoice(r) => media_payload(serde_json::to_value(&r)?, "voice", r.voice),
        }
    }
}

fn json_payload<T: Serialize>(body: &T) -> Result<Payload, TbotError> {
    Ok(Payload::Json(serde_json::to_value(body)?))
}

fn media_payload(
    mut body: Value,
    file_field: &'static str,
    file: InputFile,
) -> Result<Payload, TbotError> {
    match file {
        InputFile::FileId(id) => {
            if let Value::Object(ref mut map) = body {
                map.insert(file_field.to_string(), Value::String(id));
            }
            Ok(Payload::Json(body))
        }
        file => Ok(Payload::Multipart {
            fields: form_fields(body),
            file_field,
            file,
        }),
    }
}

/// Flatten a JSON object into form fields. Nested values (reply markup)
/// are sent as JSON text, which is what the API expects.
fn form_fields(body: Value) -> Vec<(String, String)> {
    match body {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect(),
        _ => Vec::new(),
    }
}

macro_rules! request_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {$(
        impl From<$ty> for Request {
            fn from(r: $ty) -> Self {
                Request::$variant(r)
            }
        }
    )+};
}

request_from!(
    SendMessage(OutgoingMessage),
    ForwardMessage(OutgoingForward),
    SendLocation(OutgoingLocation),
    SendChatAction(OutgoingChatAction),
    SendPhoto(OutgoingPhoto),
    SendAudio(OutgoingAudio),
    SendDocument(OutgoingDocument),
    SendSticker(OutgoingSticker),
    SendVideo(OutgoingVideo),
    SendVoice(OutgoingVoice),
    GetUserProfilePhotos(UserProfilePhotosRequest),
    GetFile(GetFileRequest),
);
