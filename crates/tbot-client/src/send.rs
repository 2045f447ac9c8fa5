//! Typed wrappers for the outgoing Bot API operations.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tbot_core::{
    error::TbotError,
    model::{File, Message, UserProfilePhotos},
    request::{
        ChatAction, ChatTarget, GetFileRequest, OutgoingAudio, OutgoingChatAction,
        OutgoingDocument, OutgoingForward, OutgoingLocation, OutgoingMessage, OutgoingPhoto,
        OutgoingSticker, OutgoingVideo, OutgoingVoice, Request, UserProfilePhotosRequest,
    },
    traits::decode,
};
use tracing::debug;

use crate::bot::BotApi;

impl BotApi {
    /// Send any request and return the raw `result`.
    pub async fn invoke(&self, request: impl Into<Request>) -> Result<Value, TbotError> {
        let request = request.into();
        let method = request.method();
        let payload = request.into_payload()?;
        debug!("telegram {method}");
        self.transport.call(method, payload).await
    }

    async fn invoke_as<T: DeserializeOwned>(
        &self,
        request: impl Into<Request>,
    ) -> Result<T, TbotError> {
        decode(self.invoke(request).await?)
    }

    pub async fn send_message(&self, message: OutgoingMessage) -> Result<Message, TbotError> {
        self.invoke_as(message).await
    }

    /// Send plain text with no extra options.
    pub async fn send_text(
        &self,
        chat: impl Into<ChatTarget>,
        text: &str,
    ) -> Result<Message, TbotError> {
        self.send_message(OutgoingMessage::new(chat, text)).await
    }

    pub async fn forward_message(&self, forward: OutgoingForward) -> Result<Message, TbotError> {
        self.invoke_as(forward).await
    }

    pub async fn send_location(&self, location: OutgoingLocation) -> Result<Message, TbotError> {
        self.invoke_as(location).await
    }

    /// Show an activity indicator (e.g. "typing") in a chat.
    pub async fn send_chat_action(
        &self,
        chat: impl Into<ChatTarget>,
        action: ChatAction,
    ) -> Result<(), TbotError> {
        let _: bool = self
            .invoke_as(OutgoingChatAction::new(chat, action))
            .await?;
        Ok(())
    }

    pub async fn send_photo(&self, photo: OutgoingPhoto) -> Result<Message, TbotError> {
        self.invoke_as(photo).await
    }

    pub async fn send_audio(&self, audio: OutgoingAudio) -> Result<Message, TbotError> {
        self.invoke_as(audio).await
    }

    pub async fn send_document(&self, document: OutgoingDocument) -> Result<Message, TbotError> {
        self.invoke_as(document).await
    }

    pub async fn send_sticker(&self, sticker: OutgoingSticker) -> Result<Message, TbotError> {
        self.invoke_as(sticker).await
    }

    pub async fn send_video(&self, video: OutgoingVideo) -> Result<Message, TbotError> {
        self.invoke_as(video).await
    }

    pub async fn send_voice(&self, voice: OutgoingVoice) -> Result<Message, TbotError> {
        self.invoke_as(voice).await
    }

    pub async fn get_user_profile_photos(
        &self,
        request: UserProfilePhotosRequest,
    ) -> Result<UserProfilePhotos, TbotError> {
        self.invoke_as(request).await
    }

    /// Look up a file for download. See [`HttpTransport::file_url`](crate::HttpTransport::file_url).
    pub async fn get_file(&self, file_id: &str) -> Result<File, TbotError> {
        self.invoke_as(GetFileRequest {
            file_id: file_id.to_string(),
        })
        .await
    }
}
