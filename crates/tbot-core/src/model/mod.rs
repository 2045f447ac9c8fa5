//! Telegram Bot API inbound objects.
//!
//! Field names follow the wire format; see <https://core.telegram.org/bots/api#available-types>.

mod chat;
mod media;
mod message;
mod update;


pub use chat::{Chat, User};
pub use media::{
    Audio, Contact, Document, File, Location, PhotoSize, Sticker, UserProfilePhotos, Video, Voice,
};
pub use message::{Message, MessageKind};
pub use update::{Update, UpdateEvent};
