//! # tbot-client
//!
//! Telegram Bot API client: a `reqwest` transport, the long-polling update
//! loop, and typed send operations.
//! Docs: <https://core.telegram.org/bots/api>

pub mod bot;
pub mod http;
mod polling;
mod send;


pub use bot::BotApi;
pub use http::HttpTransport;
pub use polling::{LONG_POLL_TIMEOUT_SECS, RETRY_DELAY};
