//! # tbot-core
//!
//! Core types, traits, configuration, and error handling for the tbot client.

pub mod config;
pub mod error;
pub mod model;
pub mod request;
pub mod traits;
