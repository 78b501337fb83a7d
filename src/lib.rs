//! Typed Rust client for the Pushover HTTP API.
//!
//! The crate has a domain layer of strong types, a transport layer for wire-format
//! details, and a small client layer with one client per endpoint: [`MessageClient`],
//! [`ReceiptClient`] and [`ValidateClient`].
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use pushover::{
//!     ClientOptions, EmergencyOptions, MessageClient, MessageText, Priority, ReceiptClient,
//!     ReceiptOptions, SendMessage, UserKey,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pushover::PushoverError> {
//!     let client = MessageClient::new(ClientOptions::new("..."))?;
//!     let emergency = EmergencyOptions::new(Duration::from_secs(600), Duration::from_secs(3600))?;
//!     let request = SendMessage::new(UserKey::new("...")?, MessageText::new("disk full")?)
//!         .with_priority(Priority::Emergency(emergency));
//!     let sent = client.send(request).await?;
//!
//!     if let Some(receipt) = sent.receipt {
//!         let receipts = ReceiptClient::new(ReceiptOptions::new("...", Duration::from_secs(30)))?;
//!         receipts.wait(&receipt, &CancellationToken::new()).await?;
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{
    ClientBuilder, ClientOptions, MessageClient, PushoverError, ReceiptClient, ReceiptOptions,
    ValidateClient,
};
pub use domain::{
    ApiToken, EmergencyOptions, MessageSent, MessageText, PollInterval, Priority, ReceiptId,
    ReceiptPoll, SendMessage, Title, UserKey, ValidationError, ValidationStatus,
};
