//! Conversations service for Slack API.
//!
//! Lists private channels and reads their history and thread replies.

mod requests;
mod service;

pub use requests::*;
pub use service::*;
