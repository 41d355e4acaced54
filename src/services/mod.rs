//! Service implementations for Slack API endpoints.
//!
//! Each service drives one family of paged read endpoints through the
//! shared paginator.

pub mod conversations;
pub mod users;

pub use conversations::{ConversationsService, ConversationsServiceTrait};
pub use users::{UsersService, UsersServiceTrait};
