//! Message module - Conversation turn records
//!
//! Defines the stored `Message`, its `Role`, and the `MessageDraft` used to
//! create new messages.

mod draft;
mod record;
mod role;

pub use draft::MessageDraft;
pub use record::Message;
pub use role::Role;
