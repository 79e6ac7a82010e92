//! Domain layer: core types, identity, and concurrent stores.
//!
//! This module contains the server-side domain model: typed identifiers,
//! the identity context, the event/registration/feedback/bookmark records,
//! and the fine-grained-locking stores that hold them.

pub mod badge;
pub mod bookmark_store;
pub mod event;
pub mod event_registry;
pub mod feedback;
pub mod feedback_store;
pub mod identity;
pub mod ids;
pub mod registration;
pub mod registration_store;

pub use bookmark_store::BookmarkStore;
pub use event::{EventRecord, EventStatus, EventSummary};
pub use event_registry::EventRegistry;
pub use feedback::Feedback;
pub use feedback_store::FeedbackStore;
pub use identity::{Identity, Role};
pub use ids::{EventId, RegistrationId, UserId};
pub use registration::{Decision, Registration, RegistrationStatus};
pub use registration_store::RegistrationStore;
