//! Service layer: business logic orchestration.
//!
//! [`RegistrationService`] owns the quota-enforcing registration
//! lifecycle; the remaining services are thin coordinators over the
//! domain stores.

pub mod badges;
pub mod dashboard;
pub mod events;
pub mod feedback;
pub mod registration;

pub use badges::BadgeService;
pub use dashboard::{DashboardService, EventWithStats};
pub use events::{EventPatch, EventService, NewEvent};
pub use feedback::FeedbackService;
pub use registration::RegistrationService;
