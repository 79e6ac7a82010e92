//! # volunteer-hub
//!
//! REST backend for a volunteer event platform: capacity-limited
//! events, quota-enforced registration decisions, feedback with an
//! organizer dashboard, achievement badges, and bookmarks.
//!
//! State lives in memory behind per-event locks; a registration is only
//! confirmed inside the owning event's critical section, so the
//! confirmed count can never exceed the quota. PostgreSQL provides
//! durability through periodic snapshots restored at startup.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── Event / Registration / Feedback /
//!     │   Dashboard / Badge services (service/)
//!     │
//!     ├── EventRegistry, RegistrationStore,
//!     │   FeedbackStore, BookmarkStore (domain/)
//!     │
//!     └── PostgreSQL snapshots (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
