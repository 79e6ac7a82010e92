//! Persistence layer: periodic PostgreSQL state snapshots.
//!
//! The service is memory-first; durability comes from full-store
//! snapshots written on an interval and restored at startup. The
//! concrete implementation uses `sqlx::PgPool` for async PostgreSQL
//! access.

pub mod models;
pub mod postgres;
