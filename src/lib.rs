//! Client library for the EstatesHub real-estate marketplace API.
//!
//! This crate wraps the EstatesHub REST backend for native clients:
//!
//! - `auth`: token-based session management with persisted state and
//!   automatic expiry handling
//! - `api`: authenticated REST client for properties, bookings, favorites,
//!   services, and home loans
//! - `models`: typed wire-contract models for backend responses
//! - `cache`: local response cache with staleness tracking
//! - `client`: the `EstatesHub` facade wiring the pieces together
//!
//! All real business logic (approval workflows, booking consistency,
//! persistence) lives in the backend; this crate is the client-side state
//! and transport layer.

pub mod api;
pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{
    Clock, FileSessionStore, KeyringSessionStore, MemorySessionStore, Session, SessionManager,
    SessionStore, SystemClock,
};
pub use cache::{CacheManager, CachedData};
pub use client::EstatesHub;
pub use config::Config;
