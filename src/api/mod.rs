//! REST API client module for the EstatesHub backend.
//!
//! This module provides the `ApiClient` for communicating with the
//! marketplace API: listings, search, bookings, favorites, and ancillary
//! service enquiries.
//!
//! The API uses JWT bearer token authentication; the token is read from the
//! session at request time.

pub mod client;
pub mod error;
pub mod routes;

pub use client::{ApiClient, PropertyImage};
pub use error::ApiError;
