//! Local caching module for offline data access.
//!
//! This module provides the `CacheManager` for storing and retrieving
//! marketplace data locally. Data is cached in JSON format and considered
//! stale after 60 minutes.
//!
//! Cached data types include:
//! - Property listings and per-listing detail
//! - Favorites and bookings
//! - Service and home-loan enquiries, plus their category lists

pub mod manager;

pub use manager::{CacheAges, CacheManager, CachedData};
