//! Data models for the EstatesHub backend contract.
//!
//! This module contains all the data structures used to represent
//! backend data including:
//!
//! - `UserProfile`, `LoginResponse`, `TokenPair`: account and auth types
//! - `PropertyDetails`, `PropertySearch`, `NewProperty`: listings
//! - `Booking`, `BookingRequest`: property bookings
//! - `Favorite`, `FavoriteRequest`: favorited listings
//! - `ServiceRequest`, `HomeLoanRequest`: ancillary service enquiries
//!
//! Wire field names (`propertyid`, `useremail`, ...) are backend-defined and
//! mapped to snake_case here; their values are opaque pass-through data.

pub mod booking;
pub mod favorite;
pub mod property;
pub mod service;
pub mod user;

pub use booking::{Booking, BookingListResponse, BookingRequest};
pub use favorite::{Favorite, FavoriteRequest};
pub use property::{
    Attachment, NewProperty, PropertyDetailResponse, PropertyDetails, PropertyListResponse,
    PropertySearch, SearchEnvelope,
};
pub use service::{
    CategoryListResponse, HomeLoanRequest, LoanCategory, NewHomeLoanRequest, NewServiceRequest,
    ServiceCategory, ServiceRequest,
};
pub use user::{
    ForgotPasswordRequest, IssuedToken, LoginRequest, LoginResponse, RegisterRequest,
    ResetPasswordRequest, TokenPair, UserProfile,
};
