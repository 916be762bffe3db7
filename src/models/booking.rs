// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::Attachment;
use crate::utils::format_date;

/// A property booking as returned by the bookings-by-user endpoint.
/// The backend flattens the booked listing's fields into the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "propertybookingid")]
    pub booking_id: i64,
    #[serde(rename = "propertyid")]
    pub property_id: i64,
    #[serde(rename = "userid", default)]
    pub user_id: i64,
    #[serde(rename = "propertytitle", default)]
    pub property_title: String,
    #[serde(rename = "propertydescription", default)]
    pub property_description: String,
    #[serde(rename = "propertycategory", default)]
    pub property_category: i32,
    #[serde(rename = "generallocation", default)]
    pub general_location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(rename = "isactive", default)]
    pub is_active: bool,
    #[serde(rename = "isapproved", default)]
    pub is_approved: bool,
    #[serde(rename = "isbooked", default)]
    pub is_booked: bool,
    #[serde(rename = "iscancelled", default)]
    pub is_cancelled: bool,
    #[serde(rename = "bookeddate", default)]
    pub booked_date: Option<String>,
    #[serde(rename = "cancelleddate", default)]
    pub cancelled_date: Option<String>,
    #[serde(rename = "reasonforcancellation", default)]
    pub reason_for_cancellation: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Booking {
    /// A booking counts as live until it is cancelled
    pub fn is_live(&self) -> bool {
        self.is_booked && !self.is_cancelled
    }

    pub fn display_booked_date(&self) -> String {
        match &self.booked_date {
            Some(date) => format_date(date),
            None => "-".to_string(),
        }
    }
}

/// Booking write payload for the book/updateBooking endpoints.
/// The same shape books (is_booked=true) and cancels (is_cancelled=true,
/// with a reason).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub booked_date: String,
    pub cancelled_date: Option<String>,
    pub is_booked: bool,
    pub is_cancelled: bool,
    pub reason_for_cancellation: String,
}

impl BookingRequest {
    pub fn book(booked_date: String) -> Self {
        Self {
            booked_date,
            cancelled_date: None,
            is_booked: true,
            is_cancelled: false,
            reason_for_cancellation: String::new(),
        }
    }

    pub fn cancel(now: String, reason: String) -> Self {
        Self {
            booked_date: now.clone(),
            cancelled_date: Some(now),
            is_booked: false,
            is_cancelled: true,
            reason_for_cancellation: reason,
        }
    }
}

/// Wrapper for the bookings-by-user response
#[derive(Debug, Clone, Deserialize)]
pub struct BookingListResponse {
    #[serde(rename = "t_propertybooking_get_by_id", default)]
    pub bookings: Vec<Booking>,
}
