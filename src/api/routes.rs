//! Route table for the EstatesHub REST API (v1).
//!
//! Paths mirror the backend contract exactly, including its mixed verb and
//! naming conventions (`bookProperty`, `removeFavorite`, ...). Join these
//! onto the configured base URL.

// ===== Auth =====

pub const LOGIN: &str = "/v1/auth/login";
pub const REGISTER: &str = "/v1/auth/register";
pub const FORGOT_PASSWORD: &str = "/v1/auth/forgot-password";
pub const RESET_PASSWORD: &str = "/v1/auth/reset-password";

// ===== Properties =====

pub const PROPERTIES: &str = "/v1/properties";
pub const PROPERTIES_SEARCH: &str = "/v1/properties/search";
pub const PROPERTIES_MOST_VIEWED: &str = "/v1/properties/most-viewed";
pub const PROPERTIES_PENDING: &str = "/v1/properties/pending-approvals";
pub const PROPERTIES_BY_USER: &str = "/v1/properties/user/0";
pub const PROPERTY_CREATE: &str = "/v1/properties/createProperty";
pub const FAVORITES: &str = "/v1/properties/favorites";
pub const BOOKINGS_BY_USER: &str = "/v1/properties/getBookingsByUserId";

pub fn property_detail(property_id: i64, user_id: i64) -> String {
    format!("/v1/properties/{}/details/{}", property_id, user_id)
}

pub fn property_update(property_id: i64) -> String {
    format!("/v1/properties/updateProperty/{}", property_id)
}

pub fn property_delete(property_id: i64) -> String {
    format!("/v1/properties/deleteProperty/{}", property_id)
}

pub fn property_approve(property_id: i64) -> String {
    format!("/v1/properties/{}/approve", property_id)
}

pub fn property_reject(property_id: i64) -> String {
    format!("/v1/properties/{}/reject", property_id)
}

pub fn favorite_add(property_id: i64) -> String {
    format!("/v1/properties/{}/favorites", property_id)
}

pub fn favorite_remove(property_id: i64) -> String {
    format!("/v1/properties/removeFavorite/{}", property_id)
}

pub fn booking_create(property_id: i64) -> String {
    format!("/v1/properties/{}/bookProperty", property_id)
}

pub fn booking_update(property_id: i64, booking_id: i64) -> String {
    format!("/v1/properties/updateBooking/{}/{}", property_id, booking_id)
}

// ===== Services =====

pub const SERVICES: &str = "/v1/services/getService";
pub const SERVICE_CREATE: &str = "/v1/services/createService";
pub const SERVICE_CATEGORIES: &str = "/v1/services/getAllServiceCategories";
pub const HOME_LOAN_CATEGORIES: &str = "/v1/services/getAllHomeLoanCategories";
pub const HOME_LOANS: &str = "/v1/services/getHomeLoanServices";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterized_routes() {
        assert_eq!(property_detail(101, 42), "/v1/properties/101/details/42");
        assert_eq!(property_update(101), "/v1/properties/updateProperty/101");
        assert_eq!(property_approve(101), "/v1/properties/101/approve");
        assert_eq!(favorite_add(101), "/v1/properties/101/favorites");
        assert_eq!(favorite_remove(101), "/v1/properties/removeFavorite/101");
        assert_eq!(booking_create(101), "/v1/properties/101/bookProperty");
        assert_eq!(
            booking_update(101, 11),
            "/v1/properties/updateBooking/101/11"
        );
    }
}
