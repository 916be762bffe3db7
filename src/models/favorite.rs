// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::PropertyDetails;

/// A favorited listing with the caller's rating and comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    #[serde(rename = "favouriteid")]
    pub favorite_id: i64,
    #[serde(rename = "propertyid")]
    pub property_id: i64,
    #[serde(rename = "userid", default)]
    pub user_id: i64,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    #[serde(rename = "createddate", default)]
    pub created_date: Option<String>,
    #[serde(rename = "updateddate", default)]
    pub updated_date: Option<String>,
    pub property_details: PropertyDetails,
}

/// Payload for adding a favorite; rating and comment start empty
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteRequest {
    pub rating: i32,
    pub comment: String,
}

impl Default for FavoriteRequest {
    fn default() -> Self {
        Self {
            rating: 0,
            comment: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_favorite() {
        let json = r#"{
            "favouriteid": 8,
            "propertyid": 101,
            "userid": 42,
            "rating": 4,
            "comment": "Great location",
            "createddate": "2025-05-20T08:00:00+00:00",
            "property_details": {
                "propertyid": 101,
                "propertytitle": "2BHK in Baner",
                "price": 7500000,
                "currencytype": "INR"
            }
        }"#;

        let fav: Favorite = serde_json::from_str(json).expect("favorite should parse");
        assert_eq!(fav.favorite_id, 8);
        assert_eq!(fav.rating, 4);
        assert_eq!(fav.property_details.property_id, 101);
        assert_eq!(fav.property_details.display_price(), "₹75.00 L");
    }

    #[test]
    fn test_favorite_request_default() {
        let req = FavoriteRequest::default();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["rating"], 0);
        assert_eq!(json["comment"], "");
    }
}
