// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::utils::{format_date, format_price};

/// Image or document attached to a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "attachmentid")]
    pub attachment_id: i64,
    #[serde(rename = "attachmenturl")]
    pub attachment_url: String,
    #[serde(rename = "attachmentname", default)]
    pub attachment_name: Option<String>,
    #[serde(rename = "attachmenttype", default)]
    pub attachment_type: Option<i32>,
    #[serde(rename = "isprimary", default)]
    pub is_primary: bool,
}

/// Full listing record as returned by the detail, search, and favorites
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDetails {
    #[serde(rename = "propertyid")]
    pub property_id: i64,
    #[serde(rename = "userid", default)]
    pub user_id: i64,
    #[serde(rename = "propertytitle", default)]
    pub title: String,
    #[serde(rename = "propertydescription", default)]
    pub description: String,
    #[serde(rename = "propertytype", default)]
    pub property_type: i32,
    #[serde(rename = "propertycategory", default)]
    pub property_category: i32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "currencytype", default)]
    pub currency_type: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub bedrooms: i32,
    #[serde(default)]
    pub bathrooms: i32,
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(rename = "generallocation", default)]
    pub general_location: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(rename = "availabledate", default)]
    pub available_date: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(rename = "isapproved", default)]
    pub is_approved: bool,
    #[serde(rename = "isactive", default)]
    pub is_active: bool,
    // Wire name carries the backend's spelling
    #[serde(rename = "isarchieved", default)]
    pub is_archived: bool,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl PropertyDetails {
    pub fn display_price(&self) -> String {
        format_price(self.price, &self.currency_type)
    }

    pub fn display_available_date(&self) -> String {
        match &self.available_date {
            Some(date) => format_date(date),
            None => "Available now".to_string(),
        }
    }

    /// Primary image URL, falling back to the first attachment
    pub fn primary_image_url(&self) -> Option<&str> {
        self.attachments
            .iter()
            .find(|a| a.is_primary)
            .or_else(|| self.attachments.first())
            .map(|a| a.attachment_url.as_str())
    }
}

/// Search filters for the property search endpoint.
/// Unset fields serialize as the literal string "null" (backend contract).
#[derive(Debug, Clone, Default)]
pub struct PropertySearch {
    pub property_category: Option<String>,
    pub property_type: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_area: Option<String>,
    pub min_bedrooms: Option<String>,
    pub max_bedrooms: Option<String>,
    pub user_id: Option<i64>,
}

impl PropertySearch {
    fn field(value: &Option<String>) -> String {
        value.clone().unwrap_or_else(|| "null".to_string())
    }

    /// Build the query pairs the search endpoint expects
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("propertyCategory", Self::field(&self.property_category)),
            ("propertyType", Self::field(&self.property_type)),
            ("city", Self::field(&self.city)),
            ("minPrice", Self::field(&self.min_price)),
            ("maxPrice", Self::field(&self.max_price)),
            ("minArea", Self::field(&self.min_area)),
            ("minBedrooms", Self::field(&self.min_bedrooms)),
            ("maxBedrooms", Self::field(&self.max_bedrooms)),
            (
                "userid",
                self.user_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "null".to_string()),
            ),
        ]
    }
}

/// New or updated listing submitted through the create/update endpoints.
/// The backend accepts these as multipart form fields with camelCase names.
#[derive(Debug, Clone, Default)]
pub struct NewProperty {
    pub property_category: i32,
    pub property_type: i32,
    pub title: String,
    pub description: String,
    pub address: String,
    pub location: String,
    pub landmark: String,
    pub pin_code: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
    pub available_date: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: Vec<String>,
    pub property_area: String,
    pub currency_type: String,
    pub price: String,
}

// ===== Response envelopes =====

/// Wrapper for list-shaped responses (`{ "data": [...] }`)
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyListResponse {
    #[serde(default)]
    pub data: Vec<PropertyDetails>,
}

/// Wrapper for detail/by-user responses keyed by the backing procedure name
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDetailResponse {
    #[serde(rename = "t_propertydetails_get_by_id", default)]
    pub properties: Vec<PropertyDetails>,
}

/// One element of the search response array
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    #[serde(rename = "t_searchcriteria", default)]
    pub results: Vec<PropertyDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_details() {
        let json = r#"{
            "propertyid": 101,
            "userid": 42,
            "propertytitle": "2BHK in Baner",
            "propertydescription": "Sunny flat near the highway",
            "propertytype": 2,
            "propertycategory": 1,
            "status": "approved",
            "price": 7500000,
            "currencytype": "INR",
            "area": "950",
            "bedrooms": 2,
            "bathrooms": 2,
            "amenities": "Lift,Parking",
            "address": "Lane 4, Baner",
            "city": "Pune",
            "state": "MH",
            "country": "India",
            "pincode": "411045",
            "latitude": "18.55",
            "longitude": "73.78",
            "isapproved": true,
            "isactive": true,
            "isarchieved": false,
            "attachments": [
                {"attachmentid": 1, "attachmenturl": "https://cdn/x1.jpg", "isprimary": false},
                {"attachmentid": 2, "attachmenturl": "https://cdn/x2.jpg", "isprimary": true}
            ]
        }"#;

        let p: PropertyDetails = serde_json::from_str(json).expect("property should parse");
        assert_eq!(p.property_id, 101);
        assert_eq!(p.title, "2BHK in Baner");
        assert!(p.is_approved);
        assert!(!p.is_archived);
        assert_eq!(p.display_price(), "₹75.00 L");
        assert_eq!(p.primary_image_url(), Some("https://cdn/x2.jpg"));
    }

    #[test]
    fn test_primary_image_falls_back_to_first_attachment() {
        let json = r#"{
            "propertyid": 5,
            "attachments": [
                {"attachmentid": 9, "attachmenturl": "https://cdn/only.jpg"}
            ]
        }"#;
        let p: PropertyDetails = serde_json::from_str(json).expect("sparse property should parse");
        assert_eq!(p.primary_image_url(), Some("https://cdn/only.jpg"));
    }

    #[test]
    fn test_search_query_uses_null_placeholders() {
        let search = PropertySearch {
            city: Some("Pune".to_string()),
            min_bedrooms: Some("2".to_string()),
            user_id: Some(42),
            ..Default::default()
        };
        let query = search.to_query();
        assert!(query.contains(&("city", "Pune".to_string())));
        assert!(query.contains(&("minBedrooms", "2".to_string())));
        assert!(query.contains(&("userid", "42".to_string())));
        // Unset filters still go over the wire as "null"
        assert!(query.contains(&("maxPrice", "null".to_string())));
        assert!(query.contains(&("propertyCategory", "null".to_string())));
        assert_eq!(query.len(), 9);
    }

    #[test]
    fn test_parse_search_envelope() {
        let json = r#"[{"t_searchcriteria": [{"propertyid": 3, "propertytitle": "Plot"}]}]"#;
        let envelopes: Vec<SearchEnvelope> =
            serde_json::from_str(json).expect("search envelope should parse");
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].results[0].property_id, 3);
    }
}
