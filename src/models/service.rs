// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::Attachment;

/// A maintenance/ancillary service request raised against a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(rename = "requestid")]
    pub request_id: i64,
    #[serde(rename = "userid", default)]
    pub user_id: i64,
    #[serde(rename = "propertyid", default)]
    pub property_id: i64,
    #[serde(rename = "servicetype", default)]
    pub service_type: i32,
    #[serde(rename = "servicetitle", default)]
    pub service_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "requestedby", default)]
    pub requested_by: String,
    #[serde(rename = "requesteddate", default)]
    pub requested_date: Option<String>,
    #[serde(rename = "propertyname", default)]
    pub property_name: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Category entry from the service-categories endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    #[serde(rename = "servicecategoryid")]
    pub category_id: i64,
    #[serde(rename = "servicecategoryname", default)]
    pub category_name: String,
}

/// Write payload for the create-service endpoint (camelCase wire names)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceRequest {
    pub user_id: i64,
    pub service_list_no: i64,
    pub post_query: String,
    pub area_code: String,
    pub contact_no: String,
    pub email: String,
}

/// A home-loan enquiry as returned by the home-loan services endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeLoanRequest {
    #[serde(rename = "loanid")]
    pub loan_id: i64,
    #[serde(rename = "userid", default)]
    pub user_id: i64,
    #[serde(rename = "propertyid", default)]
    pub property_id: i64,
    #[serde(rename = "loantype", default)]
    pub loan_type: i32,
    #[serde(rename = "loantitle", default)]
    pub loan_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "requestedby", default)]
    pub requested_by: String,
    #[serde(rename = "createddate", default)]
    pub created_date: Option<String>,
    #[serde(rename = "propertyname", default)]
    pub property_name: String,
    #[serde(rename = "loancategoryname", default)]
    pub loan_category_name: String,
    #[serde(rename = "postquery", default)]
    pub post_query: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "contactno", default)]
    pub contact_no: Option<String>,
    #[serde(rename = "areacode", default)]
    pub area_code: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Write payload for a home-loan enquiry (lowercase wire names, matching
/// the read model)
#[derive(Debug, Clone, Serialize, Default)]
pub struct NewHomeLoanRequest {
    #[serde(rename = "userid")]
    pub user_id: i64,
    #[serde(rename = "propertyid", skip_serializing_if = "Option::is_none")]
    pub property_id: Option<i64>,
    #[serde(rename = "loantype")]
    pub loan_type: i32,
    #[serde(rename = "postquery")]
    pub post_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "contactno", skip_serializing_if = "Option::is_none")]
    pub contact_no: Option<String>,
    #[serde(rename = "areacode", skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
}

/// Category entry from the home-loan categories endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCategory {
    #[serde(rename = "loancategoryid")]
    pub category_id: i64,
    #[serde(rename = "loancategoryname", default)]
    pub category_name: String,
}

/// Wrapper for category list responses (`{ "data": [...] }`)
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct CategoryListResponse<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_request() {
        let json = r#"{
            "requestid": 3,
            "userid": 42,
            "propertyid": 101,
            "servicetype": 2,
            "servicetitle": "Plumbing",
            "description": "Kitchen sink leak",
            "status": "open",
            "requestedby": "Asha Rao",
            "propertyname": "2BHK in Baner",
            "attachments": []
        }"#;

        let req: ServiceRequest = serde_json::from_str(json).expect("service should parse");
        assert_eq!(req.request_id, 3);
        assert_eq!(req.service_title, "Plumbing");
        assert_eq!(req.status.as_deref(), Some("open"));
    }

    #[test]
    fn test_parse_service_categories() {
        let json = r#"{"data": [
            {"servicecategoryid": 1, "servicecategoryname": "Plumbing"},
            {"servicecategoryid": 2, "servicecategoryname": "Electrical"}
        ]}"#;
        let resp: CategoryListResponse<ServiceCategory> =
            serde_json::from_str(json).expect("categories should parse");
        assert_eq!(resp.data.len(), 2);
        assert_eq!(resp.data[1].category_name, "Electrical");
    }

    #[test]
    fn test_new_service_request_serializes_camel_case() {
        let req = NewServiceRequest {
            user_id: 42,
            service_list_no: 2,
            post_query: "Need help with wiring".to_string(),
            area_code: "+91".to_string(),
            contact_no: "9876543210".to_string(),
            email: "asha@example.com".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["serviceListNo"], 2);
        assert_eq!(json["postQuery"], "Need help with wiring");
        assert_eq!(json["areaCode"], "+91");
    }

    #[test]
    fn test_parse_home_loan() {
        let json = r#"{
            "loanid": 9,
            "userid": 42,
            "propertyid": 101,
            "loantype": 1,
            "loantitle": "Purchase loan",
            "loancategoryname": "Home Purchase",
            "postquery": "Eligibility for 60L",
            "propertyname": "2BHK in Baner",
            "status": "submitted"
        }"#;
        let loan: HomeLoanRequest = serde_json::from_str(json).expect("loan should parse");
        assert_eq!(loan.loan_id, 9);
        assert_eq!(loan.loan_category_name, "Home Purchase");
    }
}
