//! API client for communicating with the EstatesHub REST API.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests against the marketplace backend: listings, search, bookings,
//! favorites, and ancillary service enquiries.
//!
//! The client is a pass-through, not a resilience layer: errors map onto
//! the `ApiError` taxonomy and surface to the caller unchanged, with no
//! retry, backoff, or circuit breaking.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, multipart, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::auth::SessionManager;
use crate::models::{
    Booking, BookingListResponse, BookingRequest, CategoryListResponse, Favorite,
    FavoriteRequest, ForgotPasswordRequest, HomeLoanRequest, LoanCategory, LoginRequest,
    LoginResponse, NewHomeLoanRequest, NewProperty, NewServiceRequest, PropertyDetailResponse,
    PropertyDetails, PropertyListResponse, PropertySearch, RegisterRequest,
    ResetPasswordRequest, SearchEnvelope, ServiceCategory, ServiceRequest,
};

use super::{routes, ApiError};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// An image to upload with a new or updated listing
#[derive(Debug, Clone)]
pub struct PropertyImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// API client for EstatesHub.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and the session handle is shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionManager,
}

impl ApiClient {
    /// Create a new API client against the given base URL
    pub fn new(base_url: impl Into<String>, session: SessionManager) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer header read from the session at request time (never cached at
    /// construction), so a replaced token is picked up automatically
    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.session.access_token() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        let mut request = self.client.get(&url).headers(self.auth_headers()?);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    /// POST where only the status matters; the response body is discarded
    async fn post_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }

    /// PUT where only the status matters; the response body is discarded
    async fn put_ack<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .put(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send PUT request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }

    async fn delete_ack(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }

    // ===== Auth =====

    /// Authenticate and return the full login response (profile + tokens).
    /// The caller hands the response to `SessionManager::set_auth`.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
        self.post(routes::LOGIN, credentials).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.post_ack(routes::REGISTER, request).await
    }

    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<()> {
        self.post_ack(routes::FORGOT_PASSWORD, request).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        self.post_ack(routes::RESET_PASSWORD, request).await
    }

    // ===== Properties =====

    /// Fetch the full listing catalog
    pub async fn fetch_properties(&self) -> Result<Vec<PropertyDetails>> {
        let response: PropertyListResponse = self.get(routes::PROPERTIES).await?;
        Ok(response.data)
    }

    /// Search listings with the given filters
    pub async fn search_properties(&self, search: &PropertySearch) -> Result<Vec<PropertyDetails>> {
        let envelopes: Vec<SearchEnvelope> = self
            .get_with_query(routes::PROPERTIES_SEARCH, &search.to_query())
            .await?;
        Ok(envelopes
            .into_iter()
            .next()
            .map(|e| e.results)
            .unwrap_or_default())
    }

    /// Fetch the most-viewed listings for the home feed
    pub async fn fetch_most_viewed(&self) -> Result<Vec<PropertyDetails>> {
        let response: PropertyListResponse = self.get(routes::PROPERTIES_MOST_VIEWED).await?;
        Ok(response.data)
    }

    /// Fetch one listing's full detail, recording the view against the user
    pub async fn fetch_property_detail(
        &self,
        property_id: i64,
        user_id: i64,
    ) -> Result<Option<PropertyDetails>> {
        let response: PropertyDetailResponse = self
            .get(&routes::property_detail(property_id, user_id))
            .await?;
        Ok(response.properties.into_iter().next())
    }

    /// Fetch the listings owned by a user.
    /// The endpoint over-returns, so ownership is filtered client-side.
    pub async fn fetch_my_properties(&self, user_id: i64) -> Result<Vec<PropertyDetails>> {
        let body = serde_json::json!({ "userId": user_id, "full": "1" });
        let response: PropertyDetailResponse =
            self.post(routes::PROPERTIES_BY_USER, &body).await?;
        Ok(response
            .properties
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect())
    }

    /// Fetch listings awaiting admin approval
    pub async fn fetch_pending_approvals(&self) -> Result<Vec<PropertyDetails>> {
        let response: PropertyListResponse = self.get(routes::PROPERTIES_PENDING).await?;
        Ok(response.data)
    }

    pub async fn approve_property(&self, property_id: i64) -> Result<()> {
        self.put_ack(&routes::property_approve(property_id), &serde_json::json!({}))
            .await
    }

    pub async fn reject_property(&self, property_id: i64) -> Result<()> {
        self.put_ack(&routes::property_reject(property_id), &serde_json::json!({}))
            .await
    }

    /// Submit a new listing with its images as a multipart form
    pub async fn create_property(
        &self,
        user_id: i64,
        property: &NewProperty,
        images: Vec<PropertyImage>,
    ) -> Result<()> {
        let form = Self::property_form(user_id, property, false, &[])?;
        let form = Self::attach_images(form, images);
        self.send_multipart(routes::PROPERTY_CREATE, false, form).await
    }

    /// Update an existing listing; `attachments_to_remove` lists the ids of
    /// images being dropped
    pub async fn update_property(
        &self,
        user_id: i64,
        property_id: i64,
        property: &NewProperty,
        images: Vec<PropertyImage>,
        attachments_to_remove: &[i64],
    ) -> Result<()> {
        let form = Self::property_form(user_id, property, true, attachments_to_remove)?
            .text("propertyId", property_id.to_string());
        let form = Self::attach_images(form, images);
        self.send_multipart(&routes::property_update(property_id), true, form)
            .await
    }

    pub async fn delete_property(&self, property_id: i64) -> Result<()> {
        self.delete_ack(&routes::property_delete(property_id)).await
    }

    // ===== Favorites =====

    pub async fn fetch_favorites(&self) -> Result<Vec<Favorite>> {
        self.get(routes::FAVORITES).await
    }

    pub async fn add_favorite(&self, property_id: i64) -> Result<()> {
        self.post_ack(&routes::favorite_add(property_id), &FavoriteRequest::default())
            .await
    }

    pub async fn remove_favorite(&self, property_id: i64) -> Result<()> {
        self.delete_ack(&routes::favorite_remove(property_id)).await
    }

    // ===== Bookings =====

    pub async fn fetch_bookings(&self) -> Result<Vec<Booking>> {
        let response: BookingListResponse = self.get(routes::BOOKINGS_BY_USER).await?;
        Ok(response.bookings)
    }

    pub async fn book_property(&self, property_id: i64, request: &BookingRequest) -> Result<()> {
        self.post_ack(&routes::booking_create(property_id), request)
            .await
    }

    /// Write a booking update; cancellation goes through here with the
    /// cancelled flags set
    pub async fn update_booking(
        &self,
        property_id: i64,
        booking_id: i64,
        request: &BookingRequest,
    ) -> Result<()> {
        self.put_ack(&routes::booking_update(property_id, booking_id), request)
            .await
    }

    // ===== Services and home loans =====

    pub async fn fetch_services(&self) -> Result<Vec<ServiceRequest>> {
        self.get(routes::SERVICES).await
    }

    pub async fn create_service(&self, request: &NewServiceRequest) -> Result<()> {
        self.post_ack(routes::SERVICE_CREATE, request).await
    }

    pub async fn fetch_service_categories(&self) -> Result<Vec<ServiceCategory>> {
        let response: CategoryListResponse<ServiceCategory> =
            self.get(routes::SERVICE_CATEGORIES).await?;
        Ok(response.data)
    }

    pub async fn fetch_home_loan_categories(&self) -> Result<Vec<LoanCategory>> {
        let response: CategoryListResponse<LoanCategory> =
            self.get(routes::HOME_LOAN_CATEGORIES).await?;
        Ok(response.data)
    }

    pub async fn fetch_home_loans(&self) -> Result<Vec<HomeLoanRequest>> {
        self.get(routes::HOME_LOANS).await
    }

    pub async fn apply_home_loan(&self, request: &NewHomeLoanRequest) -> Result<()> {
        self.post_ack(routes::HOME_LOANS, request).await
    }

    // ===== Multipart internals =====

    /// The amenities field has two wire shapes: creates wrap the list in an
    /// object, updates send the bare array
    fn amenities_field(amenities: &[String], is_update: bool) -> Result<String> {
        if is_update {
            Ok(serde_json::to_string(amenities)?)
        } else {
            Ok(serde_json::to_string(
                &serde_json::json!({ "amenities": amenities }),
            )?)
        }
    }

    fn property_form(
        user_id: i64,
        property: &NewProperty,
        is_update: bool,
        attachments_to_remove: &[i64],
    ) -> Result<multipart::Form> {
        let form = multipart::Form::new()
            .text("userId", user_id.to_string())
            .text("propertyCategory", property.property_category.to_string())
            .text("propertyType", property.property_type.to_string())
            .text("propertyTitle", property.title.clone())
            // The backend rejects a null description; send a space instead
            .text(
                "propertyDescription",
                if property.description.is_empty() {
                    " ".to_string()
                } else {
                    property.description.clone()
                },
            )
            .text("address", property.address.clone())
            .text("location", property.location.clone())
            .text("landmark", property.landmark.clone())
            .text("pinCode", property.pin_code.clone())
            .text("city", property.city.clone())
            .text("state", property.state.clone())
            .text("country", property.country.clone())
            .text("latitude", property.latitude.clone())
            .text("longitude", property.longitude.clone())
            .text("availableDate", property.available_date.clone())
            .text("bedRooms", property.bedrooms.to_string())
            .text("bathRooms", property.bathrooms.to_string())
            .text(
                "attachmentsToRemove",
                serde_json::to_string(attachments_to_remove)?,
            )
            .text(
                "amenities",
                Self::amenities_field(&property.amenities, is_update)?,
            )
            .text(
                "propertyArea",
                if property.property_area.is_empty() {
                    "0".to_string()
                } else {
                    property.property_area.clone()
                },
            )
            .text("currencyType", property.currency_type.clone())
            .text("price", property.price.clone())
            .text("status", "Available");
        Ok(form)
    }

    fn attach_images(mut form: multipart::Form, images: Vec<PropertyImage>) -> multipart::Form {
        for image in images {
            let part = multipart::Part::bytes(image.bytes).file_name(image.file_name);
            form = form.part("propertyImages", part);
        }
        form
    }

    async fn send_multipart(&self, path: &str, is_update: bool, form: multipart::Form) -> Result<()> {
        let url = self.url(path);
        debug!(url = %url, is_update, "Submitting listing form");
        let builder = if is_update {
            self.client.put(&url)
        } else {
            self.client.post(&url)
        };
        let response = builder
            .headers(self.auth_headers()?)
            .multipart(form)
            .send()
            .await
            .with_context(|| format!("Failed to submit listing form to {}", url))?;

        Self::check_response(response).await?;
        Ok(())
    }
}
