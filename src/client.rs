//! High-level client facade.
//!
//! `EstatesHub` wires configuration, the session manager, the API client,
//! and the response cache together. Collection reads are read-through:
//! fresh cache is served directly, otherwise the API is hit and the result
//! cached. Mutations call the API and invalidate the affected cache file,
//! so the next read refetches.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::api::{ApiClient, PropertyImage};
use crate::auth::{FileSessionStore, SessionManager};
use crate::cache::CacheManager;
use crate::config::Config;
use crate::models::{
    Booking, BookingRequest, Favorite, ForgotPasswordRequest, HomeLoanRequest, LoanCategory,
    LoginRequest, NewHomeLoanRequest, NewProperty, NewServiceRequest, PropertyDetails,
    PropertySearch, RegisterRequest, ServiceCategory, ServiceRequest, UserProfile,
};

pub struct EstatesHub {
    config: Config,
    session: SessionManager,
    api: ApiClient,
    cache: CacheManager,
}

impl EstatesHub {
    /// Build a client from the on-disk configuration, restoring any
    /// persisted session
    pub fn new() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let cache_dir = config.cache_dir()?;
        let session = SessionManager::new(FileSessionStore::new(cache_dir.clone()));
        match session.restore() {
            Ok(true) => info!("Restored persisted session"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Failed to restore session"),
        }

        let api = ApiClient::new(config.api_base_url(), session.clone())?;
        let cache = CacheManager::new(cache_dir)?;

        Ok(Self {
            config,
            session,
            api,
            cache,
        })
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    fn user_id(&self) -> i64 {
        self.session.user_id().unwrap_or(0)
    }

    // ===== Auth =====

    /// Log in and establish the session; remembers the email for next time
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserProfile> {
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&credentials).await?;
        self.session.set_auth(&response)?;

        self.config.last_email = Some(email.to_string());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save configuration");
        }
        Ok(response.user)
    }

    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.api.register(request).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        self.api
            .forgot_password(&ForgotPasswordRequest {
                email: email.to_string(),
            })
            .await
    }

    // ===== Properties =====

    /// Listing catalog, served from cache while fresh
    pub async fn properties(&self, force_refresh: bool) -> Result<Vec<PropertyDetails>> {
        if !force_refresh {
            if let Some(cached) = self.cache.load_properties().ok().flatten() {
                if !cached.is_stale() {
                    return Ok(cached.data);
                }
            }
        }
        let fresh = self.api.fetch_properties().await?;
        if let Err(e) = self.cache.save_properties(&fresh) {
            warn!(error = %e, "Failed to cache properties");
        }
        Ok(fresh)
    }

    /// Search goes straight to the API; filter combinations are too sparse
    /// to cache usefully
    pub async fn search_properties(&self, search: &PropertySearch) -> Result<Vec<PropertyDetails>> {
        let mut search = search.clone();
        if search.user_id.is_none() {
            search.user_id = self.session.user_id();
        }
        self.api.search_properties(&search).await
    }

    pub async fn most_viewed(&self, force_refresh: bool) -> Result<Vec<PropertyDetails>> {
        if !force_refresh {
            if let Some(cached) = self.cache.load_most_viewed().ok().flatten() {
                if !cached.is_stale() {
                    return Ok(cached.data);
                }
            }
        }
        let fresh = self.api.fetch_most_viewed().await?;
        if let Err(e) = self.cache.save_most_viewed(&fresh) {
            warn!(error = %e, "Failed to cache most-viewed listings");
        }
        Ok(fresh)
    }

    pub async fn property_detail(&self, property_id: i64) -> Result<Option<PropertyDetails>> {
        if let Some(cached) = self.cache.load_property_detail(property_id).ok().flatten() {
            if !cached.is_stale() {
                return Ok(Some(cached.data));
            }
        }
        let detail = self
            .api
            .fetch_property_detail(property_id, self.user_id())
            .await?;
        if let Some(ref property) = detail {
            if let Err(e) = self.cache.save_property_detail(property) {
                warn!(error = %e, "Failed to cache listing detail");
            }
        }
        Ok(detail)
    }

    pub async fn my_properties(&self) -> Result<Vec<PropertyDetails>> {
        self.api.fetch_my_properties(self.user_id()).await
    }

    pub async fn pending_approvals(&self) -> Result<Vec<PropertyDetails>> {
        self.api.fetch_pending_approvals().await
    }

    pub async fn approve_property(&self, property_id: i64) -> Result<()> {
        self.api.approve_property(property_id).await?;
        self.invalidate_listing_caches(property_id);
        Ok(())
    }

    pub async fn reject_property(&self, property_id: i64) -> Result<()> {
        self.api.reject_property(property_id).await?;
        self.invalidate_listing_caches(property_id);
        Ok(())
    }

    pub async fn create_property(
        &self,
        property: &NewProperty,
        images: Vec<PropertyImage>,
    ) -> Result<()> {
        self.api
            .create_property(self.user_id(), property, images)
            .await?;
        if let Err(e) = self.cache.invalidate_properties() {
            warn!(error = %e, "Failed to invalidate listing cache");
        }
        Ok(())
    }

    pub async fn update_property(
        &self,
        property_id: i64,
        property: &NewProperty,
        images: Vec<PropertyImage>,
        attachments_to_remove: &[i64],
    ) -> Result<()> {
        self.api
            .update_property(
                self.user_id(),
                property_id,
                property,
                images,
                attachments_to_remove,
            )
            .await?;
        self.invalidate_listing_caches(property_id);
        Ok(())
    }

    pub async fn delete_property(&self, property_id: i64) -> Result<()> {
        self.api.delete_property(property_id).await?;
        self.invalidate_listing_caches(property_id);
        Ok(())
    }

    // ===== Favorites =====

    pub async fn favorites(&self, force_refresh: bool) -> Result<Vec<Favorite>> {
        if !force_refresh {
            if let Some(cached) = self.cache.load_favorites().ok().flatten() {
                if !cached.is_stale() {
                    return Ok(cached.data);
                }
            }
        }
        let fresh = self.api.fetch_favorites().await?;
        if let Err(e) = self.cache.save_favorites(&fresh) {
            warn!(error = %e, "Failed to cache favorites");
        }
        Ok(fresh)
    }

    pub async fn add_favorite(&self, property_id: i64) -> Result<()> {
        self.api.add_favorite(property_id).await?;
        self.invalidate_favorite_caches(property_id);
        Ok(())
    }

    pub async fn remove_favorite(&self, property_id: i64) -> Result<()> {
        self.api.remove_favorite(property_id).await?;
        self.invalidate_favorite_caches(property_id);
        Ok(())
    }

    pub async fn is_favorite(&self, property_id: i64) -> Result<bool> {
        let favorites = self.favorites(false).await?;
        Ok(favorites.iter().any(|f| f.property_id == property_id))
    }

    // ===== Bookings =====

    pub async fn bookings(&self, force_refresh: bool) -> Result<Vec<Booking>> {
        if !force_refresh {
            if let Some(cached) = self.cache.load_bookings().ok().flatten() {
                if !cached.is_stale() {
                    return Ok(cached.data);
                }
            }
        }
        let fresh = self.api.fetch_bookings().await?;
        if let Err(e) = self.cache.save_bookings(&fresh) {
            warn!(error = %e, "Failed to cache bookings");
        }
        Ok(fresh)
    }

    pub async fn book_property(&self, property_id: i64) -> Result<()> {
        let request = BookingRequest::book(Utc::now().to_rfc3339());
        self.api.book_property(property_id, &request).await?;
        if let Err(e) = self.cache.invalidate_bookings() {
            warn!(error = %e, "Failed to invalidate booking cache");
        }
        Ok(())
    }

    pub async fn cancel_booking(
        &self,
        property_id: i64,
        booking_id: i64,
        reason: &str,
    ) -> Result<()> {
        let request = BookingRequest::cancel(Utc::now().to_rfc3339(), reason.to_string());
        self.api
            .update_booking(property_id, booking_id, &request)
            .await?;
        if let Err(e) = self.cache.invalidate_bookings() {
            warn!(error = %e, "Failed to invalidate booking cache");
        }
        Ok(())
    }

    pub async fn is_booked(&self, property_id: i64) -> Result<bool> {
        let bookings = self.bookings(false).await?;
        Ok(bookings
            .iter()
            .any(|b| b.property_id == property_id && b.is_live()))
    }

    // ===== Services and home loans =====

    pub async fn services(&self, force_refresh: bool) -> Result<Vec<ServiceRequest>> {
        if !force_refresh {
            if let Some(cached) = self.cache.load_services().ok().flatten() {
                if !cached.is_stale() {
                    return Ok(cached.data);
                }
            }
        }
        let fresh = self.api.fetch_services().await?;
        if let Err(e) = self.cache.save_services(&fresh) {
            warn!(error = %e, "Failed to cache service requests");
        }
        Ok(fresh)
    }

    pub async fn request_service(&self, request: &NewServiceRequest) -> Result<()> {
        self.api.create_service(request).await?;
        if let Err(e) = self.cache.invalidate_services() {
            warn!(error = %e, "Failed to invalidate service cache");
        }
        Ok(())
    }

    pub async fn service_categories(&self) -> Result<Vec<ServiceCategory>> {
        if let Some(cached) = self.cache.load_service_categories().ok().flatten() {
            if !cached.is_stale() {
                return Ok(cached.data);
            }
        }
        let fresh = self.api.fetch_service_categories().await?;
        if let Err(e) = self.cache.save_service_categories(&fresh) {
            warn!(error = %e, "Failed to cache service categories");
        }
        Ok(fresh)
    }

    pub async fn home_loans(&self, force_refresh: bool) -> Result<Vec<HomeLoanRequest>> {
        if !force_refresh {
            if let Some(cached) = self.cache.load_home_loans().ok().flatten() {
                if !cached.is_stale() {
                    return Ok(cached.data);
                }
            }
        }
        let fresh = self.api.fetch_home_loans().await?;
        if let Err(e) = self.cache.save_home_loans(&fresh) {
            warn!(error = %e, "Failed to cache home loans");
        }
        Ok(fresh)
    }

    pub async fn apply_home_loan(&self, request: &NewHomeLoanRequest) -> Result<()> {
        self.api.apply_home_loan(request).await?;
        if let Err(e) = self.cache.invalidate_home_loans() {
            warn!(error = %e, "Failed to invalidate home-loan cache");
        }
        Ok(())
    }

    pub async fn loan_categories(&self) -> Result<Vec<LoanCategory>> {
        if let Some(cached) = self.cache.load_loan_categories().ok().flatten() {
            if !cached.is_stale() {
                return Ok(cached.data);
            }
        }
        let fresh = self.api.fetch_home_loan_categories().await?;
        if let Err(e) = self.cache.save_loan_categories(&fresh) {
            warn!(error = %e, "Failed to cache loan categories");
        }
        Ok(fresh)
    }

    // ===== Refresh =====

    /// Refresh the main collections concurrently, tolerating partial
    /// failure; each fetch logs and caches on its own
    pub async fn refresh_all(&self) {
        let (properties, favorites, bookings, services, loans) = futures::join!(
            self.properties(true),
            self.favorites(true),
            self.bookings(true),
            self.services(true),
            self.home_loans(true),
        );

        for (name, failed) in [
            ("properties", properties.is_err()),
            ("favorites", favorites.is_err()),
            ("bookings", bookings.is_err()),
            ("services", services.is_err()),
            ("home_loans", loans.is_err()),
        ] {
            if failed {
                warn!(collection = name, "Background refresh failed");
            }
        }
    }

    fn invalidate_listing_caches(&self, property_id: i64) {
        if let Err(e) = self.cache.invalidate_properties() {
            warn!(error = %e, "Failed to invalidate listing cache");
        }
        if let Err(e) = self.cache.invalidate_property_detail(property_id) {
            warn!(error = %e, "Failed to invalidate listing detail cache");
        }
    }

    fn invalidate_favorite_caches(&self, property_id: i64) {
        if let Err(e) = self.cache.invalidate_favorites() {
            warn!(error = %e, "Failed to invalidate favorite cache");
        }
        if let Err(e) = self.cache.invalidate_property_detail(property_id) {
            warn!(error = %e, "Failed to invalidate listing detail cache");
        }
    }
}
