use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    Booking, Favorite, HomeLoanRequest, LoanCategory, PropertyDetails, ServiceCategory,
    ServiceRequest,
};

/// Consider cache stale after 1 hour.
/// Balances freshness with reducing unnecessary API calls for
/// slowly-changing data.
const CACHE_STALE_MINUTES: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Covers clock skew (negative ages) as well
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }

    pub fn is_stale(&self) -> bool {
        self.age_minutes() > CACHE_STALE_MINUTES
    }
}

/// Persists API responses as per-collection JSON files so the application
/// has data to show before a refresh completes. Invalidation is coarse:
/// mutations delete the affected file.
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    fn cache_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", name))
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(name);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    fn invalidate(&self, name: &str) -> Result<()> {
        let path = self.cache_path(name);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    // ===== Properties =====

    pub fn load_properties(&self) -> Result<Option<CachedData<Vec<PropertyDetails>>>> {
        self.load("properties")
    }

    pub fn save_properties(&self, properties: &[PropertyDetails]) -> Result<()> {
        self.save("properties", &properties)
    }

    pub fn invalidate_properties(&self) -> Result<()> {
        self.invalidate("properties")
    }

    // ===== Most viewed =====

    pub fn load_most_viewed(&self) -> Result<Option<CachedData<Vec<PropertyDetails>>>> {
        self.load("most_viewed")
    }

    pub fn save_most_viewed(&self, properties: &[PropertyDetails]) -> Result<()> {
        self.save("most_viewed", &properties)
    }

    // ===== Property detail =====

    pub fn load_property_detail(
        &self,
        property_id: i64,
    ) -> Result<Option<CachedData<PropertyDetails>>> {
        self.load(&format!("property_{}", property_id))
    }

    pub fn save_property_detail(&self, property: &PropertyDetails) -> Result<()> {
        self.save(&format!("property_{}", property.property_id), property)
    }

    pub fn invalidate_property_detail(&self, property_id: i64) -> Result<()> {
        self.invalidate(&format!("property_{}", property_id))
    }

    // ===== Favorites =====

    pub fn load_favorites(&self) -> Result<Option<CachedData<Vec<Favorite>>>> {
        self.load("favorites")
    }

    pub fn save_favorites(&self, favorites: &[Favorite]) -> Result<()> {
        self.save("favorites", &favorites)
    }

    pub fn invalidate_favorites(&self) -> Result<()> {
        self.invalidate("favorites")
    }

    // ===== Bookings =====

    pub fn load_bookings(&self) -> Result<Option<CachedData<Vec<Booking>>>> {
        self.load("bookings")
    }

    pub fn save_bookings(&self, bookings: &[Booking]) -> Result<()> {
        self.save("bookings", &bookings)
    }

    pub fn invalidate_bookings(&self) -> Result<()> {
        self.invalidate("bookings")
    }

    // ===== Services =====

    pub fn load_services(&self) -> Result<Option<CachedData<Vec<ServiceRequest>>>> {
        self.load("services")
    }

    pub fn save_services(&self, services: &[ServiceRequest]) -> Result<()> {
        self.save("services", &services)
    }

    pub fn invalidate_services(&self) -> Result<()> {
        self.invalidate("services")
    }

    // ===== Home loans =====

    pub fn load_home_loans(&self) -> Result<Option<CachedData<Vec<HomeLoanRequest>>>> {
        self.load("home_loans")
    }

    pub fn save_home_loans(&self, loans: &[HomeLoanRequest]) -> Result<()> {
        self.save("home_loans", &loans)
    }

    pub fn invalidate_home_loans(&self) -> Result<()> {
        self.invalidate("home_loans")
    }

    // ===== Categories (rarely change; same staleness window applies) =====

    pub fn load_service_categories(&self) -> Result<Option<CachedData<Vec<ServiceCategory>>>> {
        self.load("service_categories")
    }

    pub fn save_service_categories(&self, categories: &[ServiceCategory]) -> Result<()> {
        self.save("service_categories", &categories)
    }

    pub fn load_loan_categories(&self) -> Result<Option<CachedData<Vec<LoanCategory>>>> {
        self.load("loan_categories")
    }

    pub fn save_loan_categories(&self, categories: &[LoanCategory]) -> Result<()> {
        self.save("loan_categories", &categories)
    }

    // ===== Cache age information =====

    /// Helper to load cache and log errors without failing
    fn load_age<T>(
        &self,
        name: &str,
        loader: impl FnOnce() -> Result<Option<CachedData<T>>>,
    ) -> Option<String> {
        match loader() {
            Ok(Some(cached)) => Some(cached.age_display()),
            Ok(None) => None,
            Err(e) => {
                debug!(cache = name, error = %e, "Failed to load cache for age display");
                None
            }
        }
    }

    pub fn get_cache_ages(&self) -> CacheAges {
        CacheAges {
            properties: self.load_age("properties", || self.load_properties()),
            favorites: self.load_age("favorites", || self.load_favorites()),
            bookings: self.load_age("bookings", || self.load_bookings()),
            services: self.load_age("services", || self.load_services()),
            home_loans: self.load_age("home_loans", || self.load_home_loans()),
        }
    }

    /// Helper to check staleness and log errors without failing
    fn is_cache_stale<T>(
        &self,
        name: &str,
        loader: impl FnOnce() -> Result<Option<CachedData<T>>>,
    ) -> bool {
        match loader() {
            Ok(Some(cached)) => cached.is_stale(),
            Ok(None) => true, // No cache = stale
            Err(e) => {
                debug!(cache = name, error = %e, "Failed to load cache for staleness check");
                true // Error reading = treat as stale
            }
        }
    }

    /// Check if any of the core cached collections is stale
    pub fn any_stale(&self) -> bool {
        let stale_checks = [
            self.is_cache_stale("properties", || self.load_properties()),
            self.is_cache_stale("favorites", || self.load_favorites()),
            self.is_cache_stale("bookings", || self.load_bookings()),
        ];
        stale_checks.iter().any(|&stale| stale)
    }
}

#[derive(Debug, Default)]
pub struct CacheAges {
    pub properties: Option<String>,
    pub favorites: Option<String>,
    pub bookings: Option<String>,
    pub services: Option<String>,
    pub home_loans: Option<String>,
}

impl CacheAges {
    /// Returns the most recently refreshed collection's age for display
    pub fn last_updated(&self) -> String {
        let ages = [&self.properties, &self.favorites, &self.bookings];
        for a in ages.iter().copied().flatten() {
            return a.clone();
        }
        "never".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
