//! Token-based session lifecycle management.
//!
//! `SessionManager` is the single source of truth for authentication state.
//! The session has exactly two states, authenticated and unauthenticated:
//! a successful login (`set_auth`) is the only way in, and `logout` - called
//! directly, by the one-shot expiry timer, or by a failed expiry check - is
//! the only way out. The refresh token is stored but never exchanged, so an
//! expired access token always means a full logout.
//!
//! Expiry detection is polling-based (`check_and_handle_token_expiry`) with
//! the timer as a push-based backstop; an expired session can appear valid
//! for at most one polling interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::auth::store::SessionStore;
use crate::auth::token;
use crate::models::{LoginResponse, UserProfile};

/// Default polling interval for recurring expiry checks
pub const DEFAULT_EXPIRY_POLL: Duration = Duration::from_secs(60);

/// Client-side authenticated-user state, persisted as a single blob.
/// Overwritten wholesale on login, cleared wholesale on logout or expiry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub token_expiry_millis: Option<i64>,
}

impl Session {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && !self.is_authenticated
    }
}

/// Clock seam so tests can drive time
pub trait Clock: Send + Sync + 'static {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

struct SessionInner {
    state: RwLock<Session>,
    store: Box<dyn SessionStore>,
    clock: Box<dyn Clock>,
    // One-shot expiry timer; superseded on every set_auth
    timer: Mutex<Option<JoinHandle<()>>>,
    // Monotonic login generation; a timer only fires for the generation
    // that armed it
    generation: AtomicU64,
}

/// Session controller shared across the application.
/// Clone is cheap - all clones share the same state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

impl SessionManager {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: impl SessionStore + 'static, clock: impl Clock) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(Session::default()),
                store: Box::new(store),
                clock: Box::new(clock),
                timer: Mutex::new(None),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Restore a persisted session from the store, if one exists.
    /// An already-expired session is restored as-is; the next expiry check
    /// logs it out.
    pub fn restore(&self) -> Result<bool> {
        let Some(session) = self.inner.store.load()? else {
            return Ok(false);
        };

        let expiry = session.token_expiry_millis;
        let authenticated = session.is_authenticated;
        *self.write_state() = session;

        if authenticated {
            let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(expiry_millis) = expiry {
                self.schedule_expiry_timer(expiry_millis, generation);
            }
        }
        debug!(authenticated, "Session restored from storage");
        Ok(authenticated)
    }

    /// Store a successful login wholesale and arm the expiry timer.
    ///
    /// A token whose expiry claim fails to decode is logged and stored with
    /// `token_expiry_millis = None`; the session is still written, and the
    /// next expiry check logs it out.
    pub fn set_auth(&self, login: &LoginResponse) -> Result<()> {
        let expiry = match token::decode_expiry_millis(&login.tokens.access.token) {
            Ok(millis) => Some(millis),
            Err(e) => {
                warn!(error = %e, "Failed to decode access token expiry");
                None
            }
        };

        let session = Session {
            access_token: Some(login.tokens.access.token.clone()),
            refresh_token: Some(login.tokens.refresh.token.clone()),
            user: Some(login.user.clone()),
            is_authenticated: true,
            token_expiry_millis: expiry,
        };

        *self.write_state() = session.clone();
        self.inner
            .store
            .save(&session)
            .context("Failed to persist session")?;

        // Cancel any timer armed by a previous login before scheduling the
        // new one; a superseded timer must never log out this session.
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_timer();
        if let Some(expiry_millis) = expiry {
            self.schedule_expiry_timer(expiry_millis, generation);
        }

        info!(user_id = login.user.user_id, "Session established");
        Ok(())
    }

    /// Clear the session back to its initial empty state.
    /// Idempotent: calling it when already logged out is a no-op in effect.
    pub fn logout(&self) -> Result<()> {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.cancel_timer();
        *self.write_state() = Session::default();
        self.inner
            .store
            .clear()
            .context("Failed to clear persisted session")?;
        Ok(())
    }

    /// Check the current token without side effects: present and unexpired
    pub fn validate_token(&self) -> bool {
        let state = self.read_state();
        match (&state.access_token, state.token_expiry_millis) {
            (Some(_), Some(expiry)) => {
                !token::is_expired(expiry, self.inner.clock.now_millis())
            }
            _ => false,
        }
    }

    /// Re-validate the token; on failure clear the session and report false.
    /// Intended to be polled on an interval or on focus events.
    pub fn check_and_handle_token_expiry(&self) -> Result<bool> {
        if self.validate_token() {
            return Ok(true);
        }
        if !self.read_state().is_empty() {
            info!("Session invalid at expiry check; logging out");
        }
        self.logout()?;
        Ok(false)
    }

    /// Spawn a process-wide recurring expiry check owned by the manager,
    /// so screens subscribe to state instead of polling individually.
    /// Abort the returned handle to stop the watcher.
    pub fn spawn_expiry_watcher(&self, interval: Duration) -> JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // First tick fires immediately; skip it so a fresh login is not
            // re-checked in the same instant
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !manager.is_authenticated() {
                    continue;
                }
                match manager.check_and_handle_token_expiry() {
                    Ok(valid) => {
                        if !valid {
                            debug!("Expiry watcher cleared an expired session");
                        }
                    }
                    Err(e) => warn!(error = %e, "Expiry check failed"),
                }
            }
        })
    }

    // ===== Read accessors =====

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_authenticated
    }

    /// Current bearer token, read at call time so rotation is picked up
    pub fn access_token(&self) -> Option<String> {
        self.read_state().access_token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.read_state().user.clone()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.read_state().user.as_ref().map(|u| u.user_id)
    }

    /// Snapshot of the full session state
    pub fn current(&self) -> Session {
        self.read_state().clone()
    }

    // ===== Internals =====

    fn schedule_expiry_timer(&self, expiry_millis: i64, generation: u64) {
        // The timer needs a running Tokio runtime; without one, polling via
        // check_and_handle_token_expiry still detects the expiry.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No async runtime; relying on expiry polling");
            return;
        };

        let now = self.inner.clock.now_millis();
        let delay = Duration::from_millis((expiry_millis - now).max(0) as u64);
        debug!(delay_ms = delay.as_millis() as u64, "Expiry timer armed");

        let manager = self.clone();
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            manager.expire_if_current(generation);
        });
        *self.lock_timer() = Some(task);
    }

    fn expire_if_current(&self, generation: u64) {
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            debug!("Expiry timer superseded by a newer login");
            return;
        }
        if self.is_authenticated() {
            info!("Access token expired; logging out");
            if let Err(e) = self.logout() {
                warn!(error = %e, "Failed to clear session on expiry");
            }
        }
    }

    fn cancel_timer(&self) {
        if let Some(task) = self.lock_timer().take() {
            task.abort();
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_timer(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner.timer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemorySessionStore;
    use crate::auth::token::mint_test_token;
    use crate::models::{IssuedToken, TokenPair};
    use std::sync::atomic::AtomicI64;

    /// Deterministic clock driven by the test
    #[derive(Clone, Default)]
    struct ManualClock {
        millis: Arc<AtomicI64>,
    }

    impl ManualClock {
        fn at(millis: i64) -> Self {
            let clock = Self::default();
            clock.millis.store(millis, Ordering::SeqCst);
            clock
        }

        fn advance(&self, millis: i64) {
            self.millis.fetch_add(millis, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.millis.load(Ordering::SeqCst)
        }
    }

    /// Base instant for manual-clock tests, divisible by 1000 so second
    /// granular token expiries land exactly
    const BASE_MILLIS: i64 = 1_750_000_000_000;

    fn login_response(access_token: &str) -> LoginResponse {
        let user: UserProfile =
            serde_json::from_str(r#"{"userid": 42, "fullname": "Asha Rao", "useremail": "asha@example.com"}"#)
                .unwrap();
        LoginResponse {
            user,
            tokens: TokenPair {
                access: IssuedToken {
                    token: access_token.to_string(),
                    expires: None,
                },
                refresh: IssuedToken {
                    token: "refresh.token.blob".to_string(),
                    expires: None,
                },
            },
        }
    }

    fn manager_at(base_millis: i64) -> (SessionManager, MemorySessionStore, ManualClock) {
        let store = MemorySessionStore::new();
        let clock = ManualClock::at(base_millis);
        let manager = SessionManager::with_clock(store.clone(), clock.clone());
        (manager, store, clock)
    }

    #[test]
    fn test_set_auth_then_validate_is_true() {
        let (manager, store, _clock) = manager_at(BASE_MILLIS);
        let token = mint_test_token(BASE_MILLIS / 1000 + 3600);

        manager.set_auth(&login_response(&token)).unwrap();

        assert!(manager.is_authenticated());
        assert!(manager.validate_token());
        assert_eq!(manager.user_id(), Some(42));
        // Session was persisted through the store
        let stored = store.stored().expect("session should be persisted");
        assert_eq!(stored.token_expiry_millis, Some(BASE_MILLIS + 3_600_000));
    }

    #[test]
    fn test_malformed_token_fails_safe_toward_logout() {
        let (manager, store, _clock) = manager_at(BASE_MILLIS);

        manager
            .set_auth(&login_response("not-a-decodable-token"))
            .unwrap();

        // The session is written as authenticated with no known expiry...
        assert!(manager.is_authenticated());
        assert_eq!(manager.current().token_expiry_millis, None);
        assert!(!manager.validate_token());

        // ...and the first poll clears it
        assert!(!manager.check_and_handle_token_expiry().unwrap());
        assert!(!manager.is_authenticated());
        assert!(manager.current().is_empty());
        assert!(store.stored().is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (manager, store, _clock) = manager_at(BASE_MILLIS);
        let token = mint_test_token(BASE_MILLIS / 1000 + 3600);
        manager.set_auth(&login_response(&token)).unwrap();

        manager.logout().unwrap();
        let after_first = manager.current();
        manager.logout().unwrap();
        let after_second = manager.current();

        assert!(after_first.is_empty());
        assert!(after_second.is_empty());
        assert!(after_second.access_token.is_none());
        assert!(!after_second.is_authenticated);
        assert!(store.stored().is_none());
    }

    #[test]
    fn test_logout_with_no_session_is_a_no_op() {
        let (manager, _store, _clock) = manager_at(BASE_MILLIS);
        manager.logout().unwrap();
        let state = manager.current();
        assert!(state.access_token.is_none());
        assert!(!state.is_authenticated);
    }

    #[test]
    fn test_check_detects_expiry_after_the_fact() {
        let (manager, _store, clock) = manager_at(BASE_MILLIS);
        // Token expires 1 second after login
        let token = mint_test_token(BASE_MILLIS / 1000 + 1);
        manager.set_auth(&login_response(&token)).unwrap();
        assert!(manager.validate_token());

        clock.advance(1_100);

        assert!(!manager.check_and_handle_token_expiry().unwrap());
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_check_leaves_valid_session_untouched() {
        let (manager, _store, _clock) = manager_at(BASE_MILLIS);
        let token = mint_test_token(BASE_MILLIS / 1000 + 60);
        manager.set_auth(&login_response(&token)).unwrap();

        assert!(manager.check_and_handle_token_expiry().unwrap());

        let state = manager.current();
        assert!(state.is_authenticated);
        assert_eq!(state.access_token.as_deref(), Some(token.as_str()));
        assert_eq!(state.token_expiry_millis, Some(BASE_MILLIS + 60_000));
        assert_eq!(state.user.as_ref().map(|u| u.user_id), Some(42));
    }

    #[test]
    fn test_past_expiry_at_check_time_logs_out() {
        let (manager, _store, _clock) = manager_at(BASE_MILLIS);
        // Already expired when the login lands
        let token = mint_test_token(BASE_MILLIS / 1000 - 10);
        manager.set_auth(&login_response(&token)).unwrap();

        assert!(!manager.check_and_handle_token_expiry().unwrap());
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn test_restore_round_trip() {
        let store = MemorySessionStore::new();
        let clock = ManualClock::at(BASE_MILLIS);
        let token = mint_test_token(BASE_MILLIS / 1000 + 3600);
        {
            let manager = SessionManager::with_clock(store.clone(), clock.clone());
            manager.set_auth(&login_response(&token)).unwrap();
        }

        // A fresh manager over the same store picks the session back up
        let manager = SessionManager::with_clock(store, clock);
        assert!(manager.restore().unwrap());
        assert!(manager.is_authenticated());
        assert_eq!(manager.access_token().as_deref(), Some(token.as_str()));
    }

    #[test]
    fn test_restore_with_empty_store() {
        let (manager, _store, _clock) = manager_at(BASE_MILLIS);
        assert!(!manager.restore().unwrap());
        assert!(!manager.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_timer_logs_out_without_a_poll() {
        let store = MemorySessionStore::new();
        let manager = SessionManager::new(store.clone());
        let now_secs = Utc::now().timestamp();
        let token = mint_test_token(now_secs + 2);

        manager.set_auth(&login_response(&token)).unwrap();
        assert!(manager.is_authenticated());

        // Virtual time; the one-shot timer fires during this sleep
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(!manager.is_authenticated());
        assert!(store.stored().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseding_login_cancels_earlier_timer() {
        let store = MemorySessionStore::new();
        let manager = SessionManager::new(store.clone());
        let now_secs = Utc::now().timestamp();

        let short_lived = mint_test_token(now_secs + 1);
        manager.set_auth(&login_response(&short_lived)).unwrap();

        let long_lived = mint_test_token(now_secs + 3600);
        manager.set_auth(&login_response(&long_lived)).unwrap();

        // Past the first token's expiry; its timer must not fire a logout
        // against the newer session
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(manager.is_authenticated());
        assert_eq!(
            manager.access_token().as_deref(),
            Some(long_lived.as_str())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_watcher_clears_expired_session() {
        let store = MemorySessionStore::new();
        let clock = ManualClock::at(BASE_MILLIS);
        let manager = SessionManager::with_clock(store.clone(), clock.clone());

        // Valid for one second of manual-clock time; the one-shot timer is
        // armed for 1s of virtual time as well, but the watcher is what we
        // exercise here
        let token = mint_test_token(BASE_MILLIS / 1000 + 1);
        manager.set_auth(&login_response(&token)).unwrap();
        manager.cancel_timer();

        let watcher = manager.spawn_expiry_watcher(Duration::from_secs(60));
        clock.advance(2_000);
        tokio::time::sleep(Duration::from_secs(120)).await;

        assert!(!manager.is_authenticated());
        watcher.abort();
    }
}
