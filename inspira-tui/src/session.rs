use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use crate::api::{ApiClient, ApiResult};
use crate::storage::TokenStore;
use inspira_types::{Claims, LoginRequest, LoginResponse};

/// Clock used for expiry checks, injectable so tests can fast-forward.
pub type ClockFn = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Single source of truth for "who is logged in".
///
/// Holds the decoded claim set derived from the persisted bearer token and
/// broadcasts it to subscribers through a replay-latest channel. There are two
/// states, anonymous and authenticated; transitions happen on login, logout
/// and the startup decode. No timer watches the expiry: validity is
/// re-evaluated on every [`SessionManager::is_authenticated`] call.
pub struct SessionManager {
    store: TokenStore,
    claims_tx: watch::Sender<Option<Claims>>,
    clock: ClockFn,
}

impl SessionManager {
    pub fn new(store: TokenStore) -> Self {
        Self::with_clock(store, Arc::new(|| Utc::now().timestamp()))
    }

    pub fn with_clock(store: TokenStore, clock: ClockFn) -> Self {
        let (claims_tx, _) = watch::channel(None);
        Self {
            store,
            claims_tx,
            clock,
        }
    }

    /// Startup decode of any persisted token.
    ///
    /// Returns the raw token when it decodes to an unexpired claim set, so the
    /// caller can install it on the HTTP client. An expired, corrupt or absent
    /// token leaves the session anonymous; corrupt and expired tokens are also
    /// cleared from disk.
    pub fn restore(&self) -> Option<String> {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read persisted token: {e:#}");
                return None;
            }
        };

        match Claims::from_token(&token) {
            Ok(claims) if claims.is_valid_at((self.clock)()) => {
                log::info!("Restored session for {}", claims.name);
                self.claims_tx.send_replace(Some(claims));
                Some(token)
            }
            Ok(claims) => {
                log::info!("Persisted token for {} is expired, clearing", claims.name);
                let _ = self.store.delete();
                None
            }
            Err(e) => {
                log::error!("Failed to decode persisted token: {e}");
                let _ = self.store.delete();
                None
            }
        }
    }

    /// Submits credentials, persists the returned token and re-derives the
    /// claims stream. The raw server response is handed back to the caller;
    /// errors propagate unchanged so the UI can show its generic message.
    pub async fn login(
        &self,
        api: &mut ApiClient,
        credentials: &LoginRequest,
    ) -> ApiResult<LoginResponse> {
        let response = api.login(credentials).await?;

        if let Err(e) = self.store.save(&response.token) {
            log::warn!("Failed to persist bearer token: {e:#}");
        }
        api.set_bearer_token(Some(response.token.clone()));
        self.decode_and_notify(&response.token);

        Ok(response)
    }

    /// Clears the persisted token and the claims stream. No server round-trip;
    /// navigation back to the login screen is the caller's job.
    pub fn logout(&self, api: &mut ApiClient) {
        if let Err(e) = self.store.delete() {
            log::warn!("Failed to delete persisted token: {e:#}");
        }
        api.set_bearer_token(None);
        self.claims_tx.send_replace(None);
    }

    /// Pure, synchronous query: false when no claims are held, false when the
    /// decoded expiry is in the past, true otherwise. The single authority for
    /// screen guarding.
    pub fn is_authenticated(&self) -> bool {
        match self.claims_tx.borrow().as_ref() {
            Some(claims) => claims.is_valid_at((self.clock)()),
            None => false,
        }
    }

    /// Replay-latest subscription to the decoded claims. Subscribing never
    /// triggers a decode, it only surfaces the last computed value.
    pub fn subscribe(&self) -> watch::Receiver<Option<Claims>> {
        self.claims_tx.subscribe()
    }

    /// Snapshot of the current claims.
    pub fn claims(&self) -> Option<Claims> {
        self.claims_tx.borrow().clone()
    }

    /// In-place patch of the profile photo on the current claims, re-broadcast
    /// to subscribers. The persisted token is untouched, so the patch does not
    /// survive a session reload; that is a known display-only convenience.
    pub fn update_photo(&self, new_url: &str) {
        self.claims_tx.send_modify(|claims| {
            if let Some(claims) = claims {
                claims.profile_photo_url = Some(new_url.to_string());
            }
        });
    }

    fn decode_and_notify(&self, token: &str) {
        match Claims::from_token(token) {
            Ok(claims) => {
                self.claims_tx.send_replace(Some(claims));
            }
            Err(e) => {
                // Treated identically to "no token": logged, never thrown at
                // the UI layer.
                log::error!("Failed to decode bearer token: {e}");
                self.claims_tx.send_replace(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use std::sync::atomic::{AtomicI64, Ordering};
    use tempfile::TempDir;

    fn make_token(name: &str, role: &str, exp: i64) -> String {
        let payload = serde_json::json!({
            "sub": "u-1",
            "email": "user@example.com",
            "name": name,
            Claims::role_claim_key(): role,
            "exp": exp,
            "urlPerfil": "https://cdn.example/u1.png"
        });
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    fn manager_at(temp: &TempDir, now: Arc<AtomicI64>) -> SessionManager {
        let store = TokenStore::with_path(temp.path().join("token"));
        SessionManager::with_clock(store, Arc::new(move || now.load(Ordering::SeqCst)))
    }

    #[test]
    fn restore_with_valid_token_authenticates() {
        let temp = TempDir::new().unwrap();
        let now = Arc::new(AtomicI64::new(1_000));
        let token = make_token("lia", "Artista", 5_000);
        TokenStore::with_path(temp.path().join("token"))
            .save(&token)
            .unwrap();

        let session = manager_at(&temp, now);
        assert_eq!(session.restore(), Some(token));
        assert!(session.is_authenticated());

        let claims = session.claims().unwrap();
        assert_eq!(claims.name, "lia");
        assert_eq!(claims.exp, 5_000);
    }

    #[test]
    fn restore_with_expired_token_stays_anonymous_and_clears_file() {
        let temp = TempDir::new().unwrap();
        let now = Arc::new(AtomicI64::new(10_000));
        let store = TokenStore::with_path(temp.path().join("token"));
        store.save(&make_token("lia", "Comum", 5_000)).unwrap();

        let session = manager_at(&temp, now);
        assert_eq!(session.restore(), None);
        assert!(!session.is_authenticated());
        assert!(session.claims().is_none());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn restore_with_corrupt_token_is_treated_as_no_token() {
        let temp = TempDir::new().unwrap();
        let now = Arc::new(AtomicI64::new(0));
        let store = TokenStore::with_path(temp.path().join("token"));
        // Three parts so the store accepts it, but the payload is garbage.
        store
            .save(&format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"not json")))
            .unwrap();

        let session = manager_at(&temp, now);
        assert_eq!(session.restore(), None);
        assert!(!session.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn expiry_is_rechecked_on_every_query() {
        let temp = TempDir::new().unwrap();
        let now = Arc::new(AtomicI64::new(1_000));
        let token = make_token("rui", "Comum", 1_000 + 3_600);
        TokenStore::with_path(temp.path().join("token"))
            .save(&token)
            .unwrap();

        let session = manager_at(&temp, Arc::clone(&now));
        session.restore();
        assert!(session.is_authenticated());

        // Fast-forward past the expiry: no network call, no new decode, the
        // same query now answers false.
        now.store(1_000 + 3_601, Ordering::SeqCst);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_clears_claims_and_store() {
        let temp = TempDir::new().unwrap();
        let now = Arc::new(AtomicI64::new(0));
        let store = TokenStore::with_path(temp.path().join("token"));
        store.save(&make_token("lia", "Artista", 9_999)).unwrap();

        let session = manager_at(&temp, now);
        session.restore();
        assert!(session.is_authenticated());

        let mut api = ApiClient::new("http://localhost:8000/api");
        session.logout(&mut api);

        assert!(!session.is_authenticated());
        assert!(session.claims().is_none());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn subscribers_see_latest_value_without_new_decode() {
        let temp = TempDir::new().unwrap();
        let now = Arc::new(AtomicI64::new(0));
        let token = make_token("lia", "Administrador", 9_999);
        TokenStore::with_path(temp.path().join("token"))
            .save(&token)
            .unwrap();

        let session = manager_at(&temp, now);
        session.restore();

        // A late subscriber replays the latest decoded claims.
        let rx = session.subscribe();
        assert_eq!(rx.borrow().as_ref().unwrap().name, "lia");
    }

    #[test]
    fn update_photo_patches_claims_in_place() {
        let temp = TempDir::new().unwrap();
        let now = Arc::new(AtomicI64::new(0));
        let token = make_token("lia", "Artista", 9_999);
        let store = TokenStore::with_path(temp.path().join("token"));
        store.save(&token).unwrap();

        let session = manager_at(&temp, now);
        session.restore();
        let mut rx = session.subscribe();
        rx.mark_unchanged();

        session.update_photo("https://cdn.example/new.png");

        assert!(rx.has_changed().unwrap());
        assert_eq!(
            session.claims().unwrap().profile_photo_url.as_deref(),
            Some("https://cdn.example/new.png")
        );
        // The persisted token is untouched.
        assert_eq!(store.load().unwrap(), Some(token));
    }

    #[test]
    fn update_photo_on_anonymous_session_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        let session = manager_at(&temp, Arc::new(AtomicI64::new(0)));

        session.update_photo("https://cdn.example/new.png");
        assert!(session.claims().is_none());
    }
}
