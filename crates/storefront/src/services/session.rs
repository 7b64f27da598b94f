//! Session lifecycle: restore, login, logout.
//!
//! [`SessionStore`] is the single owner of the client's [`Session`]. Views
//! receive a clone of the handle at construction and either read the current
//! value or [`subscribe`](SessionStore::subscribe) to changes.
//!
//! Every transition keeps three things in step: the persisted credential, the
//! credential attached to the [`ApiClient`], and the published session.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use rk_industry_core::AccessToken;

use crate::api::{ApiClient, ApiError};
use crate::config::StorefrontConfig;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::session::keys;
use crate::models::{Session, UserRef};
use crate::services::auth::AuthError;
use crate::services::storage::{FileStore, KeyValueStore, StorageError};

/// Shared handle to the current session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    api: ApiClient,
    storage: Arc<dyn KeyValueStore>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Create an empty session store. Call [`restore`](Self::restore) to load
    /// a persisted credential.
    #[must_use]
    pub fn new(api: ApiClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                api,
                storage,
                state: watch::Sender::new(Session::anonymous()),
            }),
        }
    }

    /// An unrestored store over the configured file storage. Nothing is
    /// read or requested until the first call.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be built.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(config)?;
        Ok(Self::new(api, Arc::new(FileStore::new(config.storage_path()))))
    }

    /// API client whose attached credential tracks this session.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Receive every subsequent session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Silently restore the session from the persisted credential.
    ///
    /// Without a persisted credential no request is made. A credential that
    /// cannot be resolved to a user is deleted and the session left empty.
    /// Failures are logged and never returned.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Session {
        let token = match self.inner.storage.get(keys::TOKEN) {
            Ok(Some(raw)) => AccessToken::new(raw),
            Ok(None) => {
                debug!("No persisted credential");
                return self.current();
            }
            Err(e @ StorageError::Corrupt { .. }) => {
                warn!(error = %e, "Persisted state unreadable; resetting");
                self.discard_credential();
                return self.current();
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted credential");
                return self.current();
            }
        };

        if token.is_blank() {
            self.discard_credential();
            return self.current();
        }

        match self.inner.api.current_user_with(&token).await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                self.establish(user, token);
            }
            Err(e) => {
                warn!(error = %e, "Persisted credential rejected; discarding");
                self.discard_credential();
            }
        }

        self.current()
    }

    /// Exchange email and password for a credential and resolve the identity.
    ///
    /// The new credential is persisted and attached only once `/me` has
    /// resolved it, so on failure the previous session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the backend rejects the
    /// pair, `AuthError::IdentityUnresolved` if the issued credential cannot
    /// be resolved, and `AuthError::Api` for other failures.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<UserRef, AuthError> {
        let issued = self.inner.api.login(email, password).await?;
        let token = AccessToken::new(issued.access_token);

        let user = self
            .inner
            .api
            .current_user_with(&token)
            .await
            .map_err(AuthError::IdentityUnresolved)?;

        if let Err(e) = self.inner.storage.set(keys::TOKEN, token.expose()) {
            warn!(error = %e, "Could not persist credential; session will not survive restart");
        }

        info!(user_id = %user.id, "Logged in");
        self.establish(user.clone(), token);
        Ok(user)
    }

    /// End the session. Synchronous and offline.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.discard_credential();
        info!("Logged out");
    }

    /// Attach the credential and publish the authenticated session.
    fn establish(&self, user: UserRef, token: AccessToken) {
        self.inner.api.attach(token.clone());
        set_sentry_user(&user.id, Some(user.email.as_str()));
        self.inner
            .state
            .send_replace(Session::authenticated(user, token));
    }

    /// Forget the credential everywhere and publish an empty session.
    fn discard_credential(&self) {
        if let Err(e) = self.inner.storage.remove(keys::TOKEN) {
            warn!(error = %e, "Could not remove persisted credential");
        }
        self.inner.api.detach();
        clear_sentry_user();
        self.inner.state.send_replace(Session::anonymous());
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}
