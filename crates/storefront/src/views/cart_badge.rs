//! Header cart counter.
//!
//! The badge holds only a count derived from `GET /cart`. It is refreshed
//! when a user becomes signed in; after that it only changes on an explicit
//! [`refresh`](CartBadge::refresh).

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use rk_industry_core::UserId;

use crate::api::ApiClient;
use crate::models::Session;

/// Cart line count for the signed-in user.
#[derive(Debug)]
pub struct CartBadge {
    api: ApiClient,
    count: watch::Sender<usize>,
    /// User the count was last fetched for.
    observed: Option<UserId>,
}

impl CartBadge {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            count: watch::Sender::new(0),
            observed: None,
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        *self.count.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.count.subscribe()
    }

    /// React to a session value.
    ///
    /// Fetches the count only when the identity goes from absent to present,
    /// not on every identity change: a re-login as the same user fetches
    /// nothing. A direct switch to a different user skips the empty state
    /// on the channel, so it is treated as a fresh sign-in. Returns whether
    /// a fetch was made. Signing out fetches nothing and keeps the count.
    pub async fn observe(&mut self, session: &Session) -> bool {
        let Some(identity) = session.identity() else {
            self.observed = None;
            return false;
        };

        if self.observed.as_ref() == Some(&identity.id) {
            return false;
        }

        self.observed = Some(identity.id.clone());
        self.refresh().await;
        true
    }

    /// Re-read the cart. Failures keep the previous count.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        match self.api.cart().await {
            Ok(items) => {
                debug!(count = items.len(), "Cart count refreshed");
                self.count.send_replace(items.len());
            }
            Err(e) => warn!(error = %e, "Failed to fetch cart count"),
        }
    }

    /// Follow `sessions` in a background task until the sender is dropped.
    #[must_use]
    pub fn spawn(mut self, mut sessions: watch::Receiver<Session>) -> CartBadgeHandle {
        let count = self.subscribe();
        let task = tokio::spawn(async move {
            loop {
                let session = sessions.borrow_and_update().clone();
                self.observe(&session).await;
                if sessions.changed().await.is_err() {
                    break;
                }
            }
        });
        CartBadgeHandle { count, task }
    }
}

/// A running [`CartBadge`]. Dropping the handle stops it.
#[derive(Debug)]
pub struct CartBadgeHandle {
    count: watch::Receiver<usize>,
    task: JoinHandle<()>,
}

impl CartBadgeHandle {
    #[must_use]
    pub fn count(&self) -> usize {
        *self.count.borrow()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.count.clone()
    }
}

impl Drop for CartBadgeHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use rk_industry_core::AccessToken;
    use url::Url;

    use super::*;
    use crate::models::UserRef;

    fn badge() -> CartBadge {
        CartBadge::new(
            ApiClient::with_base_url(
                Url::parse("http://127.0.0.1:9/api/").unwrap(),
                Duration::from_millis(500),
            )
            .unwrap(),
        )
    }

    fn signed_in(id: &str) -> Session {
        Session::authenticated(
            UserRef {
                id: id.into(),
                email: format!("{id}@example.com"),
                full_name: id.to_string(),
                phone: None,
                address: None,
                created_at: None,
            },
            AccessToken::new("T1"),
        )
    }

    #[tokio::test]
    async fn test_anonymous_session_fetches_nothing() {
        let mut badge = badge();
        assert!(!badge.observe(&Session::anonymous()).await);
        assert_eq!(badge.count(), 0);
    }

    #[tokio::test]
    async fn test_fetches_once_per_sign_in() {
        let mut badge = badge();
        let session = signed_in("u1");

        assert!(badge.observe(&session).await);
        assert!(!badge.observe(&session).await);

        assert!(!badge.observe(&Session::anonymous()).await);
        assert!(badge.observe(&session).await);
    }

    #[tokio::test]
    async fn test_switching_user_counts_as_sign_in() {
        let mut badge = badge();

        assert!(badge.observe(&signed_in("u1")).await);
        assert!(badge.observe(&signed_in("u2")).await);
        assert!(!badge.observe(&signed_in("u2")).await);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_count() {
        let badge = badge();
        badge.count.send_replace(3);
        badge.refresh().await;
        assert_eq!(badge.count(), 3);
    }
}
