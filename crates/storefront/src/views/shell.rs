//! Top-level layout: header, content, footer.
//!
//! [`ViewShell`] owns startup. Mounting builds the [`SessionStore`], restores
//! the persisted session and starts the cart badge; every view created
//! afterwards shares the same session handle.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use rk_industry_core::PaymentMethod;

use crate::api::{ApiClient, ApiError};
use crate::config::StorefrontConfig;
use crate::services::auth::AuthGateway;
use crate::services::contact::ContactService;
use crate::services::orders::CheckoutService;
use crate::services::session::SessionStore;
use crate::services::storage::{FileStore, KeyValueStore};
use crate::views::cart_badge::{CartBadge, CartBadgeHandle};
use crate::views::catalog::CatalogView;
use crate::views::notify::Notifier;

pub const BRAND: &str = "RK Industry";
pub const TAGLINE: &str = "Your Style, Our Priority";
pub const NAV_LINKS: [&str; 4] = ["Home", "Products", "About", "Contact"];

const FOOTER_BLURB: &str = "Your trusted partner for quality products and exceptional service.";
const CONTACT_EMAIL: &str = "info@rkindustry.com";
const CONTACT_PHONE: &str = "+880 123 456 789";
const CONTACT_ADDRESS: &str = "Dhaka, Bangladesh";
const COPYRIGHT: &str = "\u{a9} 2025 RK Industry. All rights reserved.";

/// Right-hand side of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountChrome {
    /// Login and sign-up buttons.
    Guest,
    SignedIn {
        greeting: String,
        /// Badge value; `None` hides the badge.
        cart_count: Option<usize>,
    },
}

/// Header contents for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderChrome {
    pub brand: &'static str,
    pub tagline: &'static str,
    pub nav: &'static [&'static str],
    pub account: AccountChrome,
}

impl fmt::Display for HeaderChrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  |  {}", self.brand, self.tagline)?;
        writeln!(f, "{}", self.nav.join("  "))?;
        match &self.account {
            AccountChrome::Guest => write!(f, "[Login] [Sign Up]"),
            AccountChrome::SignedIn {
                greeting,
                cart_count: Some(count),
            } => write!(f, "Cart ({count})  {greeting}  [Logout]"),
            AccountChrome::SignedIn {
                greeting,
                cart_count: None,
            } => write!(f, "Cart  {greeting}  [Logout]"),
        }
    }
}

/// Footer contents. Static apart from the payment methods list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterChrome {
    pub brand: &'static str,
    pub blurb: &'static str,
    pub quick_links: &'static [&'static str],
    pub payment_methods: Vec<PaymentMethod>,
    pub email: &'static str,
    pub phone: &'static str,
    pub address: &'static str,
    pub copyright: &'static str,
}

impl Default for FooterChrome {
    fn default() -> Self {
        Self {
            brand: BRAND,
            blurb: FOOTER_BLURB,
            quick_links: &NAV_LINKS,
            payment_methods: PaymentMethod::ALL.to_vec(),
            email: CONTACT_EMAIL,
            phone: CONTACT_PHONE,
            address: CONTACT_ADDRESS,
            copyright: COPYRIGHT,
        }
    }
}

impl fmt::Display for FooterChrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.brand, self.blurb)?;
        writeln!(f, "Quick Links: {}", self.quick_links.join(", "))?;

        let methods: Vec<&str> = self.payment_methods.iter().map(|m| m.name()).collect();
        writeln!(f, "Payment Methods: {}", methods.join(", "))?;

        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Phone: {}", self.phone)?;
        writeln!(f, "Address: {}", self.address)?;
        write!(f, "{}", self.copyright)
    }
}

/// The mounted application.
pub struct ViewShell {
    session: SessionStore,
    notifier: Arc<dyn Notifier>,
    badge: CartBadgeHandle,
}

impl ViewShell {
    /// Build the session store, restore any persisted session and start the
    /// cart badge.
    ///
    /// Restoration failures are absorbed; the shell always mounts.
    pub async fn mount(
        api: ApiClient,
        storage: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let session = SessionStore::new(api.clone(), storage);
        let restored = session.restore().await;
        info!(signed_in = restored.is_authenticated(), "Shell mounted");

        let mut badge = CartBadge::new(api);
        badge.observe(&restored).await;
        let badge = badge.spawn(session.subscribe());

        Self {
            session,
            notifier,
            badge,
        }
    }

    /// Mount against the configured backend with file-backed storage.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the HTTP client cannot be built.
    pub async fn from_config(
        config: &StorefrontConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::new(config)?;
        let storage = Arc::new(FileStore::new(config.storage_path()));
        Ok(Self::mount(api, storage, notifier).await)
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn auth(&self) -> AuthGateway {
        AuthGateway::new(self.session.clone())
    }

    /// A fresh, unmounted catalog.
    #[must_use]
    pub fn catalog(&self) -> CatalogView {
        CatalogView::new(self.session.clone(), Arc::clone(&self.notifier))
    }

    #[must_use]
    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(self.session.clone())
    }

    #[must_use]
    pub fn contact(&self) -> ContactService {
        ContactService::new(self.session.api().clone())
    }

    #[must_use]
    pub const fn cart_badge(&self) -> &CartBadgeHandle {
        &self.badge
    }

    /// Header for the current session.
    #[must_use]
    pub fn header(&self) -> HeaderChrome {
        let session = self.session.current();
        let account = session
            .identity()
            .map_or(AccountChrome::Guest, |user| AccountChrome::SignedIn {
                greeting: user.greeting(),
                cart_count: Some(self.badge.count()).filter(|count| *count > 0),
            });

        HeaderChrome {
            brand: BRAND,
            tagline: TAGLINE,
            nav: &NAV_LINKS,
            account,
        }
    }

    #[must_use]
    pub fn footer(&self) -> FooterChrome {
        FooterChrome::default()
    }
}

impl fmt::Debug for ViewShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewShell")
            .field("session", &self.session)
            .field("cart_count", &self.badge.count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::services::storage::MemoryStore;
    use crate::views::notify::RecordingNotifier;

    async fn offline_shell() -> ViewShell {
        let api = ApiClient::with_base_url(
            Url::parse("http://127.0.0.1:9/api/").unwrap(),
            Duration::from_millis(500),
        )
        .unwrap();
        ViewShell::mount(
            api,
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        )
        .await
    }

    #[tokio::test]
    async fn test_guest_header() {
        let shell = offline_shell().await;
        let header = shell.header();

        assert_eq!(header.brand, "RK Industry");
        assert_eq!(header.tagline, "Your Style, Our Priority");
        assert_eq!(header.account, AccountChrome::Guest);
        assert!(header.to_string().contains("[Login] [Sign Up]"));
    }

    #[tokio::test]
    async fn test_footer_lists_payment_methods() {
        let shell = offline_shell().await;
        let footer = shell.footer().to_string();

        assert!(footer.contains("Payment Methods: Payoneer, Bkash, Nagad, Bank Transfer"));
        assert!(footer.contains("Email: info@rkindustry.com"));
        assert!(footer.ends_with("\u{a9} 2025 RK Industry. All rights reserved."));
    }
}
