//! Product listing with add-to-cart.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use rk_industry_core::{ProductCategory, ProductId};

use crate::error::add_breadcrumb;
use crate::models::{CartItem, Product};
use crate::services::session::SessionStore;
use crate::views::notify::Notifier;

/// Shown when a guest tries to add to cart.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login to add items to cart";

/// Shown after a successful add.
pub const ADDED_TO_CART_MESSAGE: &str = "Product added to cart successfully!";

/// Shown when the backend rejects or misses the add.
pub const ADD_TO_CART_FAILED_MESSAGE: &str = "Failed to add product to cart";

/// Result of an add-to-cart action, after the user has been notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToCartOutcome {
    /// No session; nothing was sent and nothing is queued.
    LoginRequired,
    Added(CartItem),
    Failed,
}

/// The product grid.
pub struct CatalogView {
    session: SessionStore,
    notifier: Arc<dyn Notifier>,
    category: Option<ProductCategory>,
    products: Vec<Product>,
    loading: bool,
}

impl CatalogView {
    #[must_use]
    pub fn new(session: SessionStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            session,
            notifier,
            category: None,
            products: Vec::new(),
            loading: true,
        }
    }

    /// Only list products of `category`.
    #[must_use]
    pub const fn with_category(mut self, category: Option<ProductCategory>) -> Self {
        self.category = category;
        self
    }

    /// Load the listing and ask the backend to seed its demo catalog.
    ///
    /// Both requests run concurrently. The seed outcome is only logged. A
    /// failed listing leaves the grid empty.
    #[instrument(skip(self), fields(category = ?self.category))]
    pub async fn mount(&mut self) {
        self.loading = true;
        let api = self.session.api();

        let (listing, seeded) = tokio::join!(api.products(self.category), api.init_products());

        match seeded {
            Ok(reply) => debug!(message = %reply.message, "Demo catalog seed requested"),
            Err(e) => debug!(error = %e, "Demo catalog seed failed; ignoring"),
        }

        self.products = match listing {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                products
            }
            Err(e) => {
                warn!(error = %e, "Failed to load products");
                Vec::new()
            }
        };
        self.loading = false;
    }

    /// Products in backend order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn category(&self) -> Option<ProductCategory> {
        self.category
    }

    /// Add one unit of a product to the signed-in user's cart.
    ///
    /// Every outcome is reported through the notifier before returning.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn add_to_cart(&self, product_id: &ProductId) -> AddToCartOutcome {
        if !self.session.is_authenticated() {
            self.notifier.notify(LOGIN_REQUIRED_MESSAGE);
            return AddToCartOutcome::LoginRequired;
        }

        match self.session.api().add_to_cart(product_id, 1).await {
            Ok(item) => {
                info!(cart_item_id = %item.id, "Added to cart");
                add_breadcrumb(
                    "cart",
                    "Added product",
                    Some(&[("product_id", product_id.as_str())]),
                );
                self.notifier.notify(ADDED_TO_CART_MESSAGE);
                AddToCartOutcome::Added(item)
            }
            Err(e) => {
                warn!(error = %e, "Add to cart failed");
                self.notifier.notify(ADD_TO_CART_FAILED_MESSAGE);
                AddToCartOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for CatalogView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogView")
            .field("category", &self.category)
            .field("products", &self.products.len())
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::api::ApiClient;
    use crate::services::storage::MemoryStore;
    use crate::views::notify::RecordingNotifier;

    fn unreachable_session() -> SessionStore {
        let api = ApiClient::with_base_url(
            Url::parse("http://127.0.0.1:9/api/").unwrap(),
            Duration::from_millis(500),
        )
        .unwrap();
        SessionStore::new(api, Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_guest_add_to_cart_requires_login() {
        let notifier = Arc::new(RecordingNotifier::new());
        let view = CatalogView::new(unreachable_session(), notifier.clone());

        let outcome = view.add_to_cart(&ProductId::new("p1")).await;

        assert_eq!(outcome, AddToCartOutcome::LoginRequired);
        assert_eq!(notifier.messages(), vec![LOGIN_REQUIRED_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_failed_listing_leaves_empty_grid() {
        let mut view = CatalogView::new(unreachable_session(), Arc::new(RecordingNotifier::new()))
            .with_category(Some(ProductCategory::Electronics));
        assert!(view.is_loading());

        view.mount().await;

        assert!(!view.is_loading());
        assert!(view.products().is_empty());
        assert_eq!(view.category(), Some(ProductCategory::Electronics));
    }
}
