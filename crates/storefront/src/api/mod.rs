//! REST client for the storefront backend.
//!
//! # Architecture
//!
//! - One shared `reqwest::Client` behind an `Arc`, cheap to clone into every view
//! - The bearer credential is *attached* to the client after login/restoration
//!   and sent as `Authorization: Bearer <token>` on every subsequent request
//! - Non-success responses are decoded from the backend's `{"detail": ...}`
//!   error payload into [`ApiError`]
//!
//! No request is retried; callers decide how failures surface.

mod types;

pub use types::{ApiMessage, TokenResponse};

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use rk_industry_core::{AccessToken, CartItemId, ProductCategory, ProductId};

use crate::config::StorefrontConfig;
use crate::models::cart::AddToCartRequest;
use crate::models::{
    CartItem, ContactForm, ContactMessage, Order, OrderRequest, Product, RegistrationProfile,
    UserRef,
};
use types::{ErrorBody, LoginRequest, RegisterRequest};

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The credential was missing, invalid or expired (401/403).
    #[error("unauthorized{}", format_detail(.detail.as_deref()))]
    Unauthorized {
        /// Literal `detail` from the error payload, if any.
        detail: Option<String>,
    },

    /// The backend answered with another non-success status.
    #[error("API error: {status}{}", format_detail(.detail.as_deref()))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Literal `detail` from the error payload, if any.
        detail: Option<String>,
    },

    /// An endpoint URL could not be built from the configured base.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

fn format_detail(detail: Option<&str>) -> String {
    detail.map_or_else(String::new, |d| format!(" - {d}"))
}

impl ApiError {
    /// Build an error from a non-success status and its raw body.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Self::Unauthorized { detail }
        } else {
            Self::Status {
                status: status.as_u16(),
                detail,
            }
        }
    }

    /// The backend's literal error message, when it sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Status { detail, .. } => detail.as_deref(),
            Self::Http(_) | Self::InvalidUrl(_) => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Storefront backend API client.
///
/// Cloning is cheap and every clone shares the attached credential.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    /// Root of the REST surface, always ending in `/`.
    base_url: Url,
    /// Credential attached to outgoing requests.
    authorization: RwLock<Option<AccessToken>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("authorized", &self.is_authorized())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Self::with_base_url(config.api_base_url(), config.request_timeout)
    }

    /// Create a client rooted at `base_url` (the `/api/` prefix included).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn with_base_url(mut base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url,
                authorization: RwLock::new(None),
            }),
        })
    }

    // =========================================================================
    // Authorization
    // =========================================================================

    /// Attach a credential to all subsequent requests.
    pub fn attach(&self, token: AccessToken) {
        *self
            .inner
            .authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Stop sending a credential.
    pub fn detach(&self) {
        *self
            .inner
            .authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a credential is currently attached.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.inner
            .authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn attached_token(&self) -> Option<AccessToken> {
        self.inner
            .authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Build the URL for an endpoint below the API root.
    ///
    /// Segments are percent-encoded, so IDs can never escape their path slot.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request carrying the attached credential.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.inner.client.request(method, url);
        match self.attached_token() {
            Some(token) => builder.header(AUTHORIZATION, token.authorization_header()),
            None => builder,
        }
    }

    /// Send a request and decode a JSON success body.
    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status, &body))
    }

    // =========================================================================
    // Endpoints
    // =========================================================================

    /// `GET /` - API banner, used as a connectivity check.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn root(&self) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint(&[""])?;
        Self::send(self.request(Method::GET, url)).await
    }

    /// `POST /login` - exchange email and password for a bearer token.
    ///
    /// Does not attach the token; that is the session store's decision.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for rejected credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<TokenResponse, ApiError> {
        let url = self.endpoint(&["login"])?;
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        Self::send(self.request(Method::POST, url).json(&body)).await
    }

    /// `POST /register` - create an account. Returns no credential.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with the backend's detail on rejection
    /// (e.g. "Email already registered").
    #[instrument(skip(self, profile), fields(email = %profile.email))]
    pub async fn register(&self, profile: &RegistrationProfile) -> Result<UserRef, ApiError> {
        let url = self.endpoint(&["register"])?;
        let body = RegisterRequest::from(profile);
        Self::send(self.request(Method::POST, url).json(&body)).await
    }

    /// `GET /me` with the attached credential.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if no valid credential is attached.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<UserRef, ApiError> {
        let url = self.endpoint(&["me"])?;
        Self::send(self.request(Method::GET, url)).await
    }

    /// `GET /me` with an explicit credential, regardless of what is attached.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the credential is rejected.
    #[instrument(skip(self, token))]
    pub async fn current_user_with(&self, token: &AccessToken) -> Result<UserRef, ApiError> {
        let url = self.endpoint(&["me"])?;
        let request = self
            .inner
            .client
            .get(url)
            .header(AUTHORIZATION, token.authorization_header());
        Self::send(request).await
    }

    /// `GET /products`, optionally filtered by category.
    ///
    /// Products are returned in backend order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn products(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint(&["products"])?;
        if let Some(category) = category {
            url.query_pairs_mut()
                .append_pair("category", category.as_str());
        }
        Self::send(self.request(Method::GET, url)).await
    }

    /// `POST /init-products` - ask the backend to seed its demo catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn init_products(&self) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint(&["init-products"])?;
        Self::send(self.request(Method::POST, url)).await
    }

    /// `GET /cart` - the current user's cart lines.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` without an attached credential.
    #[instrument(skip(self))]
    pub async fn cart(&self) -> Result<Vec<CartItem>, ApiError> {
        let url = self.endpoint(&["cart"])?;
        Self::send(self.request(Method::GET, url)).await
    }

    /// `POST /cart` - add `quantity` units of a product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub async fn add_to_cart(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        let url = self.endpoint(&["cart"])?;
        let body = AddToCartRequest {
            product_id,
            quantity,
        };
        Self::send(self.request(Method::POST, url).json(&body)).await
    }

    /// `DELETE /cart/{id}` - remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self, item_id), fields(cart_item_id = %item_id))]
    pub async fn remove_from_cart(&self, item_id: &CartItemId) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint(&["cart", item_id.as_str()])?;
        Self::send(self.request(Method::DELETE, url)).await
    }

    /// `GET /orders` - order history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["orders"])?;
        Self::send(self.request(Method::GET, url)).await
    }

    /// `POST /orders` - place an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self, order), fields(items = order.items.len(), total = %order.total_amount))]
    pub async fn create_order(&self, order: &OrderRequest) -> Result<Order, ApiError> {
        let url = self.endpoint(&["orders"])?;
        Self::send(self.request(Method::POST, url).json(order)).await
    }

    /// `POST /contact` - submit a portfolio contact message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ContactMessage, ApiError> {
        let url = self.endpoint(&["contact"])?;
        Self::send(self.request(Method::POST, url).json(form)).await
    }

    /// `GET /contact` - stored contact messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on network failure or a non-success status.
    #[instrument(skip(self))]
    pub async fn contact_messages(&self) -> Result<Vec<ContactMessage>, ApiError> {
        let url = self.endpoint(&["contact"])?;
        Self::send(self.request(Method::GET, url)).await
    }
}
