//! Integration test support for the RK Industry client.
//!
//! [`spawn_backend`] starts an in-process mock of the storefront backend on
//! an ephemeral port. It speaks the same JSON contract as the real service
//! (FastAPI-style `{"detail": ...}` errors, bearer tokens) and counts every
//! request so tests can assert that no request was made.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rk-industry-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;
use uuid::Uuid;

use rk_industry_storefront::config::StorefrontConfig;

/// A registered account.
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub address: String,
}

impl MockUser {
    /// A user with placeholder contact fields.
    #[must_use]
    pub fn new(id: &str, email: &str, password: &str, full_name: &str) -> Self {
        Self {
            id: id.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            full_name: full_name.to_owned(),
            phone: "+880 1700 000000".to_owned(),
            address: "House 1, Road 2, Dhaka".to_owned(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "email": self.email,
            "full_name": self.full_name,
            "phone": self.phone,
            "address": self.address,
            "created_at": "2025-07-15T10:00:00.000000",
        })
    }
}

#[derive(Debug, Clone)]
struct CartLine {
    id: String,
    product_id: String,
    quantity: u32,
}

/// Routes whose handler can be switched to answer 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failing {
    Products,
    InitProducts,
    Cart,
    Contact,
}

#[derive(Default)]
struct Inner {
    users: Vec<MockUser>,
    tokens: HashMap<String, String>,
    products: Vec<Value>,
    carts: HashMap<String, Vec<CartLine>>,
    orders: HashMap<String, Vec<Value>>,
    contacts: Vec<Value>,
    hits: HashMap<String, usize>,
    authorizations: Vec<Option<String>>,
    failing: Vec<Failing>,
}

#[derive(Default)]
struct MockState {
    inner: Mutex<Inner>,
    seeded: AtomicBool,
}

impl MockState {
    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, route: &str, headers: &HeaderMap) {
        let authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let mut inner = self.lock();
        *inner.hits.entry(route.to_owned()).or_default() += 1;
        inner.authorizations.push(authorization);
    }

    fn is_failing(&self, route: Failing) -> bool {
        self.lock().failing.contains(&route)
    }

    /// Resolve the bearer token to a user id.
    fn authenticate(&self, headers: &HeaderMap) -> Result<String, Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| detail(StatusCode::FORBIDDEN, "Not authenticated"))?;

        self.lock()
            .tokens
            .get(token)
            .cloned()
            .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Could not validate credentials"))
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn server_error() -> Response {
    detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

fn demo_products() -> Vec<Value> {
    vec![
        json!({"id": "p-tee", "name": "Classic Cotton T-Shirt", "description": "Soft everyday tee",
               "price": 19.99, "category": "clothing", "image_url": "https://img.test/tee.jpg", "stock": 100}),
        json!({"id": "p-buds", "name": "Wireless Earbuds", "description": "Bluetooth 5.3",
               "price": 49.5, "category": "electronics", "image_url": "https://img.test/buds.jpg", "stock": 25}),
        json!({"id": "p-wallet", "name": "Leather Wallet", "description": "Hand stitched",
               "price": 25, "category": "accessories", "image_url": "https://img.test/wallet.jpg", "stock": 40}),
    ]
}

// ============================================================================
// Handlers
// ============================================================================

async fn root(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET /", &headers);
    Json(json!({ "message": "RK Industry API" })).into_response()
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<LoginBody>,
) -> Response {
    state.record("POST /login", &headers);
    let mut inner = state.lock();
    let Some(user_id) = inner
        .users
        .iter()
        .find(|u| u.email == body.email && u.password == body.password)
        .map(|u| u.id.clone())
    else {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect email or password");
    };

    let token = Uuid::new_v4().to_string();
    inner.tokens.insert(token.clone(), user_id);
    Json(json!({ "access_token": token, "token_type": "bearer" })).into_response()
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    password: String,
    full_name: String,
    phone: String,
    address: String,
}

async fn register(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<RegisterBody>,
) -> Response {
    state.record("POST /register", &headers);
    let mut inner = state.lock();
    if inner.users.iter().any(|u| u.email == body.email) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }

    let user = MockUser {
        id: Uuid::new_v4().to_string(),
        email: body.email,
        password: body.password,
        full_name: body.full_name,
        phone: body.phone,
        address: body.address,
    };
    let response = user.to_json();
    inner.users.push(user);
    Json(response).into_response()
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET /me", &headers);
    let user_id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let inner = state.lock();
    inner
        .users
        .iter()
        .find(|u| u.id == user_id)
        .map_or_else(
            || detail(StatusCode::UNAUTHORIZED, "User not found"),
            |u| Json(u.to_json()).into_response(),
        )
}

#[derive(Deserialize)]
struct ProductQuery {
    category: Option<String>,
}

async fn products(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<ProductQuery>,
) -> Response {
    state.record("GET /products", &headers);
    if state.is_failing(Failing::Products) {
        return server_error();
    }
    let inner = state.lock();
    let listed: Vec<&Value> = inner
        .products
        .iter()
        .filter(|p| {
            query
                .category
                .as_deref()
                .is_none_or(|c| p["category"].as_str() == Some(c))
        })
        .collect();
    Json(json!(listed)).into_response()
}

async fn init_products(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("POST /init-products", &headers);
    if state.is_failing(Failing::InitProducts) {
        return server_error();
    }
    if state.seeded.swap(true, Ordering::SeqCst) {
        return Json(json!({ "message": "Products already initialized" })).into_response();
    }
    let mut inner = state.lock();
    if inner.products.is_empty() {
        inner.products = demo_products();
    }
    Json(json!({ "message": "Sample products initialized" })).into_response()
}

async fn cart(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET /cart", &headers);
    let user_id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if state.is_failing(Failing::Cart) {
        return server_error();
    }
    let inner = state.lock();
    let lines: Vec<Value> = inner
        .carts
        .get(&user_id)
        .into_iter()
        .flatten()
        .map(|line| {
            let product = inner
                .products
                .iter()
                .find(|p| p["id"] == line.product_id.as_str())
                .cloned();
            json!({
                "id": line.id,
                "product_id": line.product_id,
                "quantity": line.quantity,
                "product": product,
            })
        })
        .collect();
    Json(json!(lines)).into_response()
}

#[derive(Deserialize)]
struct AddToCartBody {
    product_id: String,
    quantity: u32,
}

async fn add_to_cart(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<AddToCartBody>,
) -> Response {
    state.record("POST /cart", &headers);
    let user_id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if state.is_failing(Failing::Cart) {
        return server_error();
    }
    let mut inner = state.lock();
    if !inner.products.iter().any(|p| p["id"] == body.product_id.as_str()) {
        return detail(StatusCode::NOT_FOUND, "Product not found");
    }

    let line = CartLine {
        id: Uuid::new_v4().to_string(),
        product_id: body.product_id,
        quantity: body.quantity,
    };
    let response = json!({
        "id": line.id,
        "product_id": line.product_id,
        "quantity": line.quantity,
    });
    inner.carts.entry(user_id).or_default().push(line);
    Json(response).into_response()
}

async fn remove_from_cart(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
) -> Response {
    state.record("DELETE /cart", &headers);
    let user_id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mut inner = state.lock();
    let lines = inner.carts.entry(user_id).or_default();
    let before = lines.len();
    lines.retain(|line| line.id != item_id);
    if lines.len() == before {
        return detail(StatusCode::NOT_FOUND, "Cart item not found");
    }
    Json(json!({ "message": "Item removed from cart" })).into_response()
}

async fn orders(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET /orders", &headers);
    let user_id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let inner = state.lock();
    let mut history = inner.orders.get(&user_id).cloned().unwrap_or_default();
    history.reverse();
    Json(json!(history)).into_response()
}

async fn create_order(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record("POST /orders", &headers);
    let user_id = match state.authenticate(&headers) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mut order = body;
    order["id"] = json!(Uuid::new_v4().to_string());
    order["user_id"] = json!(user_id);
    order["status"] = json!("pending");
    order["created_at"] = json!("2025-07-15T12:30:00.000000");

    let mut inner = state.lock();
    inner.carts.remove(&user_id);
    inner
        .orders
        .entry(user_id)
        .or_default()
        .push(order.clone());
    Json(order).into_response()
}

#[derive(Deserialize)]
struct ContactBody {
    name: String,
    email: String,
    project: String,
    message: String,
}

async fn submit_contact(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<ContactBody>,
) -> Response {
    state.record("POST /contact", &headers);
    if state.is_failing(Failing::Contact) {
        return server_error();
    }
    let stored = json!({
        "id": Uuid::new_v4().to_string(),
        "name": body.name,
        "email": body.email,
        "project": body.project,
        "message": body.message,
        "created_at": "2025-07-15T09:00:00.000000",
    });
    state.lock().contacts.push(stored.clone());
    Json(stored).into_response()
}

async fn contact_messages(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.record("GET /contact", &headers);
    let mut messages = state.lock().contacts.clone();
    messages.reverse();
    Json(json!(messages)).into_response()
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/", get(root))
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/me", get(me))
        .route("/api/products", get(products))
        .route("/api/init-products", post(init_products))
        .route("/api/cart", get(cart).post(add_to_cart))
        .route("/api/cart/{item_id}", delete(remove_from_cart))
        .route("/api/orders", get(orders).post(create_order))
        .route("/api/contact", get(contact_messages).post(submit_contact))
        .with_state(state)
}

// ============================================================================
// Test harness
// ============================================================================

/// A running mock backend. The server stops when this is dropped.
pub struct MockBackend {
    address: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

/// Start a mock backend on an ephemeral port.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn spawn_backend() -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind random port");
    let address = listener.local_addr().expect("failed to read local address");

    let state = Arc::new(MockState::default());
    let app = router(Arc::clone(&state));
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend {
        address,
        state,
        server,
    }
}

impl MockBackend {
    /// Origin of the backend, without the `/api` prefix.
    ///
    /// # Panics
    ///
    /// Never in practice: the address always forms a valid URL.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.address)).expect("valid mock URL")
    }

    /// Client configuration pointing at this backend.
    #[must_use]
    pub fn config(&self, state_dir: impl Into<PathBuf>) -> StorefrontConfig {
        StorefrontConfig::for_backend(self.url(), state_dir.into())
    }

    /// Register an account directly, bypassing `/register`.
    pub fn add_user(&self, user: MockUser) {
        self.state.lock().users.push(user);
    }

    /// Make `token` resolve to `user_id`.
    pub fn issue_token(&self, token: &str, user_id: &str) {
        self.state
            .lock()
            .tokens
            .insert(token.to_owned(), user_id.to_owned());
    }

    /// Load the demo catalog without going through `/init-products`.
    pub fn seed_products(&self) {
        self.state.lock().products = demo_products();
    }

    /// Put a line in a user's cart.
    pub fn add_cart_line(&self, user_id: &str, product_id: &str, quantity: u32) {
        self.state
            .lock()
            .carts
            .entry(user_id.to_owned())
            .or_default()
            .push(CartLine {
                id: Uuid::new_v4().to_string(),
                product_id: product_id.to_owned(),
                quantity,
            });
    }

    /// Make a route answer 500 until switched back.
    pub fn set_failing(&self, route: Failing, failing: bool) {
        let mut inner = self.state.lock();
        inner.failing.retain(|r| *r != route);
        if failing {
            inner.failing.push(route);
        }
    }

    /// Number of requests for a route, e.g. `"GET /me"`.
    #[must_use]
    pub fn hits(&self, route: &str) -> usize {
        self.state.lock().hits.get(route).copied().unwrap_or(0)
    }

    /// Number of requests across all routes.
    #[must_use]
    pub fn total_hits(&self) -> usize {
        self.state.lock().hits.values().sum()
    }

    /// `Authorization` header of the most recent request.
    #[must_use]
    pub fn last_authorization(&self) -> Option<String> {
        self.state.lock().authorizations.last().cloned().flatten()
    }

    /// Orders stored for a user, oldest first.
    #[must_use]
    pub fn orders_of(&self, user_id: &str) -> Vec<Value> {
        self.state
            .lock()
            .orders
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of stored contact messages.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.state.lock().contacts.len()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}
