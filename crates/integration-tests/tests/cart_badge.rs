//! Cart badge refresh rules and header chrome.

use std::sync::Arc;
use std::time::Duration;

use rk_industry_integration_tests::{Failing, MockBackend, MockUser, spawn_backend};
use rk_industry_storefront::api::ApiClient;
use rk_industry_storefront::models::session::keys;
use rk_industry_storefront::services::storage::MemoryStore;
use rk_industry_storefront::views::{AccountChrome, CartBadge, RecordingNotifier, ViewShell};
use secrecy::SecretString;

fn client(backend: &MockBackend) -> ApiClient {
    ApiClient::new(&backend.config("unused")).expect("Failed to build API client")
}

fn backend_user(backend: &MockBackend) {
    backend.add_user(MockUser::new("u1", "ann@example.com", "pw", "Ann"));
    backend.seed_products();
}

async fn mount(backend: &MockBackend, storage: MemoryStore) -> ViewShell {
    ViewShell::mount(
        client(backend),
        Arc::new(storage),
        Arc::new(RecordingNotifier::new()),
    )
    .await
}

#[tokio::test]
async fn test_restored_session_shows_cart_count() {
    let backend = spawn_backend().await;
    backend_user(&backend);
    backend.issue_token("T1", "u1");
    backend.add_cart_line("u1", "p-tee", 2);
    backend.add_cart_line("u1", "p-wallet", 1);

    let shell = mount(&backend, MemoryStore::with_entry(keys::TOKEN, "T1")).await;

    assert_eq!(shell.cart_badge().count(), 2);
    assert_eq!(
        shell.header().account,
        AccountChrome::SignedIn {
            greeting: "Hello, Ann".to_string(),
            cart_count: Some(2),
        }
    );
    assert_eq!(backend.hits("GET /cart"), 1);
}

#[tokio::test]
async fn test_guest_mount_fetches_no_cart() {
    let backend = spawn_backend().await;
    backend_user(&backend);

    let shell = mount(&backend, MemoryStore::new()).await;

    assert_eq!(shell.header().account, AccountChrome::Guest);
    assert_eq!(backend.hits("GET /cart"), 0);
}

#[tokio::test]
async fn test_empty_cart_hides_badge() {
    let backend = spawn_backend().await;
    backend_user(&backend);
    backend.issue_token("T1", "u1");

    let shell = mount(&backend, MemoryStore::with_entry(keys::TOKEN, "T1")).await;

    assert!(matches!(
        shell.header().account,
        AccountChrome::SignedIn { cart_count: None, .. }
    ));
}

#[tokio::test]
async fn test_badge_follows_login_and_keeps_count_on_logout() {
    let backend = spawn_backend().await;
    backend_user(&backend);
    backend.add_cart_line("u1", "p-buds", 1);
    let shell = mount(&backend, MemoryStore::new()).await;
    let mut count = shell.cart_badge().subscribe();

    shell
        .auth()
        .login("ann@example.com", &SecretString::from("pw".to_owned()))
        .await
        .expect("login");

    tokio::time::timeout(Duration::from_secs(5), count.wait_for(|c| *c == 1))
        .await
        .expect("badge refreshed in time")
        .expect("badge task alive");
    assert_eq!(backend.hits("GET /cart"), 1);

    shell.auth().logout();

    assert_eq!(shell.header().account, AccountChrome::Guest);
    assert_eq!(shell.cart_badge().count(), 1);
}

#[tokio::test]
async fn test_refresh_failure_keeps_previous_count() {
    let backend = spawn_backend().await;
    backend_user(&backend);
    backend.issue_token("T1", "u1");
    backend.add_cart_line("u1", "p-tee", 1);

    let api = client(&backend);
    api.attach(rk_industry_core::AccessToken::new("T1"));
    let badge = CartBadge::new(api);
    badge.refresh().await;
    assert_eq!(badge.count(), 1);

    backend.add_cart_line("u1", "p-buds", 1);
    backend.set_failing(Failing::Cart, true);
    badge.refresh().await;

    assert_eq!(badge.count(), 1);
    assert_eq!(backend.hits("GET /cart"), 2);
}
