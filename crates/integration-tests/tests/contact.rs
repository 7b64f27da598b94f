//! Portfolio contact form against the mock backend.

use rk_industry_integration_tests::{Failing, MockBackend, spawn_backend};
use rk_industry_storefront::api::ApiClient;
use rk_industry_storefront::services::contact::{CONTACT_FAILED_MESSAGE, ContactService};

fn service(backend: &MockBackend) -> ContactService {
    ContactService::new(ApiClient::new(&backend.config("unused")).expect("client"))
}

#[tokio::test]
async fn test_submit_and_list_messages() {
    let backend = spawn_backend().await;
    let contact = service(&backend);

    let stored = contact
        .submit_fields("Ann", "ann@example.com", "Online shop", "Can you build one?")
        .await
        .expect("message stored");
    assert_eq!(stored.name, "Ann");
    assert!(stored.created_at.is_some());

    contact
        .submit_fields("Bob", "bob@example.com", "", "Hello")
        .await
        .expect("second message stored");

    let messages = contact.messages().await.expect("messages");
    let names: Vec<&str> = messages.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Bob", "Ann"]);
}

#[tokio::test]
async fn test_backend_failure_shows_fixed_message() {
    let backend = spawn_backend().await;
    backend.set_failing(Failing::Contact, true);

    let err = service(&backend)
        .submit_fields("Ann", "ann@example.com", "", "Hello")
        .await
        .expect_err("backend down");

    assert_eq!(err.display_message(), CONTACT_FAILED_MESSAGE);
    assert_eq!(backend.contact_count(), 0);
}

#[tokio::test]
async fn test_invalid_email_is_rejected_locally() {
    let backend = spawn_backend().await;

    let err = service(&backend)
        .submit_fields("Ann", "not-an-email", "", "Hello")
        .await
        .expect_err("invalid email");

    assert!(err.display_message().starts_with("invalid email"));
    assert_eq!(backend.total_hits(), 0);
}

#[tokio::test]
async fn test_api_root_answers() {
    let backend = spawn_backend().await;
    let api = ApiClient::new(&backend.config("unused")).expect("client");

    let banner = api.root().await.expect("root");

    assert_eq!(banner.message, "RK Industry API");
}
