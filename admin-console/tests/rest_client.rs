//! End-to-end coverage for the reqwest REST client against a fake backend.

use std::net::TcpListener;
use std::time::Duration;

use admin_console::domain::ports::{RemoteError, RoleGateway, UserGateway};
use admin_console::domain::{EntityId, NewRole, NewUser, User, UserStatus};
use admin_console::outbound::rest::RestClient;
use serde_json::json;
use url::Url;

#[allow(dead_code)]
mod support;

use support::fake_backend::{FakeBackend, Store};

fn seeded() -> Store {
    Store::default()
        .with_user(json!({
            "id": 1, "name": "Zoe Park", "email": "zoe@x.com",
            "role": "Admin", "status": "Active"
        }))
        .with_user(json!({
            "id": "u-2", "name": "Al Ray", "email": "al@x.com",
            "role": "Viewer", "status": "Inactive"
        }))
        .with_role(json!({ "id": 1, "name": "Admin", "permissions": ["read", "write"] }))
        .with_role(json!({ "id": 2, "name": "Viewer", "permissions": "read, , audit" }))
}

#[actix_rt::test]
async fn lists_users_with_numeric_and_textual_ids() {
    let backend = FakeBackend::start(seeded()).expect("backend starts");

    let users = backend.client().list_users().await.expect("list users");

    let ids: Vec<_> = users.iter().map(|user| user.id.clone()).collect();
    assert_eq!(ids, vec![EntityId::Number(1), EntityId::from("u-2")]);
    assert_eq!(users[1].status, UserStatus::Inactive);
    backend.stop().await;
}

#[actix_rt::test]
async fn lists_roles_accepting_joined_permission_text() {
    let backend = FakeBackend::start(seeded()).expect("backend starts");

    let roles = backend.client().list_roles().await.expect("list roles");

    assert_eq!(roles[0].permissions, vec!["read", "write"]);
    assert_eq!(roles[1].permissions, vec!["read", "audit"]);
    backend.stop().await;
}

#[actix_rt::test]
async fn create_posts_a_body_without_id_and_returns_the_assigned_one() {
    let backend = FakeBackend::start(seeded()).expect("backend starts");
    let payload = NewUser {
        name: "Ann Lee".to_owned(),
        email: "ann@x.com".to_owned(),
        role: "Admin".to_owned(),
        status: UserStatus::Active,
    };

    let created = backend.client().create_user(&payload).await.expect("create");

    assert_eq!(created.id, EntityId::Number(2));
    assert_eq!(created.name, "Ann Lee");
    let store = backend.store();
    let posts = store.requests_with("POST");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].path, "/users");
    assert_eq!(
        posts[0].body,
        Some(json!({
            "name": "Ann Lee", "email": "ann@x.com",
            "role": "Admin", "status": "Active"
        }))
    );
    drop(store);
    backend.stop().await;
}

#[actix_rt::test]
async fn update_puts_the_full_record_under_its_id() {
    let backend = FakeBackend::start(seeded()).expect("backend starts");
    let record = User {
        id: EntityId::from("u-2"),
        name: "Al Ray".to_owned(),
        email: "al@corp.com".to_owned(),
        role: "Admin".to_owned(),
        status: UserStatus::Active,
    };

    let updated = backend
        .client()
        .update_user(&record.id, &record)
        .await
        .expect("update");

    assert_eq!(updated, record);
    let store = backend.store();
    let puts = store.requests_with("PUT");
    assert_eq!(puts[0].path, "/users/u-2");
    assert_eq!(
        puts[0].body.as_ref().and_then(|body| body.get("id")),
        Some(&json!("u-2"))
    );
    assert_eq!(store.users()[1]["email"], json!("al@corp.com"));
    drop(store);
    backend.stop().await;
}

#[actix_rt::test]
async fn role_create_sends_permissions_as_a_list() {
    let backend = FakeBackend::start(Store::default()).expect("backend starts");
    let payload = NewRole {
        name: "Editor".to_owned(),
        permissions: vec!["read".to_owned(), "write".to_owned()],
    };

    let created = backend.client().create_role(&payload).await.expect("create");

    assert_eq!(created.id, EntityId::Number(1));
    assert_eq!(
        backend.store().roles(),
        &[json!({ "id": 1, "name": "Editor", "permissions": ["read", "write"] })]
    );
    backend.stop().await;
}

#[actix_rt::test]
async fn delete_removes_the_record_and_reports_missing_ids() {
    let backend = FakeBackend::start(seeded()).expect("backend starts");
    let client = backend.client();

    client.delete_role(&EntityId::Number(2)).await.expect("delete");
    let missing = client
        .delete_role(&EntityId::Number(2))
        .await
        .expect_err("already gone");

    assert_eq!(backend.store().roles().len(), 1);
    assert!(matches!(missing, RemoteError::Status { status: 404, .. }));
    backend.stop().await;
}

#[actix_rt::test]
async fn server_errors_carry_status_and_body_preview() {
    let backend = FakeBackend::start(seeded()).expect("backend starts");
    backend.store().fail_with(500);

    let error = backend.client().list_users().await.expect_err("server fails");

    let RemoteError::Status { status, message } = error else {
        panic!("expected a status error");
    };
    assert_eq!(status, 500);
    assert!(message.contains("injected failure"));
    backend.stop().await;
}

#[actix_rt::test]
async fn configured_timeout_abandons_slow_requests() {
    let backend = FakeBackend::start(seeded()).expect("backend starts");
    backend.store().delay_by(Duration::from_secs(2));
    let client = RestClient::with_timeout(
        backend.base_url().clone(),
        Some(Duration::from_millis(100)),
    )
    .expect("client builds");

    let error = client.list_roles().await.expect_err("times out");

    assert!(matches!(error, RemoteError::Timeout { .. }));
    backend.stop().await;
}

#[actix_rt::test]
async fn unreachable_backends_map_to_transport_errors() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let base = Url::parse(&format!("http://127.0.0.1:{port}")).expect("url");

    let error = RestClient::new(base)
        .expect("client builds")
        .list_users()
        .await
        .expect_err("nothing listening");

    assert!(matches!(error, RemoteError::Transport { .. }));
}
