use std::{sync::Arc, time::Duration};

use serde_json::json;
use userdesk_console::infra::{
    api_client::ApiClient,
    services::{UserAdminApiAdapter, UserAdminService},
};
use userdesk_core::TransportError;
use userdesk_model::{Address, Company, NewUser, User, UserId};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer) -> UserAdminApiAdapter {
    let client = ApiClient::new(&server.uri(), Duration::from_secs(5))
        .expect("mock server uri is a valid base url");
    UserAdminApiAdapter::new(Arc::new(client))
}

fn leanne_json() -> serde_json::Value {
    json!({
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "phone": "1-770-736-8031 x56442",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874"
        },
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net"
        }
    })
}

#[tokio::test]
async fn list_users_decodes_service_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([leanne_json()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let users = adapter(&server).list_users().await.unwrap();

    assert_eq!(users.len(), 1);
    let user = &users[0];
    assert_eq!(user.id, Some(UserId(1)));
    assert_eq!(user.address.city, "Gwenborough");
    assert_eq!(user.company.name, "Romaguera-Crona");
}

#[tokio::test]
async fn get_user_hits_item_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(leanne_json()))
        .mount(&server)
        .await;

    let user = adapter(&server).get_user(UserId(1)).await.unwrap();
    assert_eq!(user.name, "Leanne Graham");
}

#[tokio::test]
async fn create_posts_record_without_id_and_with_username() {
    let server = MockServer::start().await;
    let payload = NewUser {
        name: "Ann Lee".into(),
        username: "USER-Ann".into(),
        email: "ann@example.com".into(),
        phone: "+15550100".into(),
        address: Address {
            street: "1 Main St".into(),
            city: "Springfield".into(),
        },
        company: Company::default(),
        website: String::new(),
    };
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_json(json!({
            "name": "Ann Lee",
            "username": "USER-Ann",
            "email": "ann@example.com",
            "phone": "+15550100",
            "address": { "street": "1 Main St", "city": "Springfield" },
            "company": { "name": "" },
            "website": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11,
            "name": "Ann Lee",
            "username": "USER-Ann",
            "email": "ann@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = adapter(&server).create_user(payload).await.unwrap();
    assert_eq!(created.id, Some(UserId(11)));
    assert_eq!(created.username, "USER-Ann");
}

#[tokio::test]
async fn update_puts_full_record() {
    let server = MockServer::start().await;
    let user: User = serde_json::from_value(leanne_json()).unwrap();
    let body = serde_json::to_value(&user).unwrap();
    Mock::given(method("PUT"))
        .and(path("/users/1"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let updated = adapter(&server)
        .update_user(UserId(1), user.clone())
        .await
        .unwrap();
    assert_eq!(updated, user);
}

#[tokio::test]
async fn delete_ignores_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    adapter(&server).delete_user(UserId(4)).await.unwrap();
}

#[tokio::test]
async fn not_found_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let err = adapter(&server).get_user(UserId(99)).await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Status {
            status: 404,
            body: "{}".into()
        }
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = adapter(&server).list_users().await.unwrap_err();
    assert!(matches!(err, TransportError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        ApiClient::new(&format!("http://{addr}"), Duration::from_secs(2))
            .unwrap();
    let err = UserAdminApiAdapter::new(Arc::new(client))
        .list_users()
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
}
