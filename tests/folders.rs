//! Folder get/create tests, including the query-string creation quirk.

use infrakit::{Create, Credentials, Folder, FolderCreateParams, Get, InfrakitClient, Mode};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> InfrakitClient {
    let creds = Credentials::password("surveyor", "hunter2", Mode::Production).unwrap();
    InfrakitClient::with_urls(
        creds,
        &server.uri(),
        &format!("{}/auth/token", server.uri()),
    )
    .unwrap()
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"accessToken": "X"})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_folder_by_uuid() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/folder/f-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uuid": "f-1",
            "name": "As-built",
            "parentUuid": "root",
            "folders": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let folder = Folder::get(&client, "f-1".to_string()).await.unwrap();

    assert_eq!(folder.uuid, "f-1");
    assert_eq!(folder.name, "As-built");
    assert_eq!(folder.parent_uuid.as_deref(), Some("root"));
}

#[tokio::test]
async fn test_create_folder_sends_payload_in_query_string() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/folder"))
        .and(query_param("name", "Drawings"))
        .and(query_param("parentUuid", "root"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uuid": "f-new",
            "name": "Drawings",
            "parentUuid": "root"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = FolderCreateParams {
        name: "Drawings".to_string(),
        parent_uuid: Some("root".to_string()),
    };
    let folder = Folder::create(&client, params).await.unwrap();
    assert_eq!(folder.uuid, "f-new");
}

#[tokio::test]
async fn test_create_folder_without_parent_omits_query_key() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/folder"))
        .and(query_param("name", "Top level"))
        .and(query_param_is_missing("parentUuid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "uuid": "f-top",
            "name": "Top level"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = FolderCreateParams {
        name: "Top level".to_string(),
        parent_uuid: None,
    };
    let folder = Folder::create(&client, params).await.unwrap();
    assert!(folder.parent_uuid.is_none());
}
