//! Project listing, creation and follow-up call tests.

use infrakit::{
    Create, Credentials, InfrakitClient, InfrakitError, List, Mode, Project, ProjectCreateParams,
};
use wiremock::matchers::{body_json, method, path, query_param};
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

fn project_json(id: i64, uuid: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "uuid": uuid,
        "name": name,
        "timestamp": 1700000000000_i64,
        "archived": false,
        "reportsEnabled": true
    })
}

#[tokio::test]
async fn test_list_projects_preserves_order() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            project_json(1, "uuid-1", "Ring Road West"),
            project_json(2, "uuid-2", "Harbor Tunnel"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let projects = Project::list(&client, &Default::default()).await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "Ring Road West");
    assert_eq!(projects[1].name, "Harbor Tunnel");
}

#[tokio::test]
async fn test_list_projects_with_organization_filter() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("organizationUuid", "org-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = infrakit::ProjectListQuery {
        organization_uuid: Some("org-1".to_string()),
        ..Default::default()
    };
    let projects = Project::list(&client, &query).await.unwrap();
    assert!(projects.is_empty());
}

#[tokio::test]
async fn test_create_project_omits_unset_fields() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    // Exact body match: no optional key may appear as null.
    Mock::given(method("POST"))
        .and(path("/project"))
        .and(body_json(serde_json::json!({"name": "Test Project"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "uuid": "new-uuid",
            "id": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created = Project::create(&client, ProjectCreateParams::new("Test Project"))
        .await
        .unwrap();

    assert!(created.status);
    assert_eq!(created.uuid, "new-uuid");
    assert_eq!(created.id, 7);
}

#[tokio::test]
async fn test_server_error_carries_full_request_context() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = Project::list(&client, &Default::default()).await.unwrap_err();

    match &err {
        InfrakitError::Api {
            message,
            status_code,
        } => {
            assert_eq!(*status_code, Some(500));
            assert!(message.contains(&format!("Request URL: {}/projects", server.uri())));
            assert!(message.contains("Request Method: GET"));
            assert!(message.contains("API Response Text: internal failure"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_explicit_status_false_is_api_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": false,
            "error": "name already taken"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = Project::create(&client, ProjectCreateParams::new("Duplicate"))
        .await
        .unwrap_err();

    match &err {
        InfrakitError::Api { message, .. } => {
            assert!(message.contains("name already taken"));
            assert!(message.contains("Request Method: POST"));
            assert!(message.contains(r#"Request Payload: {"name":"Duplicate"}"#));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_success_body_is_malformed_response() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login page</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = Project::list(&client, &Default::default()).await.unwrap_err();
    assert!(matches!(
        err,
        InfrakitError::MalformedResponse { ref body, .. } if body.contains("login page")
    ));
}

#[tokio::test]
async fn test_project_folders_follow_up_call() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(serde_json::json!([project_json(1, "uuid-1", "Ring Road West")])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/project/uuid-1/folders"))
        .and(query_param("depth", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "folders": [
                {"uuid": "f-1", "name": "As-built"},
                {"uuid": "f-2", "name": "Drawings"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let projects = Project::list(&client, &Default::default()).await.unwrap();
    let folders = projects[0].folders(&client, 1).await.unwrap();

    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].name, "As-built");
}

#[tokio::test]
async fn test_follow_up_with_other_credentials_is_rejected() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200)
            .set_body_json(serde_json::json!([project_json(1, "uuid-1", "Ring Road West")])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let projects = Project::list(&client, &Default::default()).await.unwrap();

    // Same server, different identity: the record must refuse it.
    let other_creds = Credentials::password("intruder", "pw", Mode::Production).unwrap();
    let other_client = InfrakitClient::with_urls(
        other_creds,
        &server.uri(),
        &format!("{}/auth/token", server.uri()),
    )
    .unwrap();

    let err = projects[0].folders(&other_client, 0).await.unwrap_err();
    assert!(matches!(err, InfrakitError::CredentialMismatch));
}
