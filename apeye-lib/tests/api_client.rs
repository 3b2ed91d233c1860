use apeye_lib::model::{CreateCollectionInput, CreateEnvironmentInput, UpdateEnvironmentInput};
use apeye_lib::{ApiClient, ApiError, HistoryFilter, HttpMethod, StatusFilter};
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_collections_with_session_cookie() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "c1",
                "workspace_id": "w1",
                "name": "Users API",
                "requests": [{
                    "id": "r1",
                    "collection_id": "c1",
                    "name": "List users",
                    "method": "GET",
                    "url": "{{base}}/users",
                    "headers": {"Accept": "application/json"}
                }]
            }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri()).with_cookie("session=abc");
    let collections = client.list_collections().await.unwrap();

    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "Users API");
    assert_eq!(collections[0].requests[0].method, HttpMethod::GET);
}

#[tokio::test]
async fn test_create_collection_and_environment() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collections"))
        .and(body_partial_json(json!({"workspace_id": "w1", "name": "Billing"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "c2", "workspace_id": "w1", "name": "Billing"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/environments/e1"))
        .and(body_partial_json(json!({"variables": {"token": "t2"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "e1", "workspace_id": "w1", "name": "dev", "variables": {"token": "t2"}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/environments"))
        .and(body_partial_json(json!({"name": "dev"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "e1", "workspace_id": "w1", "name": "dev", "variables": {"token": "t1"}
        })))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(format!("{}/", mock_server.uri()));

    let collection = client
        .create_collection(&CreateCollectionInput {
            workspace_id: "w1".into(),
            name: "Billing".into(),
            description: None,
        })
        .await
        .unwrap();
    assert_eq!(collection.id, "c2");

    let env = client
        .create_environment(&CreateEnvironmentInput {
            workspace_id: None,
            name: "dev".into(),
            variables: HashMap::from([("token".to_string(), "t1".to_string())]),
        })
        .await
        .unwrap();
    assert_eq!(env.variables["token"], "t1");

    let env = client
        .update_environment(
            "e1",
            &UpdateEnvironmentInput {
                name: None,
                variables: Some(HashMap::from([("token".to_string(), "t2".to_string())])),
            },
        )
        .await
        .unwrap();
    assert_eq!(env.variables["token"], "t2");
}

#[tokio::test]
async fn test_history_list_and_filter() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "h1", "method": "GET", "url": "https://api.example.com/users", "statusCode": 200, "responseTime": 40},
            {"id": "h2", "method": "POST", "url": "https://api.example.com/users", "statusCode": 422, "responseTime": 51},
            {"id": "h3", "method": "GET", "url": "http://localhost:3000/health", "statusCode": 500, "responseTime": 3}
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri());
    let entries = client
        .list_history(apeye_lib::client::api::DEFAULT_HISTORY_LIMIT)
        .await
        .unwrap();
    assert_eq!(entries.len(), 3);

    let filter = HistoryFilter {
        method: Some(HttpMethod::GET),
        status: StatusFilter::Error,
        search_query: String::new(),
    };
    let ids: Vec<_> = filter.apply(&entries).iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["h3"]);

    client.clear_history().await.unwrap();
}

#[tokio::test]
async fn test_error_mapping() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/environments"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/collections/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "collection not found"})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(mock_server.uri());

    assert_eq!(client.list_environments().await.unwrap_err(), ApiError::Unauthorized);
    assert_eq!(
        client.delete_collection("missing").await.unwrap_err(),
        ApiError::Status {
            status: 404,
            message: "collection not found".into()
        }
    );
    assert!(matches!(
        client.get_collection("c1").await.unwrap_err(),
        ApiError::Decode(_)
    ));
}
