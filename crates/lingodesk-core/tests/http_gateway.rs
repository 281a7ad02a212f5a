use std::sync::Arc;

use lingodesk_core::{
    ApiClient, AuthContext, ControllerState, GatewayError, HttpGateway, ListQuery, ResourceGateway, ResourceId,
    ResourceKind, ResourceListController,
};
use serde_json::{json, Map};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer, kind: ResourceKind) -> HttpGateway {
    let client = ApiClient::new(format!("{}/api/v1/admin", server.uri()), AuthContext::bearer("t0k3n"));
    HttpGateway::new(client, kind)
}

#[tokio::test]
async fn list_sends_paging_sort_and_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/vocabularies"))
        .and(query_param("page", "2"))
        .and(query_param("size", "10"))
        .and(query_param("sort", "id,asc"))
        .and(header("authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"id": 11, "word": "sun", "meaning_vi": "mặt trời"}],
            "number": 1,
            "totalPages": 3,
            "totalElements": 21
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway(&server, ResourceKind::Vocabularies);
    let page = gw.list(&ListQuery::new(2, 10).with_sort(Some("id,asc".into()))).await.unwrap();

    assert_eq!(page.page_number, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items[0].text("meaningVi"), "mặt trời");
}

#[tokio::test]
async fn list_passes_category_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/vocabularies"))
        .and(query_param("categoryId", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "word": "owl", "categoryId": 4}])))
        .mount(&server)
        .await;

    let gw = gateway(&server, ResourceKind::Vocabularies);
    let page = gw.list(&ListQuery::new(1, 10).with_category(Some(ResourceId(4)))).await.unwrap();
    assert_eq!(page.items[0].category_id(), Some(ResourceId(4)));
}

#[tokio::test]
async fn server_error_maps_to_api_error_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/articles"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "database offline"})))
        .mount(&server)
        .await;

    let gw = gateway(&server, ResourceKind::Articles);
    let err = gw.list(&ListQuery::new(1, 10)).await.unwrap_err();
    assert_eq!(err, GatewayError::Api { status: 500, message: "database offline".into() });
}

#[tokio::test]
async fn malformed_body_is_a_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let gw = gateway(&server, ResourceKind::Videos);
    assert!(matches!(gw.list(&ListQuery::new(1, 10)).await, Err(GatewayError::Format(_))));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let client = ApiClient::new("http://127.0.0.1:9/api", AuthContext::anonymous());
    let gw = HttpGateway::new(client, ResourceKind::Articles);
    assert!(matches!(gw.list(&ListQuery::new(1, 10)).await, Err(GatewayError::Network(_))));
}

#[tokio::test]
async fn update_puts_patch_and_reads_wrapped_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/admin/vocabularies/1"))
        .and(body_json(json!({"word": "cat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 1, "word": "cat"}})))
        .expect(1)
        .mount(&server)
        .await;

    let gw = gateway(&server, ResourceKind::Vocabularies);
    let mut patch = Map::new();
    patch.insert("word".into(), json!("cat"));
    let record = gw.update(ResourceId(1), &patch).await.unwrap();
    assert_eq!(record.text("word"), "cat");
}

#[tokio::test]
async fn update_with_empty_body_echoes_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/admin/articles/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let gw = gateway(&server, ResourceKind::Articles);
    let mut patch = Map::new();
    patch.insert("title".into(), json!("Hello"));
    let record = gw.update(ResourceId(5), &patch).await.unwrap();
    assert_eq!(record.id, ResourceId(5));
    assert_eq!(record.text("title"), "Hello");
}

#[tokio::test]
async fn update_and_delete_map_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v1/admin/vocabularies/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gw = gateway(&server, ResourceKind::Vocabularies);
    assert_eq!(gw.update(ResourceId(9), &Map::new()).await.unwrap_err(), GatewayError::NotFound { id: ResourceId(9) });
    assert_eq!(gw.remove(ResourceId(9)).await.unwrap_err(), GatewayError::NotFound { id: ResourceId(9) });
}

#[tokio::test]
async fn create_requires_a_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/videos"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let gw = gateway(&server, ResourceKind::Videos);
    assert!(matches!(gw.create(&Map::new()).await, Err(GatewayError::Format(_))));
}

#[tokio::test]
async fn controller_keeps_edit_session_when_update_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/vocabularies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "word": "dog"}])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/admin/vocabularies/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let gw: Arc<dyn ResourceGateway> = Arc::new(gateway(&server, ResourceKind::Vocabularies));
    let mut controller = ResourceListController::new(gw, 10);
    controller.refresh(1).await;
    controller.start_edit(ResourceId(1)).unwrap();
    controller.update_edit_buffer("word", "cat").unwrap();

    assert!(controller.save_edit().await.unwrap_err().is_not_found());
    assert_eq!(controller.state(), ControllerState::Editing(ResourceId(1)));
    assert_eq!(controller.items()[0].text("word"), "dog");
}

#[tokio::test]
async fn saving_an_edit_resends_the_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/vocabularies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "word": "dog", "categoryId": 3}])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/admin/vocabularies/1"))
        .and(body_partial_json(json!({"word": "hound", "categoryId": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "word": "hound", "categoryId": 3})))
        .expect(1)
        .mount(&server)
        .await;

    let gw: Arc<dyn ResourceGateway> = Arc::new(gateway(&server, ResourceKind::Vocabularies));
    let mut controller = ResourceListController::new(gw, 10);
    controller.refresh(1).await;
    controller.start_edit(ResourceId(1)).unwrap();
    controller.update_edit_buffer("word", "hound").unwrap();

    let saved = controller.save_edit().await.unwrap();
    assert_eq!(saved.category_id(), Some(ResourceId(3)));
}
