//! Tests for the Cloudant service operations

use super::*;
use crate::models::{AdditionalProperties, BulkDocs, Document, ReplicationDatabase, ReplicationDocument, ViewQuery};
use crate::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> CloudantV1 {
    CloudantV1::new(server.uri(), AuthConfig::None).unwrap()
}

#[test]
fn test_new_rejects_empty_url() {
    let err = CloudantV1::new("", AuthConfig::None).unwrap_err();
    assert!(matches!(err, Error::Validation { ref field } if field == "service_url"));
}

#[test]
fn test_new_trims_trailing_slash() {
    let service = CloudantV1::new("https://account.cloudant.com/", AuthConfig::None).unwrap();
    assert_eq!(service.service_url(), "https://account.cloudant.com");
}

#[test]
fn test_set_service_url() {
    let mut service = CloudantV1::new(DEFAULT_SERVICE_URL, AuthConfig::None).unwrap();
    service.set_service_url("https://other.cloudant.com/").unwrap();
    assert_eq!(service.service_url(), "https://other.cloudant.com");

    assert!(service.set_service_url("not a url").is_err());
    assert_eq!(service.service_url(), "https://other.cloudant.com");
}

#[tokio::test]
async fn test_analytics_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "X-IBMCloud-SDK-Analytics",
            "service_name=cloudant;service_version=V1;operation_id=getServerInformation",
        ))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "couchdb": "Welcome",
            "features": ["geo", "partitioned"],
            "vendor": {"name": "IBM Cloudant", "variant": "paas", "version": "8162"},
            "version": "3.2.1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = service_for(&server)
        .get_server_information(&GetServerInformationOptions::default())
        .await
        .unwrap();
    assert_eq!(info.vendor.name, "IBM Cloudant");
    assert_eq!(info.features, vec!["geo", "partitioned"]);
}

#[tokio::test]
async fn test_caller_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_uuids"))
        .and(query_param("count", "2"))
        .and(header("X-Request-Tag", "nightly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uuids": ["a", "b"]})))
        .expect(1)
        .mount(&server)
        .await;

    let options = GetUuidsOptions::default().count(2u32).header("X-Request-Tag", "nightly");
    let result = service_for(&server).get_uuids(&options).await.unwrap();
    assert_eq!(result.uuids.len(), 2);
}

#[tokio::test]
async fn test_missing_required_parameter_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);

    let err = service
        .get_document(&GetDocumentOptions::new("products", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field } if field == "doc_id"));

    let err = service
        .post_view(&PostViewOptions::new("", "ddoc", "view", ViewQuery::default()))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let options = PostBulkDocsOptions {
        db: "products".to_string(),
        ..Default::default()
    };
    let err = service.post_bulk_docs(&options).await.unwrap_err();
    assert!(matches!(err, Error::Validation { ref field } if field == "bulk_docs"));

    let err = service
        .put_capacity_throughput_configuration(&PutCapacityThroughputConfigurationOptions::new(0))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_document_id_is_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/a%2Fb%20c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "a/b c", "_rev": "1-abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let doc = service_for(&server)
        .get_document(&GetDocumentOptions::new("products", "a/b c"))
        .await
        .unwrap();
    assert_eq!(doc.id.as_deref(), Some("a/b c"));
}

#[tokio::test]
async fn test_get_document_keeps_unknown_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/small-appliances%3A1000042"))
        .and(query_param("conflicts", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "small-appliances:1000042",
            "_rev": "3-a1b2",
            "type": "product",
            "price": 42.5,
            "tags": ["kettle"]
        })))
        .mount(&server)
        .await;

    let doc = service_for(&server)
        .get_document(&GetDocumentOptions::new("products", "small-appliances:1000042").conflicts(true))
        .await
        .unwrap();
    assert_eq!(doc.rev.as_deref(), Some("3-a1b2"));
    assert_eq!(doc.get_property("type"), Some(&json!("product")));
    assert_eq!(doc.get_property("tags"), Some(&json!(["kettle"])));
}

#[tokio::test]
async fn test_missing_document_is_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "not_found", "reason": "missing"})),
        )
        .mount(&server)
        .await;

    let err = service_for(&server)
        .get_document(&GetDocumentOptions::new("products", "nope"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        Error::Service { error, reason, .. } => {
            assert_eq!(error.as_deref(), Some("not_found"));
            assert_eq!(reason.as_deref(), Some("missing"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_bulk_docs_partial_failure_is_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/_bulk_docs"))
        .and(body_json(json!({"docs": [{"_id": "a"}, {"_id": "b"}]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"id": "a", "rev": "1-x", "ok": true},
            {"id": "b", "error": "conflict", "reason": "Document update conflict."}
        ])))
        .mount(&server)
        .await;

    let docs = BulkDocs::new(vec![Document::with_id("a"), Document::with_id("b")]);
    let results = service_for(&server)
        .post_bulk_docs(&PostBulkDocsOptions::new("orders", docs))
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(!results[0].is_error());
    assert!(results[1].is_error());
    assert_eq!(results[1].error.as_deref(), Some("conflict"));
}

#[tokio::test]
async fn test_head_document_etag() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/products/widget"))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"2-b91bb807b4685080c6a651115ff558f5\""))
        .mount(&server)
        .await;

    let head = service_for(&server)
        .head_document(&HeadDocumentOptions::new("products", "widget"))
        .await
        .unwrap();
    assert_eq!(head.status, 200);
    assert_eq!(head.etag().as_deref(), Some("2-b91bb807b4685080c6a651115ff558f5"));
}

#[tokio::test]
async fn test_get_document_as_mixed_accept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/widget"))
        .and(header("Accept", "multipart/mixed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("--xyz--", "multipart/mixed; boundary=\"xyz\""),
        )
        .mount(&server)
        .await;

    let response = service_for(&server)
        .get_document_as_mixed(&GetDocumentOptions::new("products", "widget").attachments(true))
        .await
        .unwrap();
    assert_eq!(response.content_type(), Some("multipart/mixed; boundary=\"xyz\""));
    assert_eq!(&response.body[..], b"--xyz--");
}

#[tokio::test]
async fn test_put_attachment_sends_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/widget/manual.txt"))
        .and(query_param("rev", "1-abc"))
        .and(header("Content-Type", "text/plain"))
        .and(body_string("read me"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "widget", "rev": "2-def", "ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let options = PutAttachmentOptions::new("products", "widget", "manual.txt", "read me", "text/plain").rev("1-abc");
    let result = service_for(&server).put_attachment(&options).await.unwrap();
    assert_eq!(result.rev.as_deref(), Some("2-def"));
}

#[tokio::test]
async fn test_put_empty_attachment() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/widget/empty.txt"))
        .and(header("Content-Type", "text/plain"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "widget", "rev": "3-e", "ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let options = PutAttachmentOptions::new("products", "widget", "empty.txt", Vec::<u8>::new(), "text/plain");
    let result = service_for(&server).put_attachment(&options).await.unwrap();
    assert_eq!(result.ok, Some(true));
}

#[tokio::test]
async fn test_all_dbs_keys_are_json_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_all_dbs"))
        .and(query_param("start_key", "\"a\""))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["alpha", "beta"])))
        .mount(&server)
        .await;

    let dbs = service_for(&server)
        .get_all_dbs(&GetAllDbsOptions::default().start_key("a").limit(10u64))
        .await
        .unwrap();
    assert_eq!(dbs, vec!["alpha", "beta"]);
}

#[tokio::test]
async fn test_partition_find_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/_partition/sensor-1/_find"))
        .and(body_json(json!({"selector": {"type": "reading"}, "limit": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"docs": []})))
        .expect(1)
        .mount(&server)
        .await;

    let selector = json!({"type": "reading"}).as_object().cloned().unwrap();
    let options = PostPartitionFindOptions::new("events", "sensor-1", selector).limit(5u64);
    let result = service_for(&server).post_partition_find(&options).await.unwrap();
    assert!(result.docs.is_empty());
}

#[tokio::test]
async fn test_scheduler_docs_states_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_scheduler/docs"))
        .and(query_param("states", "running,failed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total_rows": 0, "docs": []})))
        .expect(1)
        .mount(&server)
        .await;

    let options = GetSchedulerDocsOptions::new().states(vec!["running".to_string(), "failed".to_string()]);
    let result = service_for(&server).get_scheduler_docs(&options).await.unwrap();
    assert_eq!(result.total_rows, 0);
}

#[tokio::test]
async fn test_put_replication_document_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/_replicator/nightly"))
        .and(body_json(json!({
            "source": {"url": "https://a.cloudant.com/src"},
            "target": {"url": "https://b.cloudant.com/dst"},
            "continuous": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "nightly", "rev": "1-r", "ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut doc = ReplicationDocument::new(
        ReplicationDatabase::new("https://a.cloudant.com/src"),
        ReplicationDatabase::new("https://b.cloudant.com/dst"),
    );
    doc.continuous = Some(true);
    let result = service_for(&server)
        .put_replication_document(&PutReplicationDocumentOptions::new("nightly", doc))
        .await
        .unwrap();
    assert_eq!(result.id, "nightly");
}

#[tokio::test]
async fn test_retries_transient_failure_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_up"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/_up"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "seeds": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let mut service = service_for(&server);
    service.enable_retries(2, Duration::from_millis(20));
    let up = service
        .get_up_information(&GetUpInformationOptions::default())
        .await
        .unwrap();
    assert_eq!(up.status, "ok");
}

#[tokio::test]
async fn test_no_retry_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/_up"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = service_for(&server)
        .get_up_information(&GetUpInformationOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
}

#[test]
fn test_typed_field_wins_over_property() {
    let mut doc = Document::with_id("typed");
    doc.set_property("_id", "shadow");
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value, json!({"_id": "typed"}));
}

#[tokio::test]
async fn test_session_login_uses_service_http_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_session"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "AuthSession=abc; Max-Age=600")
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder().timeout(Duration::from_millis(200)).build();
    let service =
        CloudantV1::with_auth_config(server.uri(), AuthConfig::couchdb_session("admin", "secret"), config).unwrap();

    let err = service
        .get_server_information(&GetServerInformationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(ref e) if e.is_timeout()));
}
