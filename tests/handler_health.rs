mod common;

use common::TestApp;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = TestApp::new();

    let response = app.server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["visit_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_queue_closed() {
    let TestApp {
        server, visits, ..
    } = TestApp::new();
    drop(visits);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["visit_queue"]["status"], "error");
}

#[tokio::test]
async fn test_root_describes_service() {
    let app = TestApp::new();

    let response = app.server.get("/").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["service"], "URL Shortener");
    assert!(json.get("version").is_some());
    assert_eq!(json["features"].as_array().unwrap().len(), 5);
}
