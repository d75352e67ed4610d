mod common;

use axum::http::StatusCode;
use common::{spawn_app, upload_form};
use serde_json::Value;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app(None).await;

    let response = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());
    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!("ok", body["status"]);
    assert_eq!("classifai-service", body["service"]);

    let response = app
        .client
        .get(app.url("/ready"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::OK, response.status());
}

#[tokio::test]
async fn home_serves_the_frontend() {
    let app = spawn_app(None).await;

    let response = app
        .client
        .get(app.url("/"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("ClassifAI"));
}

#[tokio::test]
async fn metrics_endpoint_serves_prometheus_text() {
    let app = spawn_app(None).await;

    // Drive one (failing) classification so an outcome sample exists
    let response = app
        .client
        .post(app.url("/classify"))
        .multipart(upload_form("report.pdf", "application/pdf", b"%PDF".to_vec()))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());

    let response = app
        .client
        .get(app.url("/metrics"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());
    assert!(
        response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("classifications_total"));
}
