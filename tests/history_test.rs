mod common;

use axum::http::StatusCode;
use classifai_service::services::providers::ModelGateway;
use classifai_service::services::providers::mock::MockGateway;
use common::{spawn_app, upload_form};
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn history_is_empty_before_any_scan() {
    let app = spawn_app(None).await;

    let response = app
        .client
        .get(app.url("/history"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, response.status());
    let history: Vec<Value> = response.json().await.expect("Failed to parse JSON");
    assert!(history.is_empty());
}

#[tokio::test]
async fn history_caps_at_twenty_records_newest_first() {
    let mock = Arc::new(MockGateway::replying("### Sensitivity Level\n**Internal**"));
    let gateway: Arc<dyn ModelGateway> = mock.clone();
    let app = spawn_app(Some(gateway)).await;

    for i in 0..25 {
        let response = app
            .client
            .post(app.url("/classify"))
            .multipart(upload_form(
                &format!("doc-{:02}.pdf", i),
                "application/pdf",
                b"%PDF".to_vec(),
            ))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(StatusCode::OK, response.status());
    }

    let history: Vec<Value> = app
        .client
        .get(app.url("/history"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");

    assert_eq!(20, history.len());
    assert_eq!("doc-24.pdf", history[0]["filename"]);
    assert_eq!("doc-05.pdf", history[19]["filename"]);

    // Strictly newest first
    let ids: Vec<i64> = history
        .iter()
        .map(|scan| scan["id"].as_i64().unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));

    // Every element carries its classification text and a UTC timestamp
    for scan in &history {
        assert_eq!("### Sensitivity Level\n**Internal**", scan["result"]);
        let created_at = scan["created_at"].as_str().unwrap();
        assert!(
            chrono::DateTime::parse_from_rfc3339(created_at).is_ok(),
            "created_at not ISO-8601: {}",
            created_at
        );
    }
}
