//! 针对组合路由的集成测试
//! 用 tower 的 oneshot 直接驱动 Router，不经过真实网络

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use rust_axum_tutorial::app;
use rust_axum_tutorial::app::items::service::ItemService;
use rust_axum_tutorial::app::notifications::service::NotificationService;
use rust_axum_tutorial::app::uploads::handler::UploadConfig;

/// 每个测试使用独立的临时目录和全新的内存存储
fn test_app(dir: &tempfile::TempDir) -> Router {
    app::router(
        ItemService::new(),
        UploadConfig {
            dir: dir.path().join("uploads"),
        },
        NotificationService::with_delay(dir.path().join("log.txt"), Duration::from_millis(1)),
    )
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["store"]["items_count"], 0);
}

#[tokio::test]
async fn test_items_crud_flow() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    // 创建：id 从 1 开始
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/items",
            serde_json::json!({
                "name": "键盘",
                "price": 199.0,
                "category": "电子产品"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["data"]["name"], "键盘");

    // 获取
    let response = app.clone().oneshot(get_request("/items/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 更新部分字段
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/items/1",
            serde_json::json!({ "price": 299.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["price"], 299.0);
    assert_eq!(json["data"]["name"], "键盘");

    // 列表
    let response = app.clone().oneshot(get_request("/items")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // 删除后再获取返回 404
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/items/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/items/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_missing_item_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app.oneshot(get_request("/items/99")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_item_id_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    // 路径参数声明为 u64，非数字由框架直接拒绝
    let response = app.oneshot(get_request("/items/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_item_validation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(json_request(
            "POST",
            "/items",
            serde_json::json!({
                "name": "",
                "price": 0.0,
                "category": "电子产品"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_items_with_skip_and_limit() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    for (name, category) in [("键盘", "电子产品"), ("鼠标", "电子产品"), ("笔记本", "文具")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/items",
                serde_json::json!({
                    "name": name,
                    "price": 9.9,
                    "category": category
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(get_request("/items?skip=1&limit=1"))
        .await
        .unwrap();
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "鼠标");

    let response = app
        .oneshot(get_request("/items?category=%E6%96%87%E5%85%B7"))
        .await
        .unwrap();
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "笔记本");
}

#[tokio::test]
async fn test_purchase_out_of_stock_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/items",
            serde_json::json!({
                "name": "键盘",
                "price": 199.0,
                "category": "电子产品"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // 第一次购买成功
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/items/1/purchase")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 第二次购买：已缺货，业务状态错误映射为 400
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/items/1/purchase")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_requires_valid_token() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    // 无令牌
    let response = app.clone().oneshot(get_request("/protected")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // 错误令牌
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header(header::AUTHORIZATION, "Bearer wrong-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "UNAUTHORIZED");

    // 正确令牌 (默认值)
    let response = app
        .oneshot(
            Request::builder()
                .uri("/protected")
                .header(header::AUTHORIZATION, "Bearer secret-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user_info"]["authenticated"], true);
}

fn multipart_request(uri: &str, file_name: &str, content: &str) -> Request<Body> {
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         {content}\r\n\
         --{boundary}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_writes_file_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(multipart_request("/upload", "hello.txt", "hello world"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["file_name"], "hello.txt");
    assert_eq!(json["data"][0]["size"], 11);

    let saved = std::fs::read_to_string(dir.path().join("uploads").join("hello.txt")).unwrap();
    assert_eq!(saved, "hello world");
}

#[tokio::test]
async fn test_upload_without_file_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let boundary = "test-boundary";
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(format!("--{boundary}--\r\n")))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_notification_responds_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    let log_path = dir.path().join("log.txt");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/send-notification/alice@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "通知将在后台发送");

    // 写入发生在后台任务里，稍等片刻再检查日志
    tokio::time::sleep(Duration::from_millis(200)).await;
    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("alice@example.com"));
}
