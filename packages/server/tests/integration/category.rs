use crate::common::{TestApp, routes};

#[tokio::test]
async fn add_category_confirms() {
    let app = TestApp::spawn().await;

    let res = app.add_category("electronics").await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["message"], "Category received: electronics");
    assert_eq!(res.body["name"], "electronics");
    assert!(res.body["id"].as_i64().is_some());
}

#[tokio::test]
async fn add_category_accepts_multipart() {
    let app = TestApp::spawn().await;
    let form = reqwest::multipart::Form::new().text("category", "books");

    let res = app.post_multipart(routes::CATEGORY, form).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["message"], "Category received: books");
}

#[tokio::test]
async fn duplicate_category_is_rejected() {
    let app = TestApp::spawn().await;
    assert_eq!(app.add_category("toys").await.status, 200);

    let res = app.add_category("toys").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "WRITE_ERROR");
}

#[tokio::test]
async fn blank_category_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.add_category("   ").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_category_field_is_rejected() {
    let app = TestApp::spawn().await;
    let form = reqwest::multipart::Form::new().text("name", "books");

    let res = app.post_multipart(routes::CATEGORY, form).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}
