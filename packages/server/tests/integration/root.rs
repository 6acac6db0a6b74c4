use crate::common::{TestApp, routes};

#[tokio::test]
async fn root_returns_greeting() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ROOT).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["message"], "Hello, world!");
}

#[tokio::test]
async fn openapi_document_lists_all_operations() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().unwrap();
    for path in ["/", "/items", "/category", "/image/{image_filename}"] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
