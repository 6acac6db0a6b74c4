use ::common::storage::ImageName;

use crate::common::{DEFAULT_IMAGE, TestApp, routes};

#[tokio::test]
async fn uploaded_image_is_served_back() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let image = b"served photo";
    let name = ImageName::for_bytes(image);
    app.add_item("phone", "electronics", image).await;

    let res = app.get(&routes::image(&name.as_filename())).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.bytes, image.to_vec());
    assert_eq!(res.header("content-type"), Some("image/jpeg"));
    assert_eq!(
        res.header("etag"),
        Some(format!("\"{}\"", name.digest()).as_str())
    );
    assert_eq!(
        res.header("cache-control"),
        Some("public, max-age=31536000, immutable")
    );
}

#[tokio::test]
async fn matching_etag_is_not_modified() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let image = b"cached photo";
    let name = ImageName::for_bytes(image);
    app.add_item("phone", "electronics", image).await;
    let path = routes::image(&name.as_filename());

    let etag = app.get(&path).await.header("etag").unwrap().to_string();
    let res = app.get_if_none_match(&path, &etag).await;

    assert_eq!(res.status, 304);
    assert!(res.bytes.is_empty());
}

#[tokio::test]
async fn unknown_image_serves_default() {
    let app = TestApp::spawn().await;
    let missing = ImageName::for_bytes(b"never uploaded").as_filename();

    let res = app.get(&routes::image(&missing)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.bytes, DEFAULT_IMAGE.to_vec());
    assert_eq!(res.header("cache-control"), Some("no-cache"));
    assert!(res.header("etag").is_none());
}

#[tokio::test]
async fn any_jpg_name_falls_back_to_default() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::image("nope.jpg")).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.bytes, DEFAULT_IMAGE.to_vec());
}

#[tokio::test]
async fn non_jpg_name_is_rejected() {
    let app = TestApp::spawn().await;

    for name in ["foo.png", "foo", "foo.JPG"] {
        let res = app.get(&routes::image(name)).await;
        assert_eq!(res.status, 400, "{name}");
        assert_eq!(res.body["code"], "INVALID_NAME");
    }
}

#[tokio::test]
async fn traversal_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::image("..%2Fsecret.jpg")).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "INVALID_NAME");
}

#[tokio::test]
async fn missing_default_image_is_not_found() {
    let app = TestApp::spawn_without_default_image().await;

    let res = app.get(&routes::image("nope.jpg")).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "IMAGE_NOT_FOUND");
}

#[tokio::test]
async fn overlong_jpg_name_serves_default() {
    let app = TestApp::spawn().await;
    let name = format!("{}.jpg", "a".repeat(300));

    let res = app.get(&routes::image(&name)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.bytes, DEFAULT_IMAGE.to_vec());
}

#[tokio::test]
async fn if_none_match_list_with_weak_tag_is_not_modified() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let image = b"listed etag photo";
    let name = ImageName::for_bytes(image);
    app.add_item("phone", "electronics", image).await;

    let res = app
        .get_if_none_match(
            &routes::image(&name.as_filename()),
            &format!("\"stale\", W/\"{}\"", name.digest()),
        )
        .await;

    assert_eq!(res.status, 304);
}
