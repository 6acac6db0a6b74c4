use ::common::storage::ImageName;

use crate::common::{MAX_IMAGE_SIZE, TestApp, routes};

#[tokio::test]
async fn add_item_stores_image_under_content_name() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let image = b"phone photo bytes";
    let expected = ImageName::for_bytes(image).as_filename();

    let res = app.add_item("phone", "electronics", image).await;

    assert_eq!(res.status, 200, "{:?}", res.body);
    assert_eq!(res.body["image_name"], expected.as_str());
    assert_eq!(
        res.body["message"],
        format!("Received item: {{name: phone, category: electronics, image: {expected}}}")
    );
    assert_eq!(app.item_count().await, 1);
    assert_eq!(
        std::fs::read(app.image_dir.join(&expected)).unwrap(),
        image.to_vec()
    );
}

#[tokio::test]
async fn identical_uploads_share_one_file() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let image = b"same bytes";

    let first = app.add_item("phone", "electronics", image).await;
    let second = app.add_item("tablet", "electronics", image).await;

    assert_eq!(first.status, 200);
    assert_eq!(second.status, 200);
    assert_eq!(first.body["image_name"], second.body["image_name"]);
    assert_ne!(first.body["id"], second.body["id"]);
    assert_eq!(app.item_count().await, 2);
    let stored = app.stored_images();
    assert_eq!(stored.len(), 2, "{stored:?}");
    assert!(stored.contains(&ImageName::for_bytes(image).as_filename()));
}

#[tokio::test]
async fn unknown_category_is_rejected_but_image_is_kept() {
    let app = TestApp::spawn().await;
    let image = b"orphan photo";

    let res = app.add_item("phone", "nonexistent", image).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert_eq!(app.item_count().await, 0);
    assert!(
        app.image_dir
            .join(ImageName::for_bytes(image).as_filename())
            .exists()
    );
}

#[tokio::test]
async fn missing_image_field_is_rejected() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let form = reqwest::multipart::Form::new()
        .text("name", "phone")
        .text("category", "electronics");

    let res = app.post_multipart(routes::ITEMS, form).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(app.item_count().await, 0);
}

#[tokio::test]
async fn missing_name_field_is_rejected() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let part = reqwest::multipart::Part::bytes(b"photo".to_vec()).file_name("a.jpg");
    let form = reqwest::multipart::Form::new()
        .text("category", "electronics")
        .part("image", part);

    let res = app.post_multipart(routes::ITEMS, form).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn empty_image_is_rejected() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;

    let res = app.add_item("phone", "electronics", b"").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(app.stored_images(), vec!["default.jpg".to_string()]);
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let image = vec![7u8; MAX_IMAGE_SIZE as usize + 1];

    let res = app.add_item("phone", "electronics", &image).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(app.item_count().await, 0);
}

#[tokio::test]
async fn item_names_are_trimmed() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;

    let res = app.add_item("  phone  ", " electronics ", b"trim").await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["name"], "phone");
    assert_eq!(res.body["category"], "electronics");
}

#[tokio::test]
async fn image_sent_as_text_field_is_rejected() {
    let app = TestApp::spawn().await;
    app.add_category("electronics").await;
    let form = reqwest::multipart::Form::new()
        .text("name", "phone")
        .text("category", "electronics")
        .text("image", "not a file");

    let res = app.post_multipart(routes::ITEMS, form).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(app.item_count().await, 0);
    assert_eq!(app.stored_images(), vec!["default.jpg".to_string()]);
}
