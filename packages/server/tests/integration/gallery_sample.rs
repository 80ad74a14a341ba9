use serde_json::json;

use crate::common::{TestApp, image_body, routes};

async fn create_gallery_sample(app: &TestApp, filename: &str, image_type: i32) -> i32 {
    app.upload_blob(filename).await;
    let res = app
        .post_with_token(
            routes::GALLERY_SAMPLES,
            &json!({ "image": image_body(filename, image_type) }),
            &app.admin_token(),
        )
        .await;
    assert_eq!(res.status, 201, "create_gallery_sample failed: {}", res.text);
    res.id()
}

#[tokio::test]
async fn list_returns_samples_in_creation_order() {
    let app = TestApp::spawn().await;
    let image_type = app.create_image_type("Photo").await;
    let first = create_gallery_sample(&app, "kitchen-2.jpg", image_type).await;
    let second = create_gallery_sample(&app, "kitchen-1.jpg", image_type).await;

    let res = app.get(routes::GALLERY_SAMPLES).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.ids(), vec![first, second]);
    assert_eq!(res.body[0]["image"]["filename"], "kitchen-2.jpg");
}

#[tokio::test]
async fn update_swaps_the_image_and_removes_the_old_blob() {
    let app = TestApp::spawn().await;
    let image_type = app.create_image_type("Photo").await;
    let id = create_gallery_sample(&app, "bath.jpg", image_type).await;
    app.upload_blob("bath-retouched.jpg").await;

    let res = app
        .put_with_token(
            &routes::gallery_sample(id),
            &json!({ "image": image_body("bath-retouched.jpg", image_type) }),
            &app.admin_token(),
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["image"]["filename"], "bath-retouched.jpg");
    assert!(!app.blob_exists("bath.jpg").await);
    assert!(app.blob_exists("bath-retouched.jpg").await);
}

#[tokio::test]
async fn changing_only_the_image_type_keeps_the_blob() {
    let app = TestApp::spawn().await;
    let photo = app.create_image_type("Photo").await;
    let banner = app.create_image_type("Banner").await;
    let id = create_gallery_sample(&app, "den.jpg", photo).await;

    let res = app
        .put_with_token(
            &routes::gallery_sample(id),
            &json!({ "image": image_body("den.jpg", banner) }),
            &app.admin_token(),
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["image"]["imageType"]["name"], "Banner");
    assert!(app.blob_exists("den.jpg").await);
}

#[tokio::test]
async fn delete_removes_sample_and_blob() {
    let app = TestApp::spawn().await;
    let image_type = app.create_image_type("Photo").await;
    let id = create_gallery_sample(&app, "porch.jpg", image_type).await;

    let res = app
        .delete_with_token(&routes::gallery_sample(id), &app.admin_token())
        .await;

    assert_eq!(res.status, 204, "{}", res.text);
    assert!(!app.blob_exists("porch.jpg").await);
    assert_eq!(app.get(&routes::gallery_sample(id)).await.status, 404);
}

#[tokio::test]
async fn update_of_missing_sample_is_not_found() {
    let app = TestApp::spawn().await;
    let image_type = app.create_image_type("Photo").await;

    let res = app
        .put_with_token(
            &routes::gallery_sample(123),
            &json!({ "image": image_body("ghost.jpg", image_type) }),
            &app.admin_token(),
        )
        .await;

    assert_eq!(res.status, 404);
}
