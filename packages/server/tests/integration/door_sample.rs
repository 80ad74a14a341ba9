use serde_json::json;

use crate::common::{TestApp, image_body, routes};

/// A small catalog: two colours, two woods, two styles and four samples.
struct Catalog {
    white: i32,
    black: i32,
    oak: i32,
    cherry: i32,
    shaker: i32,
    slab: i32,
    image_type: i32,
    /// white oak shaker, "d.jpg"
    s1: i32,
    /// black oak slab, "a.jpg"
    s2: i32,
    /// white cherry slab, "c.jpg"
    s3: i32,
    /// unfinished cherry shaker, "b.jpg"
    s4: i32,
}

async fn seed_catalog(app: &TestApp) -> Catalog {
    let white = app.create_facet(routes::COLOURS, "White").await;
    let black = app.create_facet(routes::COLOURS, "Black").await;
    let oak = app.create_facet(routes::WOODS, "Oak").await;
    let cherry = app.create_facet(routes::WOODS, "Cherry").await;
    let shaker = app.create_door_style("Shaker", &[]).await;
    let slab = app.create_door_style("Slab", &[]).await;
    let image_type = app.create_image_type("Swatch").await;

    let s1 = app
        .create_door_sample(shaker, oak, Some(white), "d.jpg", image_type)
        .await;
    let s2 = app
        .create_door_sample(slab, oak, Some(black), "a.jpg", image_type)
        .await;
    let s3 = app
        .create_door_sample(slab, cherry, Some(white), "c.jpg", image_type)
        .await;
    let s4 = app
        .create_door_sample(shaker, cherry, None, "b.jpg", image_type)
        .await;

    Catalog {
        white,
        black,
        oak,
        cherry,
        shaker,
        slab,
        image_type,
        s1,
        s2,
        s3,
        s4,
    }
}

mod door_sample_search {
    use super::*;

    #[tokio::test]
    async fn no_filters_lists_everything_ordered_by_filename() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app.get(routes::DOOR_SAMPLES).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec![c.s2, c.s4, c.s3, c.s1]);
    }

    #[tokio::test]
    async fn filename_order_is_case_sensitive() {
        let app = TestApp::spawn().await;
        let wood = app.create_facet(routes::WOODS, "Maple").await;
        let style = app.create_door_style("Shaker", &[]).await;
        let image_type = app.create_image_type("Swatch").await;
        let lower = app
            .create_door_sample(style, wood, None, "a.jpg", image_type)
            .await;
        let upper = app
            .create_door_sample(style, wood, None, "B.jpg", image_type)
            .await;

        let res = app.get(routes::DOOR_SAMPLES).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec![upper, lower]);
    }

    #[tokio::test]
    async fn single_colour_filter() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .get(&format!("{}?colourIds={}", routes::DOOR_SAMPLES, c.white))
            .await;

        assert_eq!(res.ids(), vec![c.s3, c.s1]);
    }

    #[tokio::test]
    async fn filters_across_categories_are_or_ed() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .get(&format!(
                "{}?colourIds={}&woodIds={}",
                routes::DOOR_SAMPLES,
                c.black,
                c.cherry
            ))
            .await;

        assert_eq!(res.ids(), vec![c.s2, c.s4, c.s3]);
    }

    #[tokio::test]
    async fn bracketed_id_lists_are_accepted() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .get(&format!(
                "{}?doorStyleIds=[{},{}]",
                routes::DOOR_SAMPLES,
                c.shaker,
                c.slab
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids().len(), 4);
    }

    #[tokio::test]
    async fn search_text_matches_facet_names_case_insensitively() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .get(&format!("{}?searchText=CHER", routes::DOOR_SAMPLES))
            .await;
        assert_eq!(res.ids(), vec![c.s4, c.s3]);

        let res = app
            .get(&format!("{}?searchText=shak", routes::DOOR_SAMPLES))
            .await;
        assert_eq!(res.ids(), vec![c.s4, c.s1]);
    }

    #[tokio::test]
    async fn search_text_or_ids() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .get(&format!(
                "{}?searchText=black&woodIds={}",
                routes::DOOR_SAMPLES,
                c.cherry
            ))
            .await;

        assert_eq!(res.ids(), vec![c.s2, c.s4, c.s3]);
    }

    #[tokio::test]
    async fn wildcards_in_search_text_are_literal() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get(&format!("{}?searchText=%25", routes::DOOR_SAMPLES))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.ids().is_empty());
    }

    #[tokio::test]
    async fn unmatched_filter_returns_empty_list() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get(&format!("{}?colourIds=9999", routes::DOOR_SAMPLES))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.ids().is_empty());
    }

    #[tokio::test]
    async fn malformed_id_list_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&format!("{}?woodIds=1,two", routes::DOOR_SAMPLES))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn response_embeds_facets_and_image() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app.get(&routes::door_sample(c.s1)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["doorStyle"]["name"], "Shaker");
        assert_eq!(res.body["wood"]["id"], c.oak);
        assert_eq!(res.body["colour"]["name"], "White");
        assert_eq!(res.body["image"]["filename"], "d.jpg");
        assert_eq!(res.body["image"]["imageType"]["id"], c.image_type);

        let unfinished = app.get(&routes::door_sample(c.s4)).await;
        assert!(unfinished.body["colour"].is_null());
    }
}

mod door_sample_writes {
    use super::*;

    #[tokio::test]
    async fn update_with_new_filename_deletes_the_old_blob() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;
        app.upload_blob("d-v2.jpg").await;

        let res = app
            .put_with_token(
                &routes::door_sample(c.s1),
                &json!({
                    "doorStyleId": c.slab,
                    "woodId": c.cherry,
                    "colourId": c.black,
                    "image": image_body("d-v2.jpg", c.image_type),
                }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["image"]["filename"], "d-v2.jpg");
        assert_eq!(res.body["doorStyle"]["id"], c.slab);
        assert_eq!(res.body["colour"]["id"], c.black);
        assert!(!app.blob_exists("d.jpg").await);
        assert!(app.blob_exists("d-v2.jpg").await);
    }

    #[tokio::test]
    async fn failed_update_keeps_the_old_image() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;
        app.upload_blob("d-v2.jpg").await;

        let res = app
            .put_with_token(
                &routes::door_sample(c.s1),
                &json!({
                    "doorStyleId": c.shaker,
                    "woodId": 9999,
                    "colourId": c.white,
                    "image": image_body("d-v2.jpg", c.image_type),
                }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert!(app.blob_exists("d.jpg").await);

        let sample = app.get(&routes::door_sample(c.s1)).await;
        assert_eq!(sample.body["image"]["filename"], "d.jpg");
        assert_eq!(sample.body["wood"]["id"], c.oak);
    }

    #[tokio::test]
    async fn update_with_same_image_keeps_the_blob() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .put_with_token(
                &routes::door_sample(c.s1),
                &json!({
                    "doorStyleId": c.shaker,
                    "woodId": c.oak,
                    "colourId": null,
                    "image": image_body("d.jpg", c.image_type),
                }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["colour"].is_null());
        assert!(app.blob_exists("d.jpg").await);
    }

    #[tokio::test]
    async fn update_of_missing_sample_is_not_found() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .put_with_token(
                &routes::door_sample(9999),
                &json!({
                    "doorStyleId": c.shaker,
                    "woodId": c.oak,
                    "image": image_body("zzz.jpg", c.image_type),
                }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn duplicate_image_filename_conflicts() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .post_with_token(
                routes::DOOR_SAMPLES,
                &json!({
                    "doorStyleId": c.shaker,
                    "woodId": c.oak,
                    "image": image_body("A.JPG", c.image_type),
                }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.body["field"], "filename");
        assert_eq!(res.body["message"], "Filename must be unique.");
    }

    #[tokio::test]
    async fn unknown_wood_is_rejected() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .post_with_token(
                routes::DOOR_SAMPLES,
                &json!({
                    "doorStyleId": c.shaker,
                    "woodId": 9999,
                    "image": image_body("orphan.jpg", c.image_type),
                }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn path_in_filename_is_rejected() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .post_with_token(
                routes::DOOR_SAMPLES,
                &json!({
                    "doorStyleId": c.shaker,
                    "woodId": c.oak,
                    "image": image_body("../etc/passwd", c.image_type),
                }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn delete_removes_blob_and_rows() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .delete_with_token(&routes::door_sample(c.s2), &app.admin_token())
            .await;

        assert_eq!(res.status, 204, "{}", res.text);
        assert!(!app.blob_exists("a.jpg").await);
        assert_eq!(app.get(&routes::door_sample(c.s2)).await.status, 404);
        assert_eq!(app.get(routes::DOOR_SAMPLES).await.ids().len(), 3);

        let again = app
            .delete_with_token(&routes::door_sample(c.s2), &app.admin_token())
            .await;
        assert_eq!(again.status, 404);
    }

    #[tokio::test]
    async fn delete_succeeds_when_blob_is_already_gone() {
        let app = TestApp::spawn().await;
        let image_type = app.create_image_type("Swatch").await;
        let wood = app.create_facet(routes::WOODS, "Pine").await;
        let style = app.create_door_style("Rustic", &[]).await;

        // Created without a prior upload.
        let res = app
            .post_with_token(
                routes::DOOR_SAMPLES,
                &json!({
                    "doorStyleId": style,
                    "woodId": wood,
                    "image": image_body("never-uploaded.jpg", image_type),
                }),
                &app.admin_token(),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app
            .delete_with_token(&routes::door_sample(res.id()), &app.admin_token())
            .await;
        assert_eq!(res.status, 204, "{}", res.text);
    }

    #[tokio::test]
    async fn non_admin_cannot_delete() {
        let app = TestApp::spawn().await;
        let c = seed_catalog(&app).await;

        let res = app
            .delete_with_token(&routes::door_sample(c.s1), &app.user_token())
            .await;

        assert_eq!(res.status, 403);
        assert!(app.blob_exists("d.jpg").await);
    }
}
