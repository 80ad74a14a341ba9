use serde_json::json;

use crate::common::{TestApp, routes};

mod facet_crud {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_and_fetch_a_colour() {
        let app = TestApp::spawn().await;

        let res = app
            .post_with_token(
                routes::COLOURS,
                &json!({ "name": "  Espresso  " }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Espresso");

        let fetched = app.get(&routes::colour(res.id())).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["name"], "Espresso");
    }

    #[tokio::test]
    async fn list_is_public_and_sorted_by_name() {
        let app = TestApp::spawn().await;
        let walnut = app.create_facet(routes::WOODS, "walnut").await;
        let ash = app.create_facet(routes::WOODS, "Ash").await;
        let maple = app.create_facet(routes::WOODS, "Maple").await;

        let res = app.get(routes::WOODS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![ash, maple, walnut]);
    }

    #[tokio::test]
    async fn the_three_facet_tables_are_independent() {
        let app = TestApp::spawn().await;
        app.create_facet(routes::COLOURS, "Natural").await;
        app.create_facet(routes::WOODS, "Natural").await;

        assert_eq!(app.get(routes::COLOURS).await.ids().len(), 1);
        assert_eq!(app.get(routes::WOODS).await.ids().len(), 1);
        assert!(app.get(routes::DOOR_STYLE_TYPES).await.ids().is_empty());
    }

    #[tokio::test]
    async fn rename_updates_the_name() {
        let app = TestApp::spawn().await;
        let id = app.create_facet(routes::DOOR_STYLE_TYPES, "Slab").await;

        let res = app
            .put_with_token(
                &routes::door_style_type(id),
                &json!({ "name": "Flat Slab" }),
                &app.admin_token(),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Flat Slab");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::colour(9999)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let res = app
            .put_with_token(&routes::colour(9999), &json!({ "name": "X" }), &app.admin_token())
            .await;
        assert_eq!(res.status, 404);

        let res = app
            .delete_with_token(&routes::colour(9999), &app.admin_token())
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_with_token(routes::COLOURS, &json!({ "name": "   " }), &app.admin_token())
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn delete_removes_the_facet() {
        let app = TestApp::spawn().await;
        let id = app.create_facet(routes::COLOURS, "Red").await;

        let res = app.delete_with_token(&routes::colour(id), &app.admin_token()).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::colour(id)).await.status, 404);
    }
}

mod facet_constraints {
    use super::*;

    #[tokio::test]
    async fn duplicate_name_differing_only_in_case_conflicts() {
        let app = TestApp::spawn().await;
        app.create_facet(routes::COLOURS, "White").await;

        let res = app
            .post_with_token(routes::COLOURS, &json!({ "name": "WHITE" }), &app.admin_token())
            .await;

        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.body["code"], "UNIQUE_CONFLICT");
        assert_eq!(res.body["field"], "name");
        assert_eq!(res.body["message"], "Name must be unique.");
    }

    #[tokio::test]
    async fn rename_onto_an_existing_name_conflicts() {
        let app = TestApp::spawn().await;
        app.create_facet(routes::WOODS, "Oak").await;
        let cherry = app.create_facet(routes::WOODS, "Cherry").await;

        let res = app
            .put_with_token(&routes::wood(cherry), &json!({ "name": "oak" }), &app.admin_token())
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["field"], "name");
    }

    #[tokio::test]
    async fn deleting_a_colour_used_by_a_door_sample_conflicts() {
        let app = TestApp::spawn().await;
        let colour = app.create_facet(routes::COLOURS, "Grey").await;
        let wood = app.create_facet(routes::WOODS, "Oak").await;
        let style = app.create_door_style("Shaker", &[]).await;
        let image_type = app.create_image_type("Swatch").await;
        app.create_door_sample(style, wood, Some(colour), "grey-oak.jpg", image_type)
            .await;

        let res = app
            .delete_with_token(&routes::colour(colour), &app.admin_token())
            .await;

        assert_eq!(res.status, 409, "{}", res.text);
        assert_eq!(res.body["code"], "CONFLICT");
        assert_eq!(app.get(&routes::colour(colour)).await.status, 200);
    }

    #[tokio::test]
    async fn deleting_a_style_type_unlinks_it_from_door_styles() {
        let app = TestApp::spawn().await;
        let raised = app.create_facet(routes::DOOR_STYLE_TYPES, "Raised").await;
        let recessed = app.create_facet(routes::DOOR_STYLE_TYPES, "Recessed").await;
        let style = app.create_door_style("Cathedral", &[raised, recessed]).await;

        let res = app
            .delete_with_token(&routes::door_style_type(raised), &app.admin_token())
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let style = app.get(&routes::door_style(style)).await;
        let types = style.body["styleTypes"].as_array().unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0]["id"], recessed);
    }
}

mod facet_auth {
    use super::*;

    #[tokio::test]
    async fn mutation_without_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::COLOURS, &json!({ "name": "Blue" }))
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_with_token(routes::COLOURS, &json!({ "name": "Blue" }), "not-a-jwt")
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn non_admin_cannot_mutate() {
        let app = TestApp::spawn().await;
        let id = app.create_facet(routes::COLOURS, "Blue").await;

        let res = app
            .post_with_token(routes::COLOURS, &json!({ "name": "Green" }), &app.user_token())
            .await;
        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let res = app.delete_with_token(&routes::colour(id), &app.user_token()).await;
        assert_eq!(res.status, 403);

        let res = app.delete_without_token(&routes::colour(id)).await;
        assert_eq!(res.status, 401);
    }
}

mod image_types {
    use super::*;

    #[tokio::test]
    async fn crud_round() {
        let app = TestApp::spawn().await;
        let token = app.admin_token();

        let res = app
            .post_with_token(
                routes::IMAGE_TYPES,
                &json!({
                    "name": "Thumbnail",
                    "isSpecificDimension": true,
                    "width": 320,
                    "height": 240,
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["isSpecificDimension"], true);
        assert_eq!(res.body["width"], 320);
        let id = res.id();

        let res = app
            .put_with_token(
                &routes::image_type(id),
                &json!({
                    "name": "Large Thumbnail",
                    "isSpecificDimension": true,
                    "width": 640,
                    "height": 480,
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Large Thumbnail");
        assert_eq!(res.body["height"], 480);

        assert_eq!(app.get(routes::IMAGE_TYPES).await.ids(), vec![id]);

        let res = app.delete_with_token(&routes::image_type(id), &token).await;
        assert_eq!(res.status, 204);
        assert_eq!(app.get(&routes::image_type(id)).await.status, 404);
    }

    #[tokio::test]
    async fn deleting_an_image_type_in_use_conflicts() {
        let app = TestApp::spawn().await;
        let image_type = app.create_image_type("Photo").await;
        app.upload_blob("store-front.jpg").await;
        let res = app
            .post_with_token(
                routes::GALLERY_SAMPLES,
                &json!({ "image": crate::common::image_body("store-front.jpg", image_type) }),
                &app.admin_token(),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app
            .delete_with_token(&routes::image_type(image_type), &app.admin_token())
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }
}
