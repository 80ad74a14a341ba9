use axum::{
    Extension, Router,
    routing::{get, post},
};

use crate::handlers;
use crate::models::facet::FacetKind;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/colours", facet_routes(FacetKind::Colours))
        .nest("/woods", facet_routes(FacetKind::Woods))
        .nest("/door-style-types", facet_routes(FacetKind::DoorStyleTypes))
        .nest("/image-types", image_type_routes())
        .nest("/door-styles", door_style_routes())
        .nest("/door-samples", door_sample_routes())
        .nest("/dealers", dealer_routes())
        .nest("/gallery-samples", gallery_sample_routes())
        .route(
            "/uploads/signed-url",
            post(handlers::upload::create_signed_url),
        )
}

/// The facet handlers read their table from the `FacetKind` extension.
fn facet_routes(kind: FacetKind) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::facet::list_facets).post(handlers::facet::create_facet),
        )
        .route(
            "/{id}",
            get(handlers::facet::get_facet)
                .put(handlers::facet::update_facet)
                .delete(handlers::facet::delete_facet),
        )
        .layer(Extension(kind))
}

fn image_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::image_type::list_image_types)
                .post(handlers::image_type::create_image_type),
        )
        .route(
            "/{id}",
            get(handlers::image_type::get_image_type)
                .put(handlers::image_type::update_image_type)
                .delete(handlers::image_type::delete_image_type),
        )
}

fn door_style_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::door_style::list_door_styles)
                .post(handlers::door_style::create_door_style),
        )
        .route(
            "/{id}",
            get(handlers::door_style::get_door_style)
                .put(handlers::door_style::update_door_style)
                .delete(handlers::door_style::delete_door_style),
        )
}

fn door_sample_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::door_sample::list_door_samples)
                .post(handlers::door_sample::create_door_sample),
        )
        .route(
            "/{id}",
            get(handlers::door_sample::get_door_sample)
                .put(handlers::door_sample::update_door_sample)
                .delete(handlers::door_sample::delete_door_sample),
        )
}

fn dealer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::dealer::list_dealers).post(handlers::dealer::create_dealer),
        )
        .route(
            "/{id}",
            get(handlers::dealer::get_dealer)
                .put(handlers::dealer::update_dealer)
                .delete(handlers::dealer::delete_dealer),
        )
}

fn gallery_sample_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::gallery_sample::list_gallery_samples)
                .post(handlers::gallery_sample::create_gallery_sample),
        )
        .route(
            "/{id}",
            get(handlers::gallery_sample::get_gallery_sample)
                .put(handlers::gallery_sample::update_gallery_sample)
                .delete(handlers::gallery_sample::delete_gallery_sample),
        )
}
