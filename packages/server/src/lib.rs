pub mod catalog;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

use axum::http::HeaderValue;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "API for the door catalog: facets, door styles, door samples, dealers and gallery images"
    ),
    paths(
        handlers::facet::list_facets,
        handlers::facet::get_facet,
        handlers::facet::create_facet,
        handlers::facet::update_facet,
        handlers::facet::delete_facet,
        handlers::image_type::list_image_types,
        handlers::image_type::get_image_type,
        handlers::image_type::create_image_type,
        handlers::image_type::update_image_type,
        handlers::image_type::delete_image_type,
        handlers::door_style::list_door_styles,
        handlers::door_style::get_door_style,
        handlers::door_style::create_door_style,
        handlers::door_style::update_door_style,
        handlers::door_style::delete_door_style,
        handlers::door_sample::list_door_samples,
        handlers::door_sample::get_door_sample,
        handlers::door_sample::create_door_sample,
        handlers::door_sample::update_door_sample,
        handlers::door_sample::delete_door_sample,
        handlers::dealer::list_dealers,
        handlers::dealer::get_dealer,
        handlers::dealer::create_dealer,
        handlers::dealer::update_dealer,
        handlers::dealer::delete_dealer,
        handlers::gallery_sample::list_gallery_samples,
        handlers::gallery_sample::get_gallery_sample,
        handlers::gallery_sample::create_gallery_sample,
        handlers::gallery_sample::update_gallery_sample,
        handlers::gallery_sample::delete_gallery_sample,
        handlers::upload::create_signed_url,
    ),
    tags(
        (name = "Facets", description = "Colours, woods and door style types"),
        (name = "Image Types", description = "Image type CRUD operations"),
        (name = "Door Styles", description = "Door styles and their style types"),
        (name = "Door Samples", description = "Door sample CRUD and faceted search"),
        (name = "Dealers", description = "Dealer CRUD and display ordering"),
        (name = "Gallery Samples", description = "Gallery image CRUD operations"),
        (name = "Uploads", description = "Presigned image uploads"),
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// An empty origin list allows any origin.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
}
