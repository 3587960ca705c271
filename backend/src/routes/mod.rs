mod meta;
pub mod photo;
pub mod photos;

use aide::axum::{routing::get, ApiRouter};
use axum::http::{header, HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};

/// Creates the router with all handler routes
pub fn handler() -> ApiRouter {
    ApiRouter::new().merge(meta::handler()).merge(photo_routes())
}

/// Upload, listing and photo passthrough, with CORS headers on every response
fn photo_routes() -> ApiRouter {
    // Answers preflight requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::OPTIONS, Method::POST, Method::GET]);

    ApiRouter::new()
        .api_route(
            "/photo",
            get(photo::list_photos).post(photo::upload_photo),
        )
        .route("/photos/{*path}", axum::routing::get(photos::get_photo))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("OPTIONS,POST,GET"),
        ))
}
