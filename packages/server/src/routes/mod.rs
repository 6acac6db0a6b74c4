use axum::extract::DefaultBodyLimit;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::StorageConfig;
use crate::handlers;
use crate::state::AppState;

/// Headroom on top of the image size limit for the text fields and multipart framing.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

pub fn api_routes(storage: &StorageConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::root::root))
        .routes(routes!(handlers::category::add_category))
        .routes(routes!(handlers::image::get_image))
        .merge(item_routes(storage))
}

fn item_routes(storage: &StorageConfig) -> OpenApiRouter<AppState> {
    let limit = storage.max_image_size.saturating_add(MULTIPART_OVERHEAD);
    OpenApiRouter::new()
        .routes(routes!(handlers::item::add_item))
        .layer(DefaultBodyLimit::max(
            usize::try_from(limit).unwrap_or(usize::MAX),
        ))
}
