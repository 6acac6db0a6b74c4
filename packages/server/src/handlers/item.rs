use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::catalog::{ItemRegistrar, NewItem};
use crate::error::{AppError, ErrorBody};
use crate::extractors::upload::ItemUpload;
use crate::models::item::AddItemResponse;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    operation_id = "addItem",
    summary = "Register a listing item",
    description = "Accepts a multipart form with `name`, `category` and an `image` file part. \
        The image is stored under the SHA-256 of its bytes with a `.jpg` suffix, so identical \
        uploads share one file. The category must already exist.",
    request_body(content_type = "multipart/form-data", description = "Fields `name`, `category` and file `image`"),
    responses(
        (status = 200, description = "Item registered", body = AddItemResponse),
        (status = 400, description = "Rejected (VALIDATION_ERROR, READ_ERROR, WRITE_ERROR, NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, upload), fields(name = %upload.name, category = %upload.category))]
pub async fn add_item(
    State(state): State<AppState>,
    upload: ItemUpload,
) -> Result<Json<AddItemResponse>, AppError> {
    let registrar = ItemRegistrar::new(
        &state.db,
        &*state.images,
        state.config.storage.max_image_size,
    );

    let item = registrar
        .add_item(NewItem {
            name: &upload.name,
            category: &upload.category,
            image: Some(&upload.image),
        })
        .await?;

    Ok(Json(item.into()))
}
