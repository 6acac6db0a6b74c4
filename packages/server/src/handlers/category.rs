use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::catalog::CategoryRegistrar;
use crate::error::{AppError, ErrorBody};
use crate::extractors::form::AppForm;
use crate::models::category::{AddCategoryRequest, AddCategoryResponse};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/category",
    tag = "Categories",
    operation_id = "addCategory",
    summary = "Create a category",
    description = "Registers a new category. Accepts `application/x-www-form-urlencoded` or \
        `multipart/form-data` with a single `category` field. Names are trimmed and must be unique.",
    request_body(content = AddCategoryRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Category created", body = AddCategoryResponse),
        (status = 400, description = "Invalid or duplicate category (VALIDATION_ERROR, WRITE_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(category = %payload.category))]
pub async fn add_category(
    State(state): State<AppState>,
    AppForm(payload): AppForm<AddCategoryRequest>,
) -> Result<Json<AddCategoryResponse>, AppError> {
    let created = CategoryRegistrar::new(&state.db)
        .add_category(&payload.category)
        .await?;

    Ok(Json(created.into()))
}
