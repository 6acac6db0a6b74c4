use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::ImageName;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

const IMMUTABLE: &str = "public, max-age=31536000, immutable";

#[utoipa::path(
    get,
    path = "/image/{image_filename}",
    tag = "Images",
    operation_id = "getImage",
    summary = "Fetch a stored image",
    description = "Streams the named image as `image/jpeg`. The name must end with `.jpg`. \
        Unknown names are answered with the default placeholder image. Content-addressed \
        images carry a strong ETag and may be revalidated with `If-None-Match`.",
    params(("image_filename" = String, Path, description = "Image filename ending in `.jpg`")),
    responses(
        (status = 200, description = "Image bytes (`image/jpeg`)"),
        (status = 304, description = "Not modified"),
        (status = 400, description = "Invalid image name (INVALID_NAME)", body = ErrorBody),
        (status = 404, description = "No image and no default image (IMAGE_NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn get_image(
    State(state): State<AppState>,
    Path(image_filename): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let resolved = state.images.resolve(&image_filename).await?;

    // Only content-addressed hits are immutable; the placeholder may change.
    let etag = match ImageName::parse(&resolved.served_name) {
        Ok(name) if !resolved.is_fallback => Some(format!("\"{}\"", name.digest())),
        _ => None,
    };

    if let Some(etag) = &etag
        && let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && etag_matches(val, etag)
    {
        return Ok((
            StatusCode::NOT_MODIFIED,
            [(header::ETAG, etag.as_str()), (header::CACHE_CONTROL, IMMUTABLE)],
        )
            .into_response());
    }

    let size = resolved.size;
    let body = Body::from_stream(ReaderStream::new(resolved.reader));

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CONTENT_LENGTH, size);
    builder = match &etag {
        Some(etag) => builder
            .header(header::ETAG, etag)
            .header(header::CACHE_CONTROL, IMMUTABLE),
        None => builder.header(header::CACHE_CONTROL, "no-cache"),
    };

    builder
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Weak comparison of an `If-None-Match` list against `etag`.
fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    let etag = etag.trim_start_matches("W/");
    if_none_match.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}
