use axum::Json;
use tracing::instrument;

use crate::models::shared::MessageResponse;

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    operation_id = "root",
    summary = "Greeting",
    description = "Liveness check. Always returns the same greeting.",
    responses(
        (status = 200, description = "Greeting", body = MessageResponse),
    ),
)]
#[instrument]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello, world!".into(),
    })
}
