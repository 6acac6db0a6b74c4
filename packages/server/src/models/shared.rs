use serde::Serialize;

/// Plain message envelope.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Hello, world!")]
    pub message: String,
}
