use serde::Serialize;

use crate::catalog::RegisteredItem;

/// Response DTO for an accepted item.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AddItemResponse {
    /// Human-readable confirmation.
    #[schema(example = "Received item: {name: phone, category: electronics, image: 9f86d0...0a08.jpg}")]
    pub message: String,
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "phone")]
    pub name: String,
    #[schema(example = "electronics")]
    pub category: String,
    /// Content-derived image filename (`<sha256 hex>.jpg`).
    #[schema(example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08.jpg")]
    pub image_name: String,
}

impl From<RegisteredItem> for AddItemResponse {
    fn from(item: RegisteredItem) -> Self {
        Self {
            message: item.confirmation(),
            id: item.id,
            name: item.name,
            category: item.category,
            image_name: item.image_name.as_filename(),
        }
    }
}
