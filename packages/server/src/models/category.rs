use serde::{Deserialize, Serialize};

use crate::entity::category;

/// Form body of `POST /category`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddCategoryRequest {
    #[schema(example = "electronics")]
    pub category: String,
}

/// Response DTO for an accepted category.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AddCategoryResponse {
    #[schema(example = "Category received: electronics")]
    pub message: String,
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "electronics")]
    pub name: String,
}

impl From<category::Model> for AddCategoryResponse {
    fn from(model: category::Model) -> Self {
        Self {
            message: format!("Category received: {}", model.name),
            id: model.id,
            name: model.name,
        }
    }
}
