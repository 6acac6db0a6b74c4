use chrono::Utc;
use common::storage::{ImageName, ImageSource, ImageStore, name_image};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use tracing::{info, instrument};

use super::{CatalogError, CategoryIndex, validate_label};
use crate::entity::item;

/// Input of [`ItemRegistrar::add_item`].
pub struct NewItem<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub image: Option<&'a dyn ImageSource>,
}

/// An item accepted by the registrar.
#[derive(Debug, Clone)]
pub struct RegisteredItem {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub category_id: i32,
    pub image_name: ImageName,
}

impl RegisteredItem {
    pub fn confirmation(&self) -> String {
        format!(
            "Received item: {{name: {}, category: {}, image: {}}}",
            self.name, self.category, self.image_name
        )
    }
}

/// Runs the ingestion pipeline: name the image by content, store it, resolve
/// the category, then insert the item row.
///
/// The image is persisted before the category is resolved and is not removed
/// if a later step fails. A leftover file is still addressed by its content
/// and is reused by the next upload of the same bytes.
pub struct ItemRegistrar<'a, C: ConnectionTrait> {
    conn: &'a C,
    images: &'a dyn ImageStore,
    max_image_size: u64,
}

impl<'a, C: ConnectionTrait> ItemRegistrar<'a, C> {
    pub fn new(conn: &'a C, images: &'a dyn ImageStore, max_image_size: u64) -> Self {
        Self {
            conn,
            images,
            max_image_size,
        }
    }

    #[instrument(skip(self, new_item), fields(name = %new_item.name, category = %new_item.category))]
    pub async fn add_item(&self, new_item: NewItem<'_>) -> Result<RegisteredItem, CatalogError> {
        let name = validate_label(new_item.name, "Item name")?;
        let category = validate_label(new_item.category, "Category")?;
        let image = new_item
            .image
            .ok_or_else(|| CatalogError::Validation("Missing 'image' field".into()))?;

        let reader = image
            .open()
            .await
            .map_err(|e| CatalogError::Read(format!("Unable to open the image: {e}")))?;
        let image_name = name_image(reader, self.max_image_size)
            .await
            .map_err(|e| CatalogError::from_storage("Unable to hash the image", e))?;

        // The hashing pass consumed its reader; storage gets a fresh one.
        let reader = image
            .open()
            .await
            .map_err(|e| CatalogError::Read(format!("Unable to reopen the image: {e}")))?;
        self.images
            .save(&image_name, reader)
            .await
            .map_err(|e| CatalogError::from_storage("Unable to save the image file", e))?;

        let category_id = CategoryIndex::new(self.conn).resolve(category).await?;

        let model = item::ActiveModel {
            name: Set(name.to_string()),
            category_id: Set(category_id),
            image_name: Set(image_name.as_filename()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.conn)
        .await
        .map_err(|e| CatalogError::Write(format!("Unable to insert item '{name}': {e}")))?;

        info!(item_id = model.id, image = %image_name, "Item added");

        Ok(RegisteredItem {
            id: model.id,
            name: model.name,
            category: category.to_string(),
            category_id,
            image_name,
        })
    }
}
