use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr,
};
use tracing::info;

use super::{CatalogError, validate_label};
use crate::entity::category;

/// Resolves category names to their ids.
pub struct CategoryIndex<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryIndex<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Look up the id of the category called `name`.
    pub async fn resolve(&self, name: &str) -> Result<i32, CatalogError> {
        let found = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(self.conn)
            .await
            .map_err(|e| CatalogError::Read(format!("Unable to look up category '{name}': {e}")))?;

        found
            .map(|c| c.id)
            .ok_or_else(|| CatalogError::NotFound(format!("Category '{name}' does not exist")))
    }
}

/// Inserts new categories.
pub struct CategoryRegistrar<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryRegistrar<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn add_category(&self, name: &str) -> Result<category::Model, CatalogError> {
        let name = validate_label(name, "Category")?;

        let model = category::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        match model.insert(self.conn).await {
            Ok(inserted) => {
                info!(category_id = inserted.id, category = %inserted.name, "Category added");
                Ok(inserted)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Err(
                CatalogError::Write(format!("Category '{name}' already exists")),
            ),
            Err(e) => Err(CatalogError::Write(format!(
                "Unable to insert category '{name}': {e}"
            ))),
        }
    }
}
