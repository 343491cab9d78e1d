//! Category repository: all reads and writes to the `categories` table.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::entities::categories;
use crate::entities::prelude::*;

/// A transaction category. `user_id = None` marks a system-wide default
/// visible to every user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub is_default: bool,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            is_default: model.is_default,
        }
    }
}

/// Fields supplied when creating a category; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub user_id: Option<i32>,
    pub name: String,
    pub is_default: bool,
}

/// Full-record replacement of a category's mutable fields.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub is_default: bool,
}

/// Capability set for category storage.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Returns the category with the given id, or None.
    async fn get_by_id(&self, id: i32) -> Result<Option<Category>>;

    /// Returns every category row.
    async fn list_all(&self) -> Result<Vec<Category>>;

    /// Returns the categories visible to a user: rows owned by the user
    /// plus every system default, in one filtered query.
    async fn get_for_user(&self, user_id: i32) -> Result<Vec<Category>>;

    /// Inserts a new category and commits.
    async fn add(&self, category: NewCategory) -> Result<Category>;

    /// Replaces all mutable fields of the matching row. Returns None when
    /// no row matches the id.
    async fn update(&self, update: CategoryUpdate) -> Result<Option<Category>>;

    /// Removes the row if it exists. A missing id is not an error.
    async fn delete(&self, id: i32) -> Result<bool>;
}

pub struct SeaOrmCategoryRepository {
    conn: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Category>> {
        let category = Categories::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query category by id")?;

        Ok(category.map(Category::from))
    }

    async fn list_all(&self) -> Result<Vec<Category>> {
        let rows = Categories::find()
            .order_by_asc(categories::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list categories")?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn get_for_user(&self, user_id: i32) -> Result<Vec<Category>> {
        // One round trip; the OR keeps the union atomic and duplicate-free
        // even for rows that satisfy both predicates.
        let rows = Categories::find()
            .filter(
                Condition::any()
                    .add(categories::Column::UserId.eq(user_id))
                    .add(categories::Column::IsDefault.eq(true)),
            )
            .order_by_asc(categories::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query categories for user")?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn add(&self, category: NewCategory) -> Result<Category> {
        let active_model = categories::ActiveModel {
            user_id: Set(category.user_id),
            name: Set(category.name),
            is_default: Set(category.is_default),
            ..Default::default()
        };

        let inserted = active_model.insert(&self.conn).await?;

        info!("Added category '{}' (id {})", inserted.name, inserted.id);
        Ok(Category::from(inserted))
    }

    async fn update(&self, update: CategoryUpdate) -> Result<Option<Category>> {
        let active_model = categories::ActiveModel {
            id: Set(update.id),
            user_id: Set(update.user_id),
            name: Set(update.name),
            is_default: Set(update.is_default),
        };

        match active_model.update(&self.conn).await {
            Ok(model) => {
                info!("Updated category {}", model.id);
                Ok(Some(Category::from(model)))
            }
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(err) => Err(err).context("Failed to update category"),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = Categories::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete category")?;

        if result.rows_affected > 0 {
            info!("Deleted category {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
