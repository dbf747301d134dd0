use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{NewProduct, Product, ProductChanges};

/// Sea-ORM entity for the `products` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub price: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            description: model.description,
            image: model.image,
        }
    }
}

// The id is left to the table's sequence
impl From<NewProduct> for ActiveModel {
    fn from(input: NewProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            description: Set(input.description),
            image: Set(input.image),
        }
    }
}

impl ActiveModel {
    /// Mark the changed columns as `Set`; untouched columns stay unchanged.
    pub fn apply_changes(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = Set(name);
        }
        if let Some(price) = changes.price {
            self.price = Set(price);
        }
        if let Some(description) = changes.description {
            self.description = Set(description);
        }
        if let Some(image) = changes.image {
            self.image = Set(image);
        }
    }
}
