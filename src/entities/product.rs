//! Product entity - Represents a catalog item with a unit price.
//!
//! A product cannot be removed while any purchase still references it
//! (`ON DELETE NO ACTION` on `purchases.product_id`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier assigned by the store on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Title of the product (e.g., "Milk", "Bread")
    pub title: String,
    /// Current unit price in whole currency units
    pub price: i32,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product appears in many purchases
    #[sea_orm(has_many = "super::purchase::Entity")]
    Purchases,
}

impl Related<super::purchase::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
