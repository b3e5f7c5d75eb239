//! Purchase entity - A customer buying some quantity of a product.
//!
//! `price` is copied from the product when the purchase is recorded and is never
//! touched again, so later catalog price changes leave purchase history alone.
//! Backticks are used for field names to enable proper documentation linking.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    /// Unique identifier for the purchase
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Number of units bought, always positive
    pub quantity: i32,
    /// Unit price at the moment of purchase
    pub price: i32,
    /// ID of the customer who made the purchase
    pub customer_id: i64,
    /// ID of the product that was bought
    pub product_id: i64,
}

impl Model {
    /// Total cost of the purchase, `price * quantity`.
    #[must_use]
    pub fn total_cost(&self) -> i64 {
        i64::from(self.price) * i64::from(self.quantity)
    }
}

/// Defines relationships between Purchase and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each purchase belongs to one customer; removed together with it
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Customer,
    /// Each purchase references one product; the product cannot go first
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Product,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
