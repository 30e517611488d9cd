use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CartItemModel {
    pub id: String,
    pub product_id: String,
    pub quantity: i32,
}
