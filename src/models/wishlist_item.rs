use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WishlistItemModel {
    pub id: String,
    pub product_id: String,
}
