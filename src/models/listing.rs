use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::proto::listings::Listing;

/// Column list shared by every query that reads a full listing row.
pub const LISTING_COLUMNS: &str = "id::text, user_id::text, title, category, condition, \
     description, original_price::float8 as original_price, \
     selling_price::float8 as selling_price, purchase_date::text, usage_period, \
     brand, model, color, location, preferred_payment, listing_type, status, \
     images, created_at::text, updated_at::text";

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ListingModel {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub category: String,
    pub condition: String,
    pub description: String,
    pub original_price: f64,
    pub selling_price: f64,
    pub purchase_date: Option<String>,
    pub usage_period: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub location: String,
    pub preferred_payment: Option<String>,
    pub listing_type: String,
    pub status: String,
    pub images: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

impl ListingModel {
    pub fn to_proto(&self) -> Listing {
        Listing {
            id: self.id.clone(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            condition: self.condition.clone(),
            description: self.description.clone(),
            original_price: self.original_price,
            selling_price: self.selling_price,
            purchase_date: self.purchase_date.clone().unwrap_or_default(),
            usage_period: self.usage_period.clone(),
            brand: self.brand.clone().unwrap_or_default(),
            model: self.model.clone().unwrap_or_default(),
            color: self.color.clone().unwrap_or_default(),
            location: self.location.clone(),
            preferred_payment: self.preferred_payment.clone().unwrap_or_default(),
            listing_type: self.listing_type.clone(),
            status: self.status.clone(),
            // Readers must tolerate the window before images are patched in
            images: self.images.clone().unwrap_or_default(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}
