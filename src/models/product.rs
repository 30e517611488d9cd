use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::proto::catalog::ProductCard;

/// Fallback display image for products without an uploaded photo
pub const PLACEHOLDER_IMAGE: &str = "https://placekitten.com/300/200";

/// Sales channel of a product or listing.
///
/// This is the single mapping between the storage enum and the UI-facing
/// type tag; call sites must not match on the raw string themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingType {
    New,
    OpenBox,
    P2p,
}

impl ListingType {
    /// Strict parse of the storage enum value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(ListingType::New),
            "open_box" => Some(ListingType::OpenBox),
            "p2p" => Some(ListingType::P2p),
            _ => None,
        }
    }

    /// Lenient parse used on read paths; unknown values render as `new`.
    pub fn from_db(value: &str) -> Self {
        Self::parse(value).unwrap_or(ListingType::New)
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            ListingType::New => "new",
            ListingType::OpenBox => "open_box",
            ListingType::P2p => "p2p",
        }
    }

    /// Tag shown on browse cards ("open_box" renders as "open-box").
    pub fn ui_type(&self) -> &'static str {
        match self {
            ListingType::New => "new",
            ListingType::OpenBox => "open-box",
            ListingType::P2p => "p2p",
        }
    }
}

/// Condition rating of a published product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ProductCondition {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(ProductCondition::New),
            "excellent" => Some(ProductCondition::Excellent),
            "good" => Some(ProductCondition::Good),
            "fair" => Some(ProductCondition::Fair),
            "poor" => Some(ProductCondition::Poor),
            _ => None,
        }
    }

    /// Seller-entered condition is free text; anything unrecognized is
    /// promoted as `good`.
    pub fn from_free_text(value: &str) -> Self {
        Self::parse(value.trim().to_lowercase().as_str()).unwrap_or(ProductCondition::Good)
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            ProductCondition::New => "new",
            ProductCondition::Excellent => "excellent",
            ProductCondition::Good => "good",
            ProductCondition::Fair => "fair",
            ProductCondition::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProductModel {
    pub product_id: String,
    pub product_name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub image: Option<String>,
    pub condition_rating: String,
    pub listing_type: String,
    pub status: String,
    pub seller_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ProductModel {
    /// Maps the storage row into the display card used on browse pages.
    pub fn to_card(&self) -> ProductCard {
        ProductCard {
            id: self.product_id.clone(),
            title: self.product_name.clone(),
            price: self.price,
            original_price: self.original_price.unwrap_or(0.0),
            image: self
                .image
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            category: self.category.clone(),
            r#type: ListingType::from_db(&self.listing_type).ui_type().to_string(),
            in_stock: self.status == "available",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> ProductModel {
        ProductModel {
            product_id: "p-1".to_string(),
            product_name: "Samsung Galaxy S22 Ultra 256GB".to_string(),
            description: Some("Lightly used flagship".to_string()),
            category: "smartphones".to_string(),
            price: 45000.0,
            original_price: Some(70000.0),
            image: Some("https://pub.example.com/product-images/p-1/0-abc.jpg".to_string()),
            condition_rating: "good".to_string(),
            listing_type: "p2p".to_string(),
            status: "available".to_string(),
            seller_id: Some("u-1".to_string()),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn listing_type_mapping_is_total() {
        assert_eq!(ListingType::from_db("new").ui_type(), "new");
        assert_eq!(ListingType::from_db("open_box").ui_type(), "open-box");
        assert_eq!(ListingType::from_db("p2p").ui_type(), "p2p");
        // Unknown storage values render as "new" rather than failing the page
        assert_eq!(ListingType::from_db("refurbished").ui_type(), "new");
    }

    #[test]
    fn strict_parse_rejects_unknown_values() {
        assert_eq!(ListingType::parse("open_box"), Some(ListingType::OpenBox));
        assert_eq!(ListingType::parse("open-box"), None);
        assert_eq!(ListingType::parse(""), None);
    }

    #[test]
    fn condition_falls_back_to_good() {
        assert_eq!(ProductCondition::from_free_text("Excellent"), ProductCondition::Excellent);
        assert_eq!(ProductCondition::from_free_text(" poor "), ProductCondition::Poor);
        assert_eq!(ProductCondition::from_free_text("like new-ish"), ProductCondition::Good);
    }

    #[test]
    fn card_derives_stock_and_type() {
        let product = sample_product();
        let card = product.to_card();
        assert_eq!(card.r#type, "p2p");
        assert!(card.in_stock);
        assert_eq!(card.original_price, 70000.0);

        let mut sold = sample_product();
        sold.status = "sold".to_string();
        assert!(!sold.to_card().in_stock);
    }

    #[test]
    fn card_uses_placeholder_when_image_missing() {
        let mut product = sample_product();
        product.image = None;
        product.original_price = None;
        let card = product.to_card();
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
        assert_eq!(card.original_price, 0.0);
    }
}
