use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tonic::{Request, Response, Status};
use uuid::Uuid;

use crate::models::listing::LISTING_COLUMNS;
use crate::models::{ListingModel, ListingType};
use crate::proto::listings::listings_service_server::ListingsService;
use crate::proto::listings::{
    ImageFile, ListMyListingsReq, ListMyListingsRes, SubmitListingReq, SubmitListingRes,
};
use crate::services::authenticated_user;
use crate::storage::StorageBackend;

const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5MB
const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

const TITLE_MIN: usize = 5;
const TITLE_MAX: usize = 100;
const DESCRIPTION_MIN: usize = 20;
const DESCRIPTION_MAX: usize = 1000;

/// Form fields that survived validation, with prices parsed.
struct ValidatedSubmission {
    original_price: f64,
    selling_price: f64,
    listing_type: ListingType,
}

/// Checks every form field before anything is written. Prices arrive as
/// strings straight from the seller form.
fn validate_submission(req: &SubmitListingReq) -> Result<ValidatedSubmission, Status> {
    let title_len = req.title.chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&title_len) {
        return Err(Status::invalid_argument(
            "Title must be between 5 and 100 characters",
        ));
    }
    if req.category.is_empty() {
        return Err(Status::invalid_argument("Please select a category"));
    }
    if req.condition.is_empty() {
        return Err(Status::invalid_argument("Please select a condition"));
    }
    let description_len = req.description.chars().count();
    if !(DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&description_len) {
        return Err(Status::invalid_argument(
            "Description must be between 20 and 1000 characters",
        ));
    }
    let original_price = parse_positive_price(&req.original_price, "Original price")?;
    let selling_price = parse_positive_price(&req.selling_price, "Selling price")?;
    if req.usage_period.is_empty() {
        return Err(Status::invalid_argument(
            "Please specify how long you've used this item",
        ));
    }
    if req.location.is_empty() {
        return Err(Status::invalid_argument("Location is required"));
    }
    let listing_type = match ListingType::parse(&req.listing_type) {
        Some(t @ (ListingType::P2p | ListingType::OpenBox)) => t,
        _ => {
            return Err(Status::invalid_argument(
                "listing_type must be 'p2p' or 'open_box'",
            ))
        }
    };

    Ok(ValidatedSubmission {
        original_price,
        selling_price,
        listing_type,
    })
}

fn parse_positive_price(value: &str, field: &str) -> Result<f64, Status> {
    match value.trim().parse::<f64>() {
        Ok(price) if price > 0.0 && price.is_finite() => Ok(price),
        _ => Err(Status::invalid_argument(format!(
            "{} must be a positive number",
            field
        ))),
    }
}

/// Attached images are rejected as a whole if any one is oversized or has a
/// disallowed content type; nothing is uploaded in that case.
fn validate_images(images: &[ImageFile]) -> Result<(), Status> {
    if images.is_empty() {
        return Err(Status::invalid_argument(
            "Please upload at least one image of your product",
        ));
    }
    for image in images {
        if image.content.len() > MAX_FILE_SIZE {
            return Err(Status::invalid_argument(
                "Some files were rejected. Please ensure all files are images under 5MB.",
            ));
        }
        if !ACCEPTED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
            return Err(Status::invalid_argument(
                "Some files were rejected. Please ensure all files are images under 5MB.",
            ));
        }
    }
    Ok(())
}

/// Storage key for one listing image: namespaced by listing id, with a random
/// suffix so duplicate filenames and retries never collide.
fn image_key(listing_id: &str, index: usize, filename: &str) -> String {
    let ext = filename.rsplit('.').next().filter(|e| !e.is_empty() && *e != filename);
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "product-images/{}/{}-{}.{}",
        listing_id,
        index,
        &suffix[..8],
        ext.unwrap_or("jpg")
    )
}

/// Best-effort removal of already-stored objects after a partial failure.
/// Delete errors are logged, not propagated; the orphan sweep still covers
/// the row.
async fn delete_uploaded(storage: &dyn StorageBackend, paths: &[String]) {
    for path in paths {
        if let Err(e) = storage.delete(path).await {
            tracing::error!("Cleanup delete failed: key={}, error={}", path, e);
        }
    }
}

/// Uploads every attached image, failing the whole batch on the first error.
/// Objects stored before the failure are deleted again so nothing is left
/// behind in the bucket.
async fn upload_images(
    storage: &dyn StorageBackend,
    listing_id: &str,
    images: &[ImageFile],
) -> Result<Vec<String>, Status> {
    let mut paths = Vec::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        let key = image_key(listing_id, index, &image.filename);
        match storage
            .upload(&key, &image.content, &image.content_type)
            .await
        {
            Ok(path) => paths.push(path),
            Err(e) => {
                tracing::error!(
                    "Image upload failed: listing={}, index={}, error={}",
                    listing_id,
                    index,
                    e
                );
                delete_uploaded(storage, &paths).await;
                return Err(Status::from(e));
            }
        }
    }
    Ok(paths)
}

pub struct ListingsServiceImpl {
    pool: PgPool,
    storage: Option<Arc<dyn StorageBackend>>,
}

impl ListingsServiceImpl {
    pub fn new(pool: PgPool, storage: Option<Arc<dyn StorageBackend>>) -> Self {
        Self { pool, storage }
    }
}

#[tonic::async_trait]
impl ListingsService for ListingsServiceImpl {
    async fn submit_listing(
        &self,
        request: Request<SubmitListingReq>,
    ) -> Result<Response<SubmitListingRes>, Status> {
        let auth_user = authenticated_user(&request)?;
        let req = request.into_inner();

        // Preconditions: everything is checked before the first write
        let validated = validate_submission(&req)?;
        validate_images(&req.images)?;

        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| Status::failed_precondition("Image storage is not configured"))?;

        let purchase_date: Option<&str> = if req.purchase_date.is_empty() {
            None
        } else {
            Some(&req.purchase_date)
        };
        let brand: Option<&str> = if req.brand.is_empty() {
            None
        } else {
            Some(&req.brand)
        };
        let model: Option<&str> = if req.model.is_empty() {
            None
        } else {
            Some(&req.model)
        };
        let color: Option<&str> = if req.color.is_empty() {
            None
        } else {
            Some(&req.color)
        };
        let preferred_payment: Option<&str> = if req.preferred_payment.is_empty() {
            None
        } else {
            Some(&req.preferred_payment)
        };

        // Step 1: the draft row, status pending, images patched in later
        let listing: ListingModel = sqlx::query_as(&format!(
            "INSERT INTO product_listings (user_id, title, category, condition, description, \
             original_price, selling_price, purchase_date, usage_period, brand, model, color, \
             location, preferred_payment, listing_type, status) \
             VALUES ($1::uuid, $2, $3, $4, $5, $6::float8, $7::float8, $8::date, $9, $10, $11, \
             $12, $13, $14, $15, 'pending') \
             RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(&auth_user.user_id)
        .bind(&req.title)
        .bind(&req.category)
        .bind(&req.condition)
        .bind(&req.description)
        .bind(validated.original_price)
        .bind(validated.selling_price)
        .bind(purchase_date)
        .bind(&req.usage_period)
        .bind(brand)
        .bind(model)
        .bind(color)
        .bind(&req.location)
        .bind(preferred_payment)
        .bind(validated.listing_type.as_db())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        tracing::info!(
            "Listing submitted: id={}, user={}, type={}, images={}",
            listing.id,
            auth_user.user_id,
            listing.listing_type,
            req.images.len()
        );

        // Step 2: upload all images. A failure here cleans up its own objects
        // and leaves the pending row without images; the orphan sweep
        // reclaims the row.
        let image_paths = upload_images(storage.as_ref(), &listing.id, &req.images).await?;

        // Step 3: patch the image paths onto the row. If the patch fails the
        // uploads are removed again, leaving a bare pending row for the sweep.
        let patched: Result<ListingModel, sqlx::Error> = sqlx::query_as(&format!(
            "UPDATE product_listings SET images = $1, updated_at = now() \
             WHERE id = $2::uuid RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(&image_paths)
        .bind(&listing.id)
        .fetch_one(&self.pool)
        .await;

        let listing = match patched {
            Ok(listing) => listing,
            Err(e) => {
                delete_uploaded(storage.as_ref(), &image_paths).await;
                return Err(Status::internal(format!("Database error: {}", e)));
            }
        };

        Ok(Response::new(SubmitListingRes {
            listing: Some(listing.to_proto()),
        }))
    }

    async fn list_my_listings(
        &self,
        request: Request<ListMyListingsReq>,
    ) -> Result<Response<ListMyListingsRes>, Status> {
        let auth_user = authenticated_user(&request)?;

        let listings: Vec<ListingModel> = sqlx::query_as(&format!(
            "SELECT {} FROM product_listings WHERE user_id = $1::uuid \
             ORDER BY created_at DESC",
            LISTING_COLUMNS
        ))
        .bind(&auth_user.user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(ListMyListingsRes {
            listings: listings.iter().map(ListingModel::to_proto).collect(),
        }))
    }
}

/// Deletes pending rows whose image patch never landed within the age window.
/// Compensates for the missing transaction around insert + upload + patch.
pub async fn sweep_orphaned_listings(pool: &PgPool, min_age_secs: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM product_listings \
         WHERE status = 'pending' AND images IS NULL \
         AND created_at < now() - make_interval(secs => $1)",
    )
    .bind(min_age_secs as f64)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub fn spawn_orphan_sweep(pool: PgPool, interval_secs: u64, min_age_secs: i64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        loop {
            ticker.tick().await;
            match sweep_orphaned_listings(&pool, min_age_secs).await {
                Ok(0) => {}
                Ok(deleted) => {
                    tracing::info!("Orphan sweep removed {} incomplete listings", deleted);
                }
                Err(e) => {
                    tracing::error!("Orphan sweep failed: {}", e);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryBackend;

    fn valid_request() -> SubmitListingReq {
        SubmitListingReq {
            title: "Samsung Galaxy S22 Ultra 256GB".to_string(),
            category: "smartphones".to_string(),
            condition: "good".to_string(),
            description: "Light scratches, works fine".to_string(),
            original_price: "70000".to_string(),
            selling_price: "45000".to_string(),
            purchase_date: String::new(),
            usage_period: "8 months".to_string(),
            brand: "Samsung".to_string(),
            model: "S22 Ultra".to_string(),
            color: String::new(),
            location: "Mumbai, Maharashtra".to_string(),
            preferred_payment: String::new(),
            listing_type: "p2p".to_string(),
            images: vec![
                ImageFile {
                    filename: "front.jpg".to_string(),
                    content_type: "image/jpeg".to_string(),
                    content: vec![1, 2, 3],
                },
                ImageFile {
                    filename: "back.png".to_string(),
                    content_type: "image/png".to_string(),
                    content: vec![4, 5, 6],
                },
            ],
        }
    }

    #[test]
    fn example_scenario_passes_validation() {
        let req = valid_request();
        let validated = validate_submission(&req).unwrap();
        assert_eq!(validated.original_price, 70000.0);
        assert_eq!(validated.selling_price, 45000.0);
        assert_eq!(validated.listing_type, ListingType::P2p);
        validate_images(&req.images).unwrap();
    }

    #[test]
    fn open_box_tab_maps_to_storage_enum() {
        let mut req = valid_request();
        req.listing_type = "open_box".to_string();
        let validated = validate_submission(&req).unwrap();
        assert_eq!(validated.listing_type.as_db(), "open_box");
    }

    #[test]
    fn rejects_short_title_and_description() {
        let mut req = valid_request();
        req.title = "S22".to_string();
        assert!(validate_submission(&req).is_err());

        let mut req = valid_request();
        req.description = "too short".to_string();
        assert!(validate_submission(&req).is_err());
    }

    #[test]
    fn rejects_bad_prices() {
        for bad in ["", "free", "0", "-5", "NaN"] {
            let mut req = valid_request();
            req.selling_price = bad.to_string();
            assert!(validate_submission(&req).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn rejects_missing_required_fields() {
        let mut req = valid_request();
        req.category = String::new();
        assert!(validate_submission(&req).is_err());

        let mut req = valid_request();
        req.location = String::new();
        assert!(validate_submission(&req).is_err());

        let mut req = valid_request();
        req.usage_period = String::new();
        assert!(validate_submission(&req).is_err());

        let mut req = valid_request();
        req.listing_type = "new".to_string();
        assert!(validate_submission(&req).is_err());
    }

    #[test]
    fn rejects_zero_images() {
        assert!(validate_images(&[]).is_err());
    }

    #[test]
    fn rejects_oversized_or_wrong_mime_images() {
        let oversized = ImageFile {
            filename: "big.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            content: vec![0; MAX_FILE_SIZE + 1],
        };
        assert!(validate_images(&[oversized]).is_err());

        let wrong_mime = ImageFile {
            filename: "doc.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            content: vec![0; 10],
        };
        assert!(validate_images(&[wrong_mime]).is_err());
    }

    #[test]
    fn image_keys_are_namespaced_and_unique() {
        let key = image_key("abc-123", 0, "photo.jpg");
        assert!(key.starts_with("product-images/abc-123/0-"));
        assert!(key.ends_with(".jpg"));

        // Same filename twice still produces distinct keys
        let other = image_key("abc-123", 0, "photo.jpg");
        assert_ne!(key, other);

        // No extension falls back to jpg
        let bare = image_key("abc-123", 1, "photo");
        assert!(bare.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn upload_images_stores_every_file() {
        let backend = MemoryBackend::default();
        let req = valid_request();
        let paths = upload_images(&backend, "listing-1", &req.images).await.unwrap();
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert!(path.starts_with("product-images/listing-1/"));
        }
        assert_eq!(backend.objects.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn upload_failure_fails_the_batch() {
        let backend = MemoryBackend {
            fail_uploads: true,
            ..Default::default()
        };
        let req = valid_request();
        let result = upload_images(&backend, "listing-1", &req.images).await;
        assert!(result.is_err());
        assert!(backend.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mid_batch_failure_removes_stored_objects() {
        // First upload lands, second is rejected; the first must be deleted
        let backend = MemoryBackend {
            fail_after: Some(1),
            ..Default::default()
        };
        let req = valid_request();
        let result = upload_images(&backend, "listing-1", &req.images).await;
        assert!(result.is_err());
        assert!(backend.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn cleanup_deletes_only_the_given_keys() {
        let backend = MemoryBackend::default();
        backend.upload("product-images/a/0-x.jpg", b"a", "image/jpeg").await.unwrap();
        backend.upload("product-images/b/0-y.jpg", b"b", "image/jpeg").await.unwrap();

        delete_uploaded(&backend, &["product-images/a/0-x.jpg".to_string()]).await;

        let objects = backend.objects.lock().unwrap();
        assert!(!objects.contains_key("product-images/a/0-x.jpg"));
        assert!(objects.contains_key("product-images/b/0-y.jpg"));
    }
}
