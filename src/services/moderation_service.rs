use std::sync::Arc;

use sqlx::PgPool;
use tonic::{Request, Response, Status};
use uuid::Uuid;

use crate::models::listing::LISTING_COLUMNS;
use crate::models::{ListingModel, ProductCondition};
use crate::proto::moderation::moderation_service_server::ModerationService;
use crate::proto::moderation::{
    ApproveAllReq, ApproveAllRes, ApproveListingReq, CountPendingReq, CountPendingRes,
    ListPendingReq, ListPendingRes, RejectListingReq, TransitionRes,
};
use crate::services::{admin_user, parse_id};
use crate::storage::StorageBackend;

pub struct ModerationServiceImpl {
    pool: PgPool,
    storage: Option<Arc<dyn StorageBackend>>,
}

/// Resolves the card image for a promoted listing: the first stored image
/// key, mapped to its public read URL. Falls back to the bare key when no
/// storage backend is configured.
fn display_image_url(
    storage: Option<&dyn StorageBackend>,
    listing: &ListingModel,
) -> Option<String> {
    let key = listing.images.as_ref().and_then(|images| images.first())?;
    Some(match storage {
        Some(backend) => backend.public_url(key),
        None => key.clone(),
    })
}

impl ModerationServiceImpl {
    pub fn new(pool: PgPool, storage: Option<Arc<dyn StorageBackend>>) -> Self {
        Self { pool, storage }
    }

    /// Inserts the published catalog row derived from an approved listing.
    /// Runs inside the same transaction as the status transition so a listing
    /// is never approved without its product.
    async fn promote_to_product(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        storage: Option<&dyn StorageBackend>,
        listing: &ListingModel,
    ) -> Result<(), sqlx::Error> {
        let display_image = display_image_url(storage, listing);
        let condition = ProductCondition::from_free_text(&listing.condition);

        sqlx::query(
            "INSERT INTO products (product_name, description, category, price, original_price, \
             image, condition_rating, listing_type, status, seller_id) \
             VALUES ($1, $2, $3, $4::float8, $5::float8, $6, $7, $8, 'available', $9::uuid)",
        )
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(&listing.category)
        .bind(listing.selling_price)
        .bind(listing.original_price)
        .bind(display_image)
        .bind(condition.as_db())
        .bind(&listing.listing_type)
        .bind(&listing.user_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn listing_exists(&self, id: Uuid) -> Result<bool, Status> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_listings WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))
    }
}

#[tonic::async_trait]
impl ModerationService for ModerationServiceImpl {
    async fn list_pending(
        &self,
        request: Request<ListPendingReq>,
    ) -> Result<Response<ListPendingRes>, Status> {
        admin_user(&request)?;

        // Full set, newest first; pending volume is expected to stay small
        let listings: Vec<ListingModel> = sqlx::query_as(&format!(
            "SELECT {} FROM product_listings WHERE status = 'pending' \
             ORDER BY created_at DESC",
            LISTING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(ListPendingRes {
            listings: listings.iter().map(ListingModel::to_proto).collect(),
        }))
    }

    async fn approve_listing(
        &self,
        request: Request<ApproveListingReq>,
    ) -> Result<Response<TransitionRes>, Status> {
        let admin = admin_user(&request)?;
        let req = request.into_inner();
        let id = parse_id(&req.id, "id")?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Status::internal(format!("Transaction error: {}", e)))?;

        // Guarded transition: only a pending row moves, so a concurrent
        // second approval becomes a no-op instead of a duplicate product
        let updated: Option<ListingModel> = sqlx::query_as(&format!(
            "UPDATE product_listings SET status = 'approved', updated_at = now() \
             WHERE id = $1 AND status = 'pending' RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        let Some(listing) = updated else {
            tx.rollback()
                .await
                .map_err(|e| Status::internal(format!("Transaction error: {}", e)))?;
            if self.listing_exists(id).await? {
                // Already actioned by another admin
                return Ok(Response::new(TransitionRes { applied: false }));
            }
            return Err(Status::not_found(format!("Listing {} not found", req.id)));
        };

        Self::promote_to_product(&mut tx, self.storage.as_deref(), &listing)
            .await
            .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| Status::internal(format!("Transaction error: {}", e)))?;

        tracing::info!("Listing approved: id={}, admin={}", req.id, admin.user_id);
        Ok(Response::new(TransitionRes { applied: true }))
    }

    async fn reject_listing(
        &self,
        request: Request<RejectListingReq>,
    ) -> Result<Response<TransitionRes>, Status> {
        let admin = admin_user(&request)?;
        let req = request.into_inner();
        let id = parse_id(&req.id, "id")?;

        let result = sqlx::query(
            "UPDATE product_listings SET status = 'rejected', updated_at = now() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        if result.rows_affected() == 0 {
            if self.listing_exists(id).await? {
                return Ok(Response::new(TransitionRes { applied: false }));
            }
            return Err(Status::not_found(format!("Listing {} not found", req.id)));
        }

        tracing::info!("Listing rejected: id={}, admin={}", req.id, admin.user_id);
        Ok(Response::new(TransitionRes { applied: true }))
    }

    async fn approve_all(
        &self,
        request: Request<ApproveAllReq>,
    ) -> Result<Response<ApproveAllRes>, Status> {
        let admin = admin_user(&request)?;
        let req = request.into_inner();

        if req.ids.is_empty() {
            return Ok(Response::new(ApproveAllRes { approved_count: 0 }));
        }

        let ids = req
            .ids
            .iter()
            .map(|id| parse_id(id, "ids"))
            .collect::<Result<Vec<Uuid>, Status>>()?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Status::internal(format!("Transaction error: {}", e)))?;

        // Ids already actioned since the caller took its snapshot fall out of
        // the WHERE clause; that is expected, not an error
        let approved: Vec<ListingModel> = sqlx::query_as(&format!(
            "UPDATE product_listings SET status = 'approved', updated_at = now() \
             WHERE id = ANY($1) AND status = 'pending' RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        for listing in &approved {
            Self::promote_to_product(&mut tx, self.storage.as_deref(), listing)
                .await
                .map_err(|e| Status::internal(format!("Database error: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| Status::internal(format!("Transaction error: {}", e)))?;

        tracing::info!(
            "Bulk approve: requested={}, applied={}, admin={}",
            req.ids.len(),
            approved.len(),
            admin.user_id
        );

        Ok(Response::new(ApproveAllRes {
            approved_count: approved.len() as i32,
        }))
    }

    async fn count_pending(
        &self,
        request: Request<CountPendingReq>,
    ) -> Result<Response<CountPendingRes>, Status> {
        admin_user(&request)?;

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM product_listings WHERE status = 'pending'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(CountPendingRes { count }))
    }
}

#[cfg(test)]
mod tests {
    use super::display_image_url;
    use crate::models::ListingModel;
    use crate::storage::memory::MemoryBackend;
    use crate::storage::StorageBackend;

    fn approved_listing(images: Option<Vec<String>>) -> ListingModel {
        ListingModel {
            id: "6f1b2a3c-4d5e-4f60-8a9b-0c1d2e3f4a5b".to_string(),
            user_id: "11111111-2222-3333-4444-555555555555".to_string(),
            title: "Samsung Galaxy S22 Ultra 256GB".to_string(),
            category: "smartphones".to_string(),
            condition: "Like New".to_string(),
            description: "Bought last year, lightly used, no scratches, comes boxed.".to_string(),
            original_price: 1199.0,
            selling_price: 850.0,
            purchase_date: None,
            usage_period: "6-12 months".to_string(),
            brand: Some("Samsung".to_string()),
            model: Some("Galaxy S22 Ultra".to_string()),
            color: None,
            location: "Austin, TX".to_string(),
            preferred_payment: None,
            listing_type: "p2p".to_string(),
            status: "approved".to_string(),
            images,
            created_at: "2026-01-10T12:00:00Z".to_string(),
            updated_at: "2026-01-11T09:30:00Z".to_string(),
        }
    }

    #[test]
    fn promoted_card_image_is_a_public_url() {
        let backend = MemoryBackend::default();
        let listing = approved_listing(Some(vec![
            "product-images/6f1b/0-ab12cd34.jpg".to_string(),
            "product-images/6f1b/1-ef56ab78.jpg".to_string(),
        ]));

        let url = display_image_url(Some(&backend as &dyn StorageBackend), &listing);
        assert_eq!(
            url.as_deref(),
            Some("memory://product-images/6f1b/0-ab12cd34.jpg")
        );
    }

    #[test]
    fn card_image_absent_when_listing_has_no_images() {
        let backend = MemoryBackend::default();
        let listing = approved_listing(None);
        assert_eq!(
            display_image_url(Some(&backend as &dyn StorageBackend), &listing),
            None
        );
        assert_eq!(
            display_image_url(None, &approved_listing(Some(vec![]))),
            None
        );
    }

    #[test]
    fn card_image_falls_back_to_key_without_a_backend() {
        let listing = approved_listing(Some(vec!["product-images/6f1b/0-ab12cd34.jpg".to_string()]));
        assert_eq!(
            display_image_url(None, &listing).as_deref(),
            Some("product-images/6f1b/0-ab12cd34.jpg")
        );
    }
}
