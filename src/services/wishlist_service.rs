use sqlx::PgPool;
use tonic::{Request, Response, Status};

use crate::models::WishlistItemModel;
use crate::proto::common::Empty;
use crate::proto::wishlist::wishlist_service_server::WishlistService;
use crate::proto::wishlist::{
    AddToWishlistReq, AddToWishlistRes, ClearWishlistReq, GetWishlistReq, GetWishlistRes,
    IsInWishlistReq, IsInWishlistRes, RemoveFromWishlistReq, WishlistItem,
};
use crate::services::{authenticated_user, parse_id, CatalogServiceImpl};

pub struct WishlistServiceImpl {
    pool: PgPool,
}

impl WishlistServiceImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn enrich(&self, model: &WishlistItemModel) -> Result<WishlistItem, Status> {
        let product = CatalogServiceImpl::fetch_product(&self.pool, &model.product_id).await?;
        Ok(WishlistItem {
            id: model.id.clone(),
            product_id: model.product_id.clone(),
            product: product.map(|p| p.to_card()),
        })
    }
}

#[tonic::async_trait]
impl WishlistService for WishlistServiceImpl {
    async fn get_wishlist(
        &self,
        request: Request<GetWishlistReq>,
    ) -> Result<Response<GetWishlistRes>, Status> {
        let auth_user = authenticated_user(&request)?;

        let rows: Vec<WishlistItemModel> = sqlx::query_as(
            "SELECT id::text, product_id::text FROM wishlists \
             WHERE user_id = $1::uuid ORDER BY created_at",
        )
        .bind(&auth_user.user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(self.enrich(row).await?);
        }

        Ok(Response::new(GetWishlistRes { items }))
    }

    async fn add_to_wishlist(
        &self,
        request: Request<AddToWishlistReq>,
    ) -> Result<Response<AddToWishlistRes>, Status> {
        let auth_user = authenticated_user(&request)?;
        let req = request.into_inner();

        let product_id = parse_id(&req.product_id, "product_id")?;

        // Adding an item that is already wishlisted is a harmless no-op;
        // the unique pair constraint keeps it to one row either way
        let row: WishlistItemModel = sqlx::query_as(
            "INSERT INTO wishlists (user_id, product_id) VALUES ($1::uuid, $2) \
             ON CONFLICT (user_id, product_id) DO UPDATE SET product_id = excluded.product_id \
             RETURNING id::text, product_id::text",
        )
        .bind(&auth_user.user_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        let item = self.enrich(&row).await?;
        Ok(Response::new(AddToWishlistRes { item: Some(item) }))
    }

    async fn remove_from_wishlist(
        &self,
        request: Request<RemoveFromWishlistReq>,
    ) -> Result<Response<Empty>, Status> {
        let auth_user = authenticated_user(&request)?;
        let req = request.into_inner();

        let wishlist_item_id = parse_id(&req.wishlist_item_id, "wishlist_item_id")?;

        sqlx::query("DELETE FROM wishlists WHERE id = $1 AND user_id = $2::uuid")
            .bind(wishlist_item_id)
            .bind(&auth_user.user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(Empty {}))
    }

    async fn clear_wishlist(
        &self,
        request: Request<ClearWishlistReq>,
    ) -> Result<Response<Empty>, Status> {
        let auth_user = authenticated_user(&request)?;

        sqlx::query("DELETE FROM wishlists WHERE user_id = $1::uuid")
            .bind(&auth_user.user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(Empty {}))
    }

    async fn is_in_wishlist(
        &self,
        request: Request<IsInWishlistReq>,
    ) -> Result<Response<IsInWishlistRes>, Status> {
        let auth_user = authenticated_user(&request)?;
        let req = request.into_inner();

        let product_id = parse_id(&req.product_id, "product_id")?;

        let in_wishlist: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM wishlists \
             WHERE user_id = $1::uuid AND product_id = $2)",
        )
        .bind(&auth_user.user_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(IsInWishlistRes { in_wishlist }))
    }
}
