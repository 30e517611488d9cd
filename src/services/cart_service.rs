use sqlx::PgPool;
use tonic::{Request, Response, Status};

use crate::models::CartItemModel;
use crate::proto::cart::cart_service_server::CartService;
use crate::proto::cart::{
    AddToCartReq, AddToCartRes, CartItem, ClearCartReq, GetCartReq, GetCartRes,
    RemoveFromCartReq, UpdateQuantityReq,
};
use crate::proto::common::Empty;
use crate::services::{authenticated_user, parse_id, CatalogServiceImpl};

pub struct CartServiceImpl {
    pool: PgPool,
}

impl CartServiceImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn enrich(&self, model: &CartItemModel) -> Result<CartItem, Status> {
        // One product fetch per row; missing products render without a card
        let product = CatalogServiceImpl::fetch_product(&self.pool, &model.product_id).await?;
        Ok(CartItem {
            id: model.id.clone(),
            product_id: model.product_id.clone(),
            quantity: model.quantity,
            product: product.map(|p| p.to_card()),
        })
    }
}

#[tonic::async_trait]
impl CartService for CartServiceImpl {
    async fn get_cart(
        &self,
        request: Request<GetCartReq>,
    ) -> Result<Response<GetCartRes>, Status> {
        let auth_user = authenticated_user(&request)?;

        let rows: Vec<CartItemModel> = sqlx::query_as(
            "SELECT id::text, product_id::text, quantity FROM carts \
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

        Ok(Response::new(GetCartRes { items }))
    }

    async fn add_to_cart(
        &self,
        request: Request<AddToCartReq>,
    ) -> Result<Response<AddToCartRes>, Status> {
        let auth_user = authenticated_user(&request)?;
        let req = request.into_inner();

        let product_id = parse_id(&req.product_id, "product_id")?;
        let quantity = if req.quantity < 1 { 1 } else { req.quantity };

        // Single upsert; the (user_id, product_id) unique constraint makes
        // two concurrent adds increment one row instead of racing
        let row: CartItemModel = sqlx::query_as(
            "INSERT INTO carts (user_id, product_id, quantity) \
             VALUES ($1::uuid, $2, $3) \
             ON CONFLICT (user_id, product_id) \
             DO UPDATE SET quantity = carts.quantity + excluded.quantity, updated_at = now() \
             RETURNING id::text, product_id::text, quantity",
        )
        .bind(&auth_user.user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        let item = self.enrich(&row).await?;
        Ok(Response::new(AddToCartRes { item: Some(item) }))
    }

    async fn update_quantity(
        &self,
        request: Request<UpdateQuantityReq>,
    ) -> Result<Response<Empty>, Status> {
        let auth_user = authenticated_user(&request)?;
        let req = request.into_inner();

        let cart_item_id = parse_id(&req.cart_item_id, "cart_item_id")?;

        // Quantity below one coalesces into a removal
        if req.quantity < 1 {
            sqlx::query("DELETE FROM carts WHERE id = $1 AND user_id = $2::uuid")
                .bind(cart_item_id)
                .bind(&auth_user.user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| Status::internal(format!("Database error: {}", e)))?;
            return Ok(Response::new(Empty {}));
        }

        sqlx::query(
            "UPDATE carts SET quantity = $1, updated_at = now() \
             WHERE id = $2 AND user_id = $3::uuid",
        )
        .bind(req.quantity)
        .bind(cart_item_id)
        .bind(&auth_user.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(Empty {}))
    }

    async fn remove_from_cart(
        &self,
        request: Request<RemoveFromCartReq>,
    ) -> Result<Response<Empty>, Status> {
        let auth_user = authenticated_user(&request)?;
        let req = request.into_inner();

        let cart_item_id = parse_id(&req.cart_item_id, "cart_item_id")?;

        sqlx::query("DELETE FROM carts WHERE id = $1 AND user_id = $2::uuid")
            .bind(cart_item_id)
            .bind(&auth_user.user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(Empty {}))
    }

    async fn clear_cart(
        &self,
        request: Request<ClearCartReq>,
    ) -> Result<Response<Empty>, Status> {
        let auth_user = authenticated_user(&request)?;

        sqlx::query("DELETE FROM carts WHERE user_id = $1::uuid")
            .bind(&auth_user.user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        Ok(Response::new(Empty {}))
    }
}
