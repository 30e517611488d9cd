use sqlx::PgPool;
use tonic::{Request, Response, Status};

use crate::models::{ListingType, ProductModel};
use crate::proto::catalog::catalog_service_server::CatalogService;
use crate::proto::catalog::{GetProductReq, GetProductRes, ListProductsReq, ListProductsRes};
use crate::services::parse_id;

/// Column list for catalog reads.
const PRODUCT_COLUMNS: &str = "product_id::text, product_name, description, category, \
     price::float8 as price, original_price::float8 as original_price, image, \
     condition_rating, listing_type, status, seller_id::text, \
     created_at::text, updated_at::text";

pub struct CatalogServiceImpl {
    pool: PgPool,
}

impl CatalogServiceImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Shared by the cart and wishlist services to enrich their rows.
    pub async fn fetch_product(pool: &PgPool, product_id: &str) -> Result<Option<ProductModel>, Status> {
        sqlx::query_as(&format!(
            "SELECT {} FROM products WHERE product_id = $1::uuid",
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))
    }
}

#[tonic::async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_products(
        &self,
        request: Request<ListProductsReq>,
    ) -> Result<Response<ListProductsRes>, Status> {
        let req = request.into_inner();

        let products: Vec<ProductModel> = if req.listing_type.is_empty() {
            sqlx::query_as(&format!(
                "SELECT {} FROM products ORDER BY created_at DESC",
                PRODUCT_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Status::internal(format!("Database error: {}", e)))?
        } else {
            let filter = ListingType::parse(&req.listing_type).ok_or_else(|| {
                Status::invalid_argument("listing_type must be 'new', 'open_box' or 'p2p'")
            })?;
            sqlx::query_as(&format!(
                "SELECT {} FROM products WHERE listing_type = $1 ORDER BY created_at DESC",
                PRODUCT_COLUMNS
            ))
            .bind(filter.as_db())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Status::internal(format!("Database error: {}", e)))?
        };

        Ok(Response::new(ListProductsRes {
            products: products.iter().map(ProductModel::to_card).collect(),
        }))
    }

    async fn get_product(
        &self,
        request: Request<GetProductReq>,
    ) -> Result<Response<GetProductRes>, Status> {
        let req = request.into_inner();
        parse_id(&req.id, "id")?;

        match Self::fetch_product(&self.pool, &req.id).await? {
            Some(product) => Ok(Response::new(GetProductRes {
                product: Some(product.to_card()),
            })),
            None => Err(Status::not_found(format!("Product {} not found", req.id))),
        }
    }
}
