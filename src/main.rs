use std::net::SocketAddr;
use std::sync::Arc;

use rust_market::config::Config;
use rust_market::db::create_pool;
use rust_market::middleware::AuthLayer;
use rust_market::proto::cart::cart_service_server::CartServiceServer;
use rust_market::proto::catalog::catalog_service_server::CatalogServiceServer;
use rust_market::proto::health::health_server::HealthServer;
use rust_market::proto::listings::listings_service_server::ListingsServiceServer;
use rust_market::proto::moderation::moderation_service_server::ModerationServiceServer;
use rust_market::proto::profile::profile_service_server::ProfileServiceServer;
use rust_market::proto::wishlist::wishlist_service_server::WishlistServiceServer;
use rust_market::services::listings_service::spawn_orphan_sweep;
use rust_market::services::{
    CartServiceImpl, CatalogServiceImpl, HealthServiceImpl, ListingsServiceImpl,
    ModerationServiceImpl, ProfileServiceImpl, WishlistServiceImpl,
};
use rust_market::storage::{R2Backend, StorageBackend};

use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Include file descriptor for gRPC reflection
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("market_descriptor");

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_market=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    tracing::info!("Starting rust-market gRPC server...");
    tracing::info!("Connecting to database...");

    // Create database pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Create image storage client if a bucket is configured
    let storage: Option<Arc<dyn StorageBackend>> = if let Some(bucket) = &config.s3_bucket {
        tracing::info!("Image storage enabled: bucket={}", bucket);
        match R2Backend::new(
            bucket.clone(),
            config.s3_account_id.clone(),
            config.s3_access_key.clone(),
            config.s3_secret_key.clone(),
            config.public_storage_url.clone(),
        ) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::error!("Failed to create storage client: {}", e);
                None
            }
        }
    } else {
        tracing::info!("Image storage disabled, listing submission will be rejected");
        None
    };

    // Reclaim pending listings whose image upload never completed
    spawn_orphan_sweep(
        pool.clone(),
        config.sweep_interval_secs,
        config.sweep_min_age_secs,
    );

    // Create services
    let listings_service = ListingsServiceImpl::new(pool.clone(), storage.clone());
    let moderation_service = ModerationServiceImpl::new(pool.clone(), storage);
    let catalog_service = CatalogServiceImpl::new(pool.clone());
    let cart_service = CartServiceImpl::new(pool.clone());
    let wishlist_service = WishlistServiceImpl::new(pool.clone());
    let profile_service = ProfileServiceImpl::new(pool.clone());
    let health_service = HealthServiceImpl::new();

    // CORS layer for gRPC-Web
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
        .expose_headers(Any);

    // Build reflection service
    let reflection_service = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!("Listening on {}", addr);

    // Build and run server with gRPC-Web support
    Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(cors)
        .layer(tonic_web::GrpcWebLayer::new()) // Enable gRPC-Web
        .layer(AuthLayer::new(pool.clone(), config.jwt_secret.clone()))
        .add_service(reflection_service)
        .add_service(ListingsServiceServer::new(listings_service))
        .add_service(ModerationServiceServer::new(moderation_service))
        .add_service(CatalogServiceServer::new(catalog_service))
        .add_service(CartServiceServer::new(cart_service))
        .add_service(WishlistServiceServer::new(wishlist_service))
        .add_service(ProfileServiceServer::new(profile_service))
        .add_service(HealthServer::new(health_service))
        .serve(addr)
        .await?;

    Ok(())
}
