use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use http::Request as HttpRequest;
use http::Response as HttpResponse;
use http_body_util::combinators::UnsyncBoxBody;
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tonic::Status;
use tower::{Layer, Service};

/// Claims carried by tokens issued by the external identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    #[serde(default)]
    pub name: String,
}

/// Authenticated user info injected by the auth middleware into request extensions.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub is_admin: bool,
}

/// Public paths that do not require authentication
const PUBLIC_PATHS: &[&str] = &[
    "/market.catalog.CatalogService/ListProducts",
    "/market.catalog.CatalogService/GetProduct",
    "/grpc.health.v1.Health/Check",
    "/grpc.health.v1.Health/Watch",
    "/grpc.reflection.v1.ServerReflection/ServerReflectionInfo",
    "/grpc.reflection.v1alpha.ServerReflection/ServerReflectionInfo",
];

#[derive(Clone)]
pub struct AuthLayer {
    pool: PgPool,
    jwt_secret: String,
}

impl AuthLayer {
    pub fn new(pool: PgPool, jwt_secret: String) -> Self {
        Self { pool, jwt_secret }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            pool: self.pool.clone(),
            jwt_secret: self.jwt_secret.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    pool: PgPool,
    jwt_secret: String,
}

type BoxBody = UnsyncBoxBody<bytes::Bytes, Status>;

impl<S, ReqBody> Service<HttpRequest<ReqBody>> for AuthMiddleware<S>
where
    S: Service<HttpRequest<ReqBody>, Response = HttpResponse<BoxBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = HttpResponse<BoxBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: HttpRequest<ReqBody>) -> Self::Future {
        let mut inner = self.inner.clone();
        std::mem::swap(&mut self.inner, &mut inner);

        let pool = self.pool.clone();
        let jwt_secret = self.jwt_secret.clone();

        Box::pin(async move {
            let path = req.uri().path().to_string();

            // Check if this is a public path
            if PUBLIC_PATHS.iter().any(|p| path == *p) {
                return inner.call(req).await;
            }

            // Extract Authorization header
            let auth_header = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|s| s.to_string());

            // Try JWT authentication. A subject that is not a uuid cannot
            // match any row, so such a token counts as invalid
            let jwt_claims = auth_header.and_then(|token| {
                jsonwebtoken::decode::<Claims>(
                    &token,
                    &DecodingKey::from_secret(jwt_secret.as_bytes()),
                    &Validation::default(),
                )
                .ok()
                .map(|data| data.claims)
                .filter(|claims| uuid::Uuid::parse_str(&claims.sub).is_ok())
            });

            if let Some(claims) = jwt_claims {
                // Admin-ness comes from admin_users membership, not the
                // profile role column
                let is_admin = check_is_admin(&pool, &claims.sub).await;

                // Inject AuthenticatedUser into extensions
                req.extensions_mut().insert(AuthenticatedUser {
                    user_id: claims.sub,
                    is_admin,
                });
            }
            // No valid JWT — pass through; services that require a session
            // answer UNAUTHENTICATED when the extension is missing

            inner.call(req).await
        })
    }
}

async fn check_is_admin(pool: &PgPool, user_id: &str) -> bool {
    match sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM admin_users WHERE id = $1::uuid)",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    {
        Ok(is_admin) => is_admin,
        Err(e) => {
            tracing::warn!("Admin membership check failed for {}: {}", user_id, e);
            false
        }
    }
}
