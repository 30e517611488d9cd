pub mod cart_service;
pub mod catalog_service;
pub mod health_service;
pub mod listings_service;
pub mod moderation_service;
pub mod profile_service;
pub mod wishlist_service;

pub use cart_service::CartServiceImpl;
pub use catalog_service::CatalogServiceImpl;
pub use health_service::HealthServiceImpl;
pub use listings_service::ListingsServiceImpl;
pub use moderation_service::ModerationServiceImpl;
pub use profile_service::ProfileServiceImpl;
pub use wishlist_service::WishlistServiceImpl;

use tonic::{Request, Status};
use uuid::Uuid;

use crate::middleware::AuthenticatedUser;

/// Session injected by the auth middleware; absent means the caller never
/// presented a valid token.
pub(crate) fn authenticated_user<T>(request: &Request<T>) -> Result<AuthenticatedUser, Status> {
    request
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| Status::unauthenticated("Authentication required"))
}

pub(crate) fn admin_user<T>(request: &Request<T>) -> Result<AuthenticatedUser, Status> {
    let user = authenticated_user(request)?;
    if !user.is_admin {
        return Err(Status::permission_denied("Administrator access required"));
    }
    Ok(user)
}

/// Parses a client-supplied row id before it reaches a `::uuid` bind, so a
/// malformed id answers INVALID_ARGUMENT instead of a Postgres cast error.
pub(crate) fn parse_id(value: &str, field: &str) -> Result<Uuid, Status> {
    if value.is_empty() {
        return Err(Status::invalid_argument(format!("{} is required", field)));
    }
    Uuid::parse_str(value)
        .map_err(|_| Status::invalid_argument(format!("{} is not a valid id", field)))
}

#[cfg(test)]
mod tests {
    use super::parse_id;
    use tonic::Code;

    #[test]
    fn parse_id_accepts_canonical_uuids() {
        let id = parse_id("6f1b2a3c-4d5e-4f60-8a9b-0c1d2e3f4a5b", "id").unwrap();
        assert_eq!(id.to_string(), "6f1b2a3c-4d5e-4f60-8a9b-0c1d2e3f4a5b");
    }

    #[test]
    fn parse_id_rejects_empty_and_malformed_values() {
        let empty = parse_id("", "product_id").unwrap_err();
        assert_eq!(empty.code(), Code::InvalidArgument);
        assert_eq!(empty.message(), "product_id is required");

        let bad = parse_id("not-a-uuid", "product_id").unwrap_err();
        assert_eq!(bad.code(), Code::InvalidArgument);
        assert_eq!(bad.message(), "product_id is not a valid id");

        let injected = parse_id("1; DROP TABLE carts", "id").unwrap_err();
        assert_eq!(injected.code(), Code::InvalidArgument);
    }
}
