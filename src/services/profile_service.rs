use sqlx::PgPool;
use tonic::{Request, Response, Status};

use crate::models::ProfileModel;
use crate::proto::profile::profile_service_server::ProfileService;
use crate::proto::profile::{GetProfileReq, GetProfileRes, UpdateProfileReq, UpdateProfileRes};
use crate::services::authenticated_user;

const PROFILE_COLUMNS: &str = "id::text, name, phone_number, role, verification_status, \
     created_at::text, updated_at::text";

pub struct ProfileServiceImpl {
    pool: PgPool,
}

impl ProfileServiceImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[tonic::async_trait]
impl ProfileService for ProfileServiceImpl {
    async fn get_profile(
        &self,
        request: Request<GetProfileReq>,
    ) -> Result<Response<GetProfileRes>, Status> {
        let auth_user = authenticated_user(&request)?;

        let profile: Option<ProfileModel> = sqlx::query_as(&format!(
            "SELECT {} FROM profiles WHERE id = $1::uuid",
            PROFILE_COLUMNS
        ))
        .bind(&auth_user.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?;

        match profile {
            Some(p) => Ok(Response::new(GetProfileRes {
                profile: Some(p.to_proto()),
            })),
            // Profiles are created by the identity provider at signup, so a
            // missing row means the account is in a broken state
            None => Err(Status::not_found("Profile not found")),
        }
    }

    async fn update_profile(
        &self,
        request: Request<UpdateProfileReq>,
    ) -> Result<Response<UpdateProfileRes>, Status> {
        let auth_user = authenticated_user(&request)?;
        let req = request.into_inner();

        if req.name.is_empty() {
            return Err(Status::invalid_argument("name is required"));
        }
        let phone_number: Option<&str> = if req.phone_number.is_empty() {
            None
        } else {
            Some(&req.phone_number)
        };

        // role and verification_status are never client-writable
        let profile: ProfileModel = sqlx::query_as(&format!(
            "UPDATE profiles SET name = $1, phone_number = $2, updated_at = now() \
             WHERE id = $3::uuid RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(&req.name)
        .bind(phone_number)
        .bind(&auth_user.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Status::internal(format!("Database error: {}", e)))?
        .ok_or_else(|| Status::not_found("Profile not found"))?;

        Ok(Response::new(UpdateProfileRes {
            profile: Some(profile.to_proto()),
        }))
    }
}
