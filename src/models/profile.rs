use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::proto::profile::Profile;

/// One row per user, created by the identity provider at signup.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProfileModel {
    pub id: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub verification_status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl ProfileModel {
    pub fn to_proto(&self) -> Profile {
        Profile {
            id: self.id.clone(),
            name: self.name.clone(),
            phone_number: self.phone_number.clone().unwrap_or_default(),
            role: self.role.clone(),
            verification_status: self.verification_status.clone(),
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}
