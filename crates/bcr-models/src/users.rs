//! User domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{RoleId, UserId};
use crate::roles::{Role, RoleInfo};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub encrypted_password: String,
    pub role_id: RoleId,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the user store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub encrypted_password: String,
    pub role_id: RoleId,
    pub image: Option<String>,
}

/// A user joined with its role, as needed by login.
#[derive(Debug, Clone)]
pub struct UserWithRole {
    pub user: User,
    pub role: RoleInfo,
}

/// The "who am I" view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role_id: RoleId,
    pub role: RoleInfo,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user: User, role: &Role) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            role_id: user.role_id,
            role: RoleInfo::from(role),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
