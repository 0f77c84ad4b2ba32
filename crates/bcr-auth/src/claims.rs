//! JWT claim structures for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The role embedded in a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleClaim {
    pub id: i64,
    pub name: String,
}

/// What gets signed into an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenPayload {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: RoleClaim,
}

/// Decoded access token claims.
///
/// Carries the user's identity and role so that handlers can authorize a
/// request without touching the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID
    pub id: i64,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: RoleClaim,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.name == role
    }

    pub fn payload(&self) -> TokenPayload {
        TokenPayload {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            role: self.role.clone(),
        }
    }
}
