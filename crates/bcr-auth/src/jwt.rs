//! JWT utilities for authentication.
//!
//! Access tokens are HS256 JWTs whose claims carry the user's id, name,
//! email, image and role. [`JwtSigner`] wraps the free functions behind the
//! [`TokenSigner`] trait so services can be tested with other signers.
//!
//! # Example
//!
//! ```ignore
//! use bcr_auth::{JwtSigner, TokenSigner};
//! use bcr_config::JwtConfig;
//!
//! let signer = JwtSigner::new(JwtConfig::from_env());
//! let token = signer.sign(&payload)?;
//! let claims = signer.verify(&token)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use bcr_config::JwtConfig;
use bcr_core::AppError;

use crate::claims::{Claims, TokenPayload};

/// Signs and verifies access tokens.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, payload: &TokenPayload) -> Result<String, AppError>;

    fn verify(&self, token: &str) -> Result<Claims, AppError>;
}

/// Creates an access token for `payload`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    payload: &TokenPayload,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        id: payload.id,
        name: payload.name.clone(),
        email: payload.email.clone(),
        image: payload.image.clone(),
        role: payload.role.clone(),
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[derive(Clone, Debug)]
pub struct JwtSigner {
    config: JwtConfig,
}

impl JwtSigner {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, payload: &TokenPayload) -> Result<String, AppError> {
        create_access_token(payload, &self.config)
    }

    fn verify(&self, token: &str) -> Result<Claims, AppError> {
        verify_token(token, &self.config)
    }
}
