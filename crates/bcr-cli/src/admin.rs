//! Admin account creation. Admins cannot register through the API.

use anyhow::{Context, anyhow, bail};
use bcr_core::hash_password_with_cost;
use bcr_models::{UserId, access_control};
use sqlx::PgPool;

use crate::seeder::users::find_role_id;

/// Creates an `ADMIN` user. Fails if the email is already taken.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> anyhow::Result<UserId> {
    if name.trim().is_empty() {
        bail!("Name must not be empty");
    }
    if !email.contains('@') {
        bail!("{} is not a valid email address", email);
    }
    if password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }

    let role_id = find_role_id(db, access_control::ADMIN).await?;
    let encrypted_password = hash_password_with_cost(password, bcrypt_cost)
        .map_err(|e| anyhow!("Failed to hash password: {}", e.message()))?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (name, email, encrypted_password, role_id)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(name.trim())
    .bind(email)
    .bind(&encrypted_password)
    .bind(role_id)
    .fetch_optional(db)
    .await
    .context("Failed to insert admin")?;

    user_id.ok_or_else(|| anyhow!("{} already taken", email))
}
