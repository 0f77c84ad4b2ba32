//! Customer seeding.

use std::time::Instant;

use anyhow::anyhow;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use bcr_models::{RoleId, UserId};

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

// 4 params per user
const BATCH_SIZE: usize = 1000;

pub async fn find_role_id(db: &PgPool, name: &str) -> anyhow::Result<RoleId> {
    sqlx::query_scalar::<_, RoleId>("SELECT id FROM roles WHERE name = $1")
        .bind(name)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| anyhow!("Role {} is not seeded. Run the migrations first.", name))
}

/// Generates customers in parallel. Emails are unique per index.
pub fn generate_customers(count: usize, role_id: RoleId, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            UserSeed {
                email: format!(
                    "{}.{}+customer{}@{}",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    idx,
                    SEED_EMAIL_DOMAIN
                ),
                name: format!("{} {}", first_name, last_name),
                password_hash: password_hash.to_string(),
                role_id,
            }
        })
        .collect()
}

pub async fn seed_customers(
    db: &PgPool,
    count: usize,
    role_id: RoleId,
    password_hash: &str,
) -> anyhow::Result<Vec<UserId>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} customers...", count);

    let users = generate_customers(count, role_id, password_hash);
    let ids = insert_users_batch(db, &users).await?;

    println!(
        "   ✓ Inserted {} customers in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn insert_users_batch(db: &PgPool, users: &[UserSeed]) -> anyhow::Result<Vec<UserId>> {
    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> anyhow::Result<Vec<UserId>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder =
        QueryBuilder::<Postgres>::new("INSERT INTO users (name, email, encrypted_password, role_id) ");
    builder.push_values(users, |mut row, user| {
        row.push_bind(&user.name)
            .push_bind(&user.email)
            .push_bind(&user.password_hash)
            .push_bind(user.role_id);
    });
    builder.push(" ON CONFLICT (email) DO NOTHING RETURNING id");

    let ids = builder
        .build_query_scalar::<UserId>()
        .fetch_all(&mut **tx)
        .await?;
    Ok(ids)
}

/// Deletes seeded customers. Admins are never touched.
pub async fn clear_customers(db: &PgPool, customer_role: RoleId) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded customers...");

    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1 AND role_id = $2")
        .bind(format!("%@{}", SEED_EMAIL_DOMAIN))
        .bind(customer_role)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} customers in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
