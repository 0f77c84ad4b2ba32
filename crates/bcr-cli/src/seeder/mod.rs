//! Database seeding.
//!
//! Fake data is generated in parallel with rayon and inserted in batches of
//! multi-row `INSERT`s inside one transaction per table. Seeded rows are
//! recognizable (see [`models::SEED_EMAIL_DOMAIN`] and
//! [`models::SEED_IMAGE_PREFIX`]) so they can be cleared without touching
//! real data.

pub mod cars;
pub mod models;
pub mod users;

use std::time::Instant;

use anyhow::anyhow;
use bcr_core::hash_password_with_cost;
use bcr_models::access_control;
use sqlx::PgPool;

pub use models::SeedConfig;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!(
        "🌱 Seeding database ({} cars, {} customers)",
        config.cars, config.customers
    );

    cars::seed_cars(db, config.cars).await?;

    if config.customers > 0 {
        let role_id = users::find_role_id(db, access_control::CUSTOMER).await?;
        let password_hash = hash_password_with_cost(models::SEED_PASSWORD, config.bcrypt_cost)
            .map_err(|e| anyhow!("Failed to hash password: {}", e.message()))?;
        users::seed_customers(db, config.customers, role_id, &password_hash).await?;
        println!(
            "   ℹ Seeded customers log in with password '{}'",
            models::SEED_PASSWORD
        );
    }

    println!("✅ Seeding completed in {:?}", start_time.elapsed());
    Ok(())
}

pub async fn clear_all(db: &PgPool) -> anyhow::Result<()> {
    let start_time = Instant::now();

    cars::clear_cars(db).await?;
    let role_id = users::find_role_id(db, access_control::CUSTOMER).await?;
    users::clear_customers(db, role_id).await?;

    println!("✅ Cleared seeded data in {:?}", start_time.elapsed());
    Ok(())
}
