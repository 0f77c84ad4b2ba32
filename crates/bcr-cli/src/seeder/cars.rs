//! Car seeding.

use std::time::Instant;

use fake::Fake;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use bcr_models::CarId;

use super::models::{CarSeed, SEED_IMAGE_PREFIX};

const MAKES: &[&str] = &[
    "Toyota", "Honda", "Mazda", "Suzuki", "Daihatsu", "Mitsubishi", "Nissan", "Hyundai",
];
const MODELS: &[&str] = &[
    "Avanza", "Brio", "CX-5", "Ertiga", "Xenia", "Pajero", "Livina", "Creta", "Rush", "Jazz",
];
pub const SIZES: &[&str] = &["SMALL", "MEDIUM", "LARGE"];

// 4 params per car
const BATCH_SIZE: usize = 1000;

fn pick<'a>(items: &[&'a str]) -> &'a str {
    items[(0..items.len()).fake::<usize>()]
}

/// Generates car data in parallel.
pub fn generate_cars(count: usize) -> Vec<CarSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let year: u16 = (2015..2025).fake();
            // Whole thousands of rupiah per day
            let price = (150..1500).fake::<i64>() * 1000;

            CarSeed {
                name: format!("{} {} {}", pick(MAKES), pick(MODELS), year),
                price,
                size: pick(SIZES).to_string(),
                image: format!("{}{}/600/400", SEED_IMAGE_PREFIX, idx),
            }
        })
        .collect()
}

pub async fn seed_cars(db: &PgPool, count: usize) -> anyhow::Result<Vec<CarId>> {
    let start_time = Instant::now();
    println!("🚗 Seeding {} cars...", count);

    let cars = generate_cars(count);
    let ids = insert_cars_batch(db, &cars).await?;

    println!(
        "   ✓ Inserted {} cars in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

pub async fn insert_cars_batch(db: &PgPool, cars: &[CarSeed]) -> anyhow::Result<Vec<CarId>> {
    let mut tx = db.begin().await?;
    let mut all_ids = Vec::with_capacity(cars.len());

    for chunk in cars.chunks(BATCH_SIZE) {
        all_ids.extend(insert_cars_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all_ids)
}

async fn insert_cars_chunk(
    tx: &mut Transaction<'_, Postgres>,
    cars: &[CarSeed],
) -> anyhow::Result<Vec<CarId>> {
    if cars.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO cars (name, price, size, image) ");
    builder.push_values(cars, |mut row, car| {
        row.push_bind(&car.name)
            .push_bind(car.price)
            .push_bind(&car.size)
            .push_bind(&car.image);
    });
    builder.push(" RETURNING id");

    let ids = builder
        .build_query_scalar::<CarId>()
        .fetch_all(&mut **tx)
        .await?;
    Ok(ids)
}

/// Deletes seeded cars. Their rentals go with them.
pub async fn clear_cars(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded cars...");

    let deleted = sqlx::query("DELETE FROM cars WHERE image LIKE $1")
        .bind(format!("{}%", SEED_IMAGE_PREFIX))
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} cars in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
