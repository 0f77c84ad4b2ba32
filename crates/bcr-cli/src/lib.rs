//! # BCR CLI
//!
//! Administrative tooling for the BCR API: creating admin accounts and
//! seeding the database with fake cars and customers for development.
//!
//! ## Usage
//!
//! ```ignore
//! use bcr_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig { cars: 100, customers: 20, ..SeedConfig::default() }).await?;
//! ```

pub mod admin;
pub mod seeder;
