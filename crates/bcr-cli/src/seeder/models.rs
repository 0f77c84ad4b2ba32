//! Seed payloads and seeding configuration.

use bcr_models::RoleId;

/// Every seeded record is marked with this so `clear-seed` can find it.
pub const SEED_EMAIL_DOMAIN: &str = "example.com";
pub const SEED_IMAGE_PREFIX: &str = "https://picsum.photos/seed/bcr-";

/// Plain password given to every seeded customer.
pub const SEED_PASSWORD: &str = "password123";

pub struct CarSeed {
    pub name: String,
    pub price: i64,
    pub size: String,
    pub image: String,
}

pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: RoleId,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub cars: usize,
    pub customers: usize,
    pub bcrypt_cost: u32,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            cars: 50,
            customers: 10,
            bcrypt_cost: 10,
        }
    }
}
