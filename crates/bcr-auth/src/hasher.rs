use bcr_core::{AppError, hash_password_with_cost, verify_password};

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, AppError>;

    /// Returns `Ok(false)` on a mismatch. Errors only when the stored hash is
    /// unreadable.
    fn compare(&self, plain: &str, hashed: &str) -> Result<bool, AppError>;
}

#[derive(Clone, Debug)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plain: &str) -> Result<String, AppError> {
        hash_password_with_cost(plain, self.cost)
    }

    fn compare(&self, plain: &str, hashed: &str) -> Result<bool, AppError> {
        verify_password(plain, hashed)
    }
}
