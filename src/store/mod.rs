//! Persistence seams.
//!
//! Services depend on these traits, never on a concrete database. The
//! production implementation is [`postgres::PgStore`]; [`memory::MemoryStore`]
//! keeps everything in process and backs the test suite.
//!
//! Every method is a single round trip to the store. There are no retries or
//! locks at this layer, so concurrent writers are serialized by the store
//! itself (unique keys, row locks).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bcr_core::AppError;
use bcr_models::{
    Car, CarId, CarListQuery, CreateCarDto, NewUser, NewUserCar, Role, RoleId, UpdateCarDto, User,
    UserCar, UserId, UserWithRole,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_email_with_role(&self, email: &str)
    -> Result<Option<UserWithRole>, AppError>;

    async fn find_by_pk(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// Inserts a user. A duplicate email yields `EmailAlreadyTaken`.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError>;

    async fn find_by_pk(&self, id: RoleId) -> Result<Option<Role>, AppError>;
}

#[async_trait]
pub trait CarStore: Send + Sync {
    /// Returns one page of matching cars and the total match count.
    async fn find_and_count_all(&self, query: &CarListQuery)
    -> Result<(Vec<Car>, i64), AppError>;

    async fn find_by_pk(&self, id: CarId) -> Result<Option<Car>, AppError>;

    async fn create(&self, car: &CreateCarDto) -> Result<Car, AppError>;

    /// Returns `None` when no car has this id.
    async fn update(&self, id: CarId, changes: &UpdateCarDto) -> Result<Option<Car>, AppError>;

    /// Returns `false` when no car has this id.
    async fn destroy(&self, id: CarId) -> Result<bool, AppError>;
}

#[async_trait]
pub trait UserCarStore: Send + Sync {
    /// First rental of `car_id` whose window intersects `[from, until)`.
    async fn find_overlapping(
        &self,
        car_id: CarId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Option<UserCar>, AppError>;

    /// Inserts a rental. Overlap is re-checked atomically with the insert, so
    /// a concurrent rental of the same window yields `CarAlreadyRented`.
    async fn create(&self, rental: NewUserCar) -> Result<UserCar, AppError>;
}
