//! In-process store.
//!
//! Implements every store trait over plain vectors behind a single
//! [`RwLock`], mirroring the Postgres semantics closely enough for the test
//! suite and for running the API without a database. Roles `ADMIN` (id 1)
//! and `CUSTOMER` (id 2) are seeded like the migrations do.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use bcr_core::AppError;
use bcr_models::{
    Car, CarId, CarListQuery, CreateCarDto, NewUser, NewUserCar, Role, RoleId, RoleInfo,
    UpdateCarDto, User, UserCar, UserCarId, UserId, UserWithRole, access_control,
};

use super::{CarStore, RoleStore, UserCarStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    roles: Vec<Role>,
    cars: Vec<Car>,
    user_cars: Vec<UserCar>,
    next_user_id: i64,
    next_car_id: i64,
    next_user_car_id: i64,
}

#[derive(Clone, Debug)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let now = Utc::now();
        let roles = [access_control::ADMIN, access_control::CUSTOMER]
            .iter()
            .enumerate()
            .map(|(i, name)| Role {
                id: RoleId::new(i as i64 + 1),
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        Self {
            tables: Arc::new(RwLock::new(Tables {
                roles,
                next_user_id: 1,
                next_car_id: 1,
                next_user_car_id: 1,
                ..Tables::default()
            })),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Makes every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Removes a role, leaving users that reference it dangling.
    pub async fn remove_role(&self, name: &str) {
        self.tables.write().await.roles.retain(|r| r.name != name);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::internal(anyhow!("store unavailable")));
        }
        Ok(())
    }
}

fn matches_filters(car: &Car, query: &CarListQuery, rentals: &[UserCar]) -> bool {
    if let Some(size) = &query.size
        && &car.size != size
    {
        return false;
    }

    if let Some(name) = &query.name
        && !car.name.to_lowercase().contains(&name.to_lowercase())
    {
        return false;
    }

    if let Some(at) = query.available_at
        && rentals.iter().any(|r| r.car_id == car.id && r.covers(at))
    {
        return false;
    }

    true
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_with_role(
        &self,
        email: &str,
    ) -> Result<Option<UserWithRole>, AppError> {
        self.check()?;
        let tables = self.tables.read().await;
        let found = tables.users.iter().find(|u| u.email == email).and_then(|user| {
            tables
                .roles
                .iter()
                .find(|r| r.id == user.role_id)
                .map(|role| UserWithRole {
                    user: user.clone(),
                    role: RoleInfo::from(role),
                })
        });
        Ok(found)
    }

    async fn find_by_pk(&self, id: UserId) -> Result<Option<User>, AppError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        self.check()?;
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::EmailAlreadyTaken { email: user.email });
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(tables.next_user_id),
            name: user.name,
            email: user.email,
            encrypted_password: user.encrypted_password,
            role_id: user.role_id,
            image: user.image,
            created_at: now,
            updated_at: now,
        };
        tables.next_user_id += 1;
        tables.users.push(created.clone());

        Ok(created)
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn find_by_pk(&self, id: RoleId) -> Result<Option<Role>, AppError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.roles.iter().find(|r| r.id == id).cloned())
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn find_and_count_all(
        &self,
        query: &CarListQuery,
    ) -> Result<(Vec<Car>, i64), AppError> {
        self.check()?;
        let tables = self.tables.read().await;

        let matching: Vec<&Car> = tables
            .cars
            .iter()
            .filter(|car| matches_filters(car, query, &tables.user_cars))
            .collect();

        let count = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .cloned()
            .collect();

        Ok((page, count))
    }

    async fn find_by_pk(&self, id: CarId) -> Result<Option<Car>, AppError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.cars.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, car: &CreateCarDto) -> Result<Car, AppError> {
        self.check()?;
        let mut tables = self.tables.write().await;

        let now = Utc::now();
        let created = Car {
            id: CarId::new(tables.next_car_id),
            name: car.name.clone(),
            price: car.price,
            size: car.size.clone(),
            image: car.image.clone(),
            is_currently_rented: false,
            created_at: now,
            updated_at: now,
        };
        tables.next_car_id += 1;
        tables.cars.push(created.clone());

        Ok(created)
    }

    async fn update(&self, id: CarId, changes: &UpdateCarDto) -> Result<Option<Car>, AppError> {
        self.check()?;
        let mut tables = self.tables.write().await;

        let Some(car) = tables.cars.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        changes.apply(car);
        car.updated_at = Utc::now();

        Ok(Some(car.clone()))
    }

    async fn destroy(&self, id: CarId) -> Result<bool, AppError> {
        self.check()?;
        let mut tables = self.tables.write().await;

        let before = tables.cars.len();
        tables.cars.retain(|c| c.id != id);
        let removed = tables.cars.len() < before;
        if removed {
            tables.user_cars.retain(|r| r.car_id != id);
        }

        Ok(removed)
    }
}

#[async_trait]
impl UserCarStore for MemoryStore {
    async fn find_overlapping(
        &self,
        car_id: CarId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Option<UserCar>, AppError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables
            .user_cars
            .iter()
            .filter(|r| r.car_id == car_id && r.overlaps(from, until))
            .min_by_key(|r| r.rent_started_at)
            .cloned())
    }

    async fn create(&self, rental: NewUserCar) -> Result<UserCar, AppError> {
        self.check()?;
        let mut tables = self.tables.write().await;

        if !tables.cars.iter().any(|c| c.id == rental.car_id) {
            return Err(AppError::record_not_found("Car"));
        }

        if tables.user_cars.iter().any(|r| {
            r.car_id == rental.car_id && r.overlaps(rental.rent_started_at, rental.rent_ended_at)
        }) {
            return Err(AppError::CarAlreadyRented {
                car_id: rental.car_id.get(),
            });
        }

        let now = Utc::now();
        let created = UserCar {
            id: UserCarId::new(tables.next_user_car_id),
            user_id: rental.user_id,
            car_id: rental.car_id,
            rent_started_at: rental.rent_started_at,
            rent_ended_at: rental.rent_ended_at,
            created_at: now,
            updated_at: now,
        };
        tables.next_user_car_id += 1;
        tables.user_cars.push(created.clone());

        Ok(created)
    }
}
