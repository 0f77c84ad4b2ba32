use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use bcr_core::AppError;
use bcr_models::{
    Car, CarId, CarListQuery, CreateCarDto, NewUser, NewUserCar, Role, RoleId, RoleInfo,
    UpdateCarDto, User, UserCar, UserId, UserWithRole,
};

use super::{CarStore, RoleStore, UserCarStore, UserStore};

const USER_COLUMNS: &str =
    "id, name, email, encrypted_password, role_id, image, created_at, updated_at";
const ROLE_COLUMNS: &str = "id, name, created_at, updated_at";
const CAR_COLUMNS: &str =
    "id, name, price, size, image, is_currently_rented, created_at, updated_at";
/// SQLSTATE for `exclusion_violation`, raised by `user_cars_no_overlap`.
const EXCLUSION_VIOLATION: &str = "23P01";

const USER_CAR_COLUMNS: &str =
    "id, user_id, car_id, rent_started_at, rent_ended_at, created_at, updated_at";

/// PostgreSQL implementation of every store trait.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn push_car_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &CarListQuery) {
    builder.push(" WHERE TRUE");

    if let Some(size) = &query.size {
        builder.push(" AND size = ").push_bind(size.clone());
    }

    if let Some(name) = &query.name {
        builder
            .push(" AND name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
    }

    if let Some(at) = query.available_at {
        builder
            .push(
                " AND NOT EXISTS (SELECT 1 FROM user_cars uc WHERE uc.car_id = cars.id \
                 AND uc.rent_started_at <= ",
            )
            .push_bind(at)
            .push(" AND uc.rent_ended_at >= ")
            .push_bind(at)
            .push(")");
    }
}

#[derive(sqlx::FromRow)]
struct UserWithRoleRow {
    #[sqlx(flatten)]
    user: User,
    role_name: String,
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_email_with_role(
        &self,
        email: &str,
    ) -> Result<Option<UserWithRole>, AppError> {
        let row = sqlx::query_as::<_, UserWithRoleRow>(
            r#"SELECT u.id, u.name, u.email, u.encrypted_password, u.role_id, u.image,
                      u.created_at, u.updated_at, r.name AS role_name
               FROM users u
               JOIN roles r ON r.id = u.role_id
               WHERE u.email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| UserWithRole {
            role: RoleInfo {
                id: row.user.role_id,
                name: row.role_name,
            },
            user: row.user,
        }))
    }

    #[instrument(skip(self))]
    async fn find_by_pk(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (name, email, encrypted_password, role_id, image)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.encrypted_password)
        .bind(user.role_id)
        .bind(&user.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::EmailAlreadyTaken {
                    email: user.email.clone(),
                };
            }
            AppError::from(e)
        })
    }
}

#[async_trait]
impl RoleStore for PgStore {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }

    #[instrument(skip(self))]
    async fn find_by_pk(&self, id: RoleId) -> Result<Option<Role>, AppError> {
        let role = sqlx::query_as::<_, Role>(&format!(
            "SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(role)
    }
}

#[async_trait]
impl CarStore for PgStore {
    #[instrument(skip(self))]
    async fn find_and_count_all(
        &self,
        query: &CarListQuery,
    ) -> Result<(Vec<Car>, i64), AppError> {
        let mut count_builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM cars");
        push_car_filters(&mut count_builder, query);
        let count = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut data_builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {CAR_COLUMNS} FROM cars"));
        push_car_filters(&mut data_builder, query);
        data_builder
            .push(" ORDER BY id ASC LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let cars = data_builder
            .build_query_as::<Car>()
            .fetch_all(&self.pool)
            .await?;

        Ok((cars, count))
    }

    #[instrument(skip(self))]
    async fn find_by_pk(&self, id: CarId) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    #[instrument(skip(self))]
    async fn create(&self, car: &CreateCarDto) -> Result<Car, AppError> {
        let car = sqlx::query_as::<_, Car>(&format!(
            r#"INSERT INTO cars (name, price, size, image)
               VALUES ($1, $2, $3, $4)
               RETURNING {CAR_COLUMNS}"#
        ))
        .bind(&car.name)
        .bind(car.price)
        .bind(&car.size)
        .bind(&car.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: CarId, changes: &UpdateCarDto) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>(&format!(
            r#"UPDATE cars
               SET name = COALESCE($1, name),
                   price = COALESCE($2, price),
                   size = COALESCE($3, size),
                   image = COALESCE($4, image),
                   is_currently_rented = COALESCE($5, is_currently_rented),
                   updated_at = NOW()
               WHERE id = $6
               RETURNING {CAR_COLUMNS}"#
        ))
        .bind(&changes.name)
        .bind(changes.price)
        .bind(&changes.size)
        .bind(&changes.image)
        .bind(changes.is_currently_rented)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    #[instrument(skip(self))]
    async fn destroy(&self, id: CarId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserCarStore for PgStore {
    #[instrument(skip(self))]
    async fn find_overlapping(
        &self,
        car_id: CarId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Option<UserCar>, AppError> {
        let rental = sqlx::query_as::<_, UserCar>(&format!(
            r#"SELECT {USER_CAR_COLUMNS} FROM user_cars
               WHERE car_id = $1 AND rent_started_at < $3 AND rent_ended_at > $2
               ORDER BY rent_started_at ASC
               LIMIT 1"#
        ))
        .bind(car_id)
        .bind(from)
        .bind(until)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    #[instrument(skip(self))]
    async fn create(&self, rental: NewUserCar) -> Result<UserCar, AppError> {
        sqlx::query_as::<_, UserCar>(&format!(
            r#"INSERT INTO user_cars (user_id, car_id, rent_started_at, rent_ended_at)
               VALUES ($1, $2, $3, $4)
               RETURNING {USER_CAR_COLUMNS}"#
        ))
        .bind(rental.user_id)
        .bind(rental.car_id)
        .bind(rental.rent_started_at)
        .bind(rental.rent_ended_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::record_not_found("Car");
                }
                if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) {
                    return AppError::CarAlreadyRented {
                        car_id: rental.car_id.get(),
                    };
                }
            }
            AppError::from(e)
        })
    }
}
