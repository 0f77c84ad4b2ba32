use std::sync::Arc;

use chrono::Duration;
use serde_json::json;
use tracing::instrument;

use bcr_core::AppError;
use bcr_models::{CarId, UserId};

use crate::metrics::{track_car_created, track_car_deleted, track_car_rented};
use crate::store::{CarStore, UserCarStore};

use super::model::{
    Car, CarFilterParams, CarListQuery, CreateCarDto, NewUserCar, PaginatedCarsResponse,
    RentCarDto, UpdateCarDto, UserCar,
};

/// Resolves a path segment to a car id. Anything unparsable is reported the
/// same way as an id with no row behind it.
pub fn parse_car_id(raw: &str) -> Result<CarId, AppError> {
    raw.parse::<CarId>()
        .map_err(|_| AppError::record_not_found("Car"))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Clone)]
pub struct CarService {
    cars: Arc<dyn CarStore>,
    rentals: Arc<dyn UserCarStore>,
}

impl CarService {
    pub fn new(cars: Arc<dyn CarStore>, rentals: Arc<dyn UserCarStore>) -> Self {
        Self { cars, rentals }
    }

    /// Translates the list query string into store predicates and a window.
    pub fn get_list_query_from_request(params: &CarFilterParams) -> CarListQuery {
        let pagination = params.pagination();

        CarListQuery {
            size: non_empty(&params.size),
            name: non_empty(&params.name),
            available_at: params.available_at,
            limit: pagination.limit(),
            offset: pagination.offset(),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_cars(&self, params: CarFilterParams) -> Result<PaginatedCarsResponse, AppError> {
        let query = Self::get_list_query_from_request(&params);
        let (cars, count) = self.cars.find_and_count_all(&query).await?;

        Ok(PaginatedCarsResponse {
            cars,
            meta: params.pagination().meta(count),
        })
    }

    #[instrument(skip(self))]
    pub async fn create_car(&self, dto: CreateCarDto) -> Result<Car, AppError> {
        let car = self.cars.create(&dto).await?;
        track_car_created(&car.size);
        Ok(car)
    }

    #[instrument(skip(self))]
    pub async fn get_car(&self, id: &str) -> Result<Car, AppError> {
        let id = parse_car_id(id)?;
        self.cars
            .find_by_pk(id)
            .await?
            .ok_or_else(|| AppError::record_not_found("Car"))
    }

    #[instrument(skip(self))]
    pub async fn update_car(&self, id: &str, dto: UpdateCarDto) -> Result<Car, AppError> {
        let id = parse_car_id(id)?;
        self.cars
            .update(id, &dto)
            .await?
            .ok_or_else(|| AppError::record_not_found("Car"))
    }

    #[instrument(skip(self))]
    pub async fn delete_car(&self, id: &str) -> Result<(), AppError> {
        let id = parse_car_id(id)?;
        if !self.cars.destroy(id).await? {
            return Err(AppError::record_not_found("Car"));
        }
        track_car_deleted();
        Ok(())
    }

    /// Books `id` for `user_id`. The window defaults to one day.
    #[instrument(skip(self))]
    pub async fn rent_car(
        &self,
        id: &str,
        user_id: UserId,
        dto: RentCarDto,
    ) -> Result<UserCar, AppError> {
        let car = self.get_car(id).await?;

        let rent_started_at = dto.rent_started_at;
        let rent_ended_at = dto
            .rent_ended_at
            .unwrap_or(rent_started_at + Duration::days(1));

        if rent_ended_at <= rent_started_at {
            return Err(AppError::validation(
                "rentEndedAt must be after rentStartedAt",
                Some(json!({ "rentEndedAt": ["must be after rentStartedAt"] })),
            ));
        }

        if self
            .rentals
            .find_overlapping(car.id, rent_started_at, rent_ended_at)
            .await?
            .is_some()
        {
            return Err(AppError::CarAlreadyRented { car_id: car.id.get() });
        }

        let rental = self
            .rentals
            .create(NewUserCar {
                user_id,
                car_id: car.id,
                rent_started_at,
                rent_ended_at,
            })
            .await?;
        track_car_rented();

        Ok(rental)
    }
}
