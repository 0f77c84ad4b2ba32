//! Car domain models and DTOs.

use bcr_core::serde::deserialize_optional_datetime;
use bcr_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::CarId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub price: i64,
    pub size: String,
    pub image: String,
    pub is_currently_rented: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarDto {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: i64,
    #[validate(length(min = 1, max = 50, message = "size must not be empty"))]
    pub size: String,
    #[validate(length(min = 1, message = "image must not be empty"))]
    pub image: String,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarDto {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price: Option<i64>,
    #[validate(length(min = 1, max = 50, message = "size must not be empty"))]
    pub size: Option<String>,
    #[validate(length(min = 1, message = "image must not be empty"))]
    pub image: Option<String>,
    pub is_currently_rented: Option<bool>,
}

impl UpdateCarDto {
    /// Applies the present fields onto `car`.
    pub fn apply(&self, car: &mut Car) {
        if let Some(name) = &self.name {
            car.name = name.clone();
        }
        if let Some(price) = self.price {
            car.price = price;
        }
        if let Some(size) = &self.size {
            car.size = size.clone();
        }
        if let Some(image) = &self.image {
            car.image = image.clone();
        }
        if let Some(rented) = self.is_currently_rented {
            car.is_currently_rented = rented;
        }
    }
}

/// Query parameters accepted by `GET /v1/cars`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CarFilterParams {
    /// Exact size match, e.g. `SMALL`
    pub size: Option<String>,
    /// Case-insensitive substring of the car name
    pub name: Option<String>,
    /// Only cars not rented at this instant (RFC 3339 or `YYYY-MM-DD`)
    #[serde(default, deserialize_with = "deserialize_optional_datetime")]
    #[param(value_type = Option<String>)]
    pub available_at: Option<DateTime<Utc>>,
    /// Page number (1-indexed, default: 1)
    pub page: Option<String>,
    /// Items per page (default: 10)
    pub page_size: Option<String>,
}

impl CarFilterParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.clone(),
            page_size: self.page_size.clone(),
        }
    }
}

/// Store-level list query: filter predicates plus window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarListQuery {
    pub size: Option<String>,
    pub name: Option<String>,
    pub available_at: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for CarListQuery {
    fn default() -> Self {
        Self {
            size: None,
            name: None,
            available_at: None,
            limit: bcr_core::pagination::DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedCarsResponse {
    pub cars: Vec<Car>,
    pub meta: PaginationMeta,
}
