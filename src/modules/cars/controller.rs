use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use bcr_core::{AppError, ErrorEnvelope};

use super::model::{
    Car, CarFilterParams, CreateCarDto, PaginatedCarsResponse, RentCarDto, UpdateCarDto, UserCar,
};
use crate::middleware::auth::AuthUser;
use crate::middleware::role::{RequireAdmin, RequireCustomer};
use crate::state::AppState;
use crate::validator::{QueryParams, ValidatedJson};

/// List cars with optional filters
#[utoipa::path(
    get,
    path = "/v1/cars",
    params(CarFilterParams),
    responses(
        (status = 200, description = "Paginated list of cars", body = PaginatedCarsResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_cars(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    QueryParams(filters): QueryParams<CarFilterParams>,
) -> Result<Json<PaginatedCarsResponse>, AppError> {
    let cars = state.car_service.list_cars(filters).await?;
    Ok(Json(cars))
}

/// Create a car
#[utoipa::path(
    post,
    path = "/v1/cars",
    request_body = CreateCarDto,
    responses(
        (status = 201, description = "Car created", body = Car),
        (status = 401, description = "Not an admin", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.0.id))]
pub async fn create_car(
    State(state): State<AppState>,
    RequireAdmin(auth_user): RequireAdmin,
    ValidatedJson(dto): ValidatedJson<CreateCarDto>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let car = state.car_service.create_car(dto).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// Get a car by id
#[utoipa::path(
    get,
    path = "/v1/cars/{id}",
    params(
        ("id" = i64, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car details", body = Car),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 404, description = "Car not found", body = ErrorEnvelope)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_car(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Car>, AppError> {
    let car = state.car_service.get_car(&id).await?;
    Ok(Json(car))
}

/// Update a car
#[utoipa::path(
    put,
    path = "/v1/cars/{id}",
    params(
        ("id" = i64, Path, description = "Car ID")
    ),
    request_body = UpdateCarDto,
    responses(
        (status = 200, description = "Car updated", body = Car),
        (status = 401, description = "Not an admin", body = ErrorEnvelope),
        (status = 404, description = "Car not found", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.0.id))]
pub async fn update_car(
    State(state): State<AppState>,
    RequireAdmin(auth_user): RequireAdmin,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateCarDto>,
) -> Result<Json<Car>, AppError> {
    let car = state.car_service.update_car(&id, dto).await?;
    Ok(Json(car))
}

/// Delete a car
#[utoipa::path(
    delete,
    path = "/v1/cars/{id}",
    params(
        ("id" = i64, Path, description = "Car ID")
    ),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 401, description = "Not an admin", body = ErrorEnvelope),
        (status = 404, description = "Car not found", body = ErrorEnvelope)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.0.id))]
pub async fn delete_car(
    State(state): State<AppState>,
    RequireAdmin(auth_user): RequireAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.car_service.delete_car(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rent a car for the current customer
#[utoipa::path(
    post,
    path = "/v1/cars/{id}/rent",
    params(
        ("id" = i64, Path, description = "Car ID")
    ),
    request_body = RentCarDto,
    responses(
        (status = 201, description = "Car rented", body = UserCar),
        (status = 401, description = "Not a customer", body = ErrorEnvelope),
        (status = 404, description = "Car not found", body = ErrorEnvelope),
        (status = 422, description = "Invalid window or car already rented", body = ErrorEnvelope)
    ),
    tag = "Cars",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.0.id))]
pub async fn rent_car(
    State(state): State<AppState>,
    RequireCustomer(auth_user): RequireCustomer,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<RentCarDto>,
) -> Result<(StatusCode, Json<UserCar>), AppError> {
    let rental = state
        .car_service
        .rent_car(&id, auth_user.user_id(), dto)
        .await?;
    Ok((StatusCode::CREATED, Json(rental)))
}
