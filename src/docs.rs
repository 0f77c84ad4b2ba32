use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use bcr_core::{ErrorBody, ErrorEnvelope, PaginationMeta};
use bcr_models::auth::{AccessTokenResponse, LoginRequest, RegisterRequest};
use bcr_models::cars::{Car, CreateCarDto, PaginatedCarsResponse, UpdateCarDto};
use bcr_models::roles::RoleInfo;
use bcr_models::user_cars::{RentCarDto, UserCar};
use bcr_models::users::UserProfile;

use crate::modules::application::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::application::controller::get_root,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::whoami,
        crate::modules::cars::controller::list_cars,
        crate::modules::cars::controller::create_car,
        crate::modules::cars::controller::get_car,
        crate::modules::cars::controller::update_car,
        crate::modules::cars::controller::delete_car,
        crate::modules::cars::controller::rent_car,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            ErrorEnvelope,
            PaginationMeta,
            LoginRequest,
            RegisterRequest,
            AccessTokenResponse,
            UserProfile,
            RoleInfo,
            Car,
            CreateCarDto,
            UpdateCarDto,
            PaginatedCarsResponse,
            RentCarDto,
            UserCar,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Application", description = "Health check"),
        (name = "Authentication", description = "Login, registration and current user"),
        (name = "Cars", description = "Car management and rental")
    ),
    info(
        title = "BCR API",
        version = "0.1.0",
        description = "Car rental REST API built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
