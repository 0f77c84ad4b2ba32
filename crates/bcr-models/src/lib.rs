//! # BCR Models
//!
//! Domain models and DTOs for the BCR API: database entities, request and
//! response bodies, validation rules and OpenAPI schemas.
//!
//! - [`auth`]: Login and registration bodies, token response
//! - [`cars`]: Cars, car DTOs and list filters
//! - [`ids`]: Strongly-typed ids
//! - [`roles`]: Roles and the role names used for access control
//! - [`user_cars`]: Rental associations
//! - [`users`]: Users and profiles

pub mod auth;
pub mod cars;
pub mod ids;
pub mod roles;
pub mod user_cars;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AccessTokenResponse, Claims, LoginRequest, RegisterRequest};
pub use cars::{Car, CarFilterParams, CarListQuery, CreateCarDto, PaginatedCarsResponse, UpdateCarDto};
pub use ids::{CarId, RoleId, UserCarId, UserId};
pub use roles::{Role, RoleInfo, access_control};
pub use user_cars::{NewUserCar, RentCarDto, UserCar};
pub use users::{NewUser, User, UserProfile, UserWithRole};
