//! Role-gated extractors.
//!
//! Each extractor authenticates the request through [`AuthUser`] and then
//! checks the role carried by the token. A valid token with the wrong role
//! is rejected with `InsufficientAccessError`.
//!
//! ```ignore
//! async fn create_car(RequireAdmin(auth_user): RequireAdmin) -> impl IntoResponse {
//!     // only ADMIN tokens get here
//! }
//! ```

use bcr_core::AppError;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;

/// Checks that `auth_user` holds `role`.
pub fn ensure_role(auth_user: &AuthUser, role: &str) -> Result<(), AppError> {
    let allowed = auth_user.0.has_role(role);
    track_authorization_check(role, allowed);

    if !allowed {
        return Err(AppError::InsufficientAccess {
            role: auth_user.role().to_string(),
        });
    }

    Ok(())
}

macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = bcr_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    $crate::middleware::auth::AuthUser::from_request_parts(parts, state).await?;
                ensure_role(&auth_user, $role)?;
                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireAdmin, bcr_models::access_control::ADMIN);
require_role!(RequireCustomer, bcr_models::access_control::CUSTOMER);
