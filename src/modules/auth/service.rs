use std::sync::Arc;

use anyhow::anyhow;
use tracing::instrument;

use bcr_auth::{Claims, PasswordHasher, RoleClaim, TokenPayload, TokenSigner};
use bcr_core::AppError;
use bcr_models::{NewUser, RoleInfo, User, UserId, UserProfile, UserWithRole, access_control};

use crate::metrics::{
    track_jwt_issued, track_user_login_failure, track_user_login_success, track_user_registered,
};
use crate::store::{RoleStore, UserStore};

use super::model::{AccessTokenResponse, LoginRequest, RegisterRequest};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleStore>,
    hasher: Arc<dyn PasswordHasher>,
    signer: Arc<dyn TokenSigner>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
            signer,
        }
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn login(&self, dto: LoginRequest) -> Result<AccessTokenResponse, AppError> {
        let Some(UserWithRole { user, role }) =
            self.users.find_by_email_with_role(&dto.email).await?
        else {
            track_user_login_failure("email_not_registered");
            return Err(AppError::EmailNotRegistered { email: dto.email });
        };

        if !self.hasher.compare(&dto.password, &user.encrypted_password)? {
            track_user_login_failure("wrong_password");
            return Err(AppError::WrongPassword);
        }

        let access_token = self.create_token_from_user(&user, &role)?;
        track_user_login_success(&role.name);

        Ok(AccessTokenResponse { access_token })
    }

    #[instrument(skip(self, dto), fields(email = %dto.email))]
    pub async fn register(&self, dto: RegisterRequest) -> Result<AccessTokenResponse, AppError> {
        if self.users.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::EmailAlreadyTaken { email: dto.email });
        }

        let role = self
            .roles
            .find_by_name(access_control::CUSTOMER)
            .await?
            .ok_or_else(|| {
                AppError::internal(anyhow!("Role {} is not seeded", access_control::CUSTOMER))
            })?;

        let encrypted_password = self.encrypt_password(&dto.password)?;

        let user = self
            .users
            .create(NewUser {
                name: dto.name,
                email: dto.email,
                encrypted_password,
                role_id: role.id,
                image: None,
            })
            .await?;

        let access_token = self.create_token_from_user(&user, &RoleInfo::from(&role))?;
        track_user_registered(&role.name);

        Ok(AccessTokenResponse { access_token })
    }

    /// Loads the user behind a token together with its role.
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> Result<UserProfile, AppError> {
        let user = self
            .users
            .find_by_pk(user_id)
            .await?
            .ok_or_else(|| AppError::record_not_found("User"))?;

        let role = self
            .roles
            .find_by_pk(user.role_id)
            .await?
            .ok_or_else(|| AppError::record_not_found("Role"))?;

        Ok(UserProfile::new(user, &role))
    }

    pub fn create_token_from_user(&self, user: &User, role: &RoleInfo) -> Result<String, AppError> {
        let token = self.signer.sign(&TokenPayload {
            id: user.id.get(),
            name: user.name.clone(),
            email: user.email.clone(),
            image: user.image.clone(),
            role: RoleClaim {
                id: role.id.get(),
                name: role.name.clone(),
            },
        })?;
        track_jwt_issued();

        Ok(token)
    }

    pub fn encrypt_password(&self, password: &str) -> Result<String, AppError> {
        self.hasher.hash(password)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        self.signer.verify(token)
    }
}
