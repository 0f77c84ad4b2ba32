use std::sync::Arc;

use bcr_auth::{BcryptHasher, JwtSigner, PasswordHasher, TokenSigner};
use bcr_config::{CorsConfig, DatabaseConfig, JwtConfig, RateLimitConfig, ServerConfig};
use bcr_db::{init_db_pool, run_migrations};

use crate::modules::auth::service::AuthService;
use crate::modules::cars::service::CarService;
use crate::store::{CarStore, MemoryStore, PgStore, RoleStore, UserCarStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub car_service: CarService,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    /// Wires both services to a single backing store.
    pub fn with_store<S>(
        store: Arc<S>,
        hasher: Arc<dyn PasswordHasher>,
        signer: Arc<dyn TokenSigner>,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self
    where
        S: UserStore + RoleStore + CarStore + UserCarStore + 'static,
    {
        Self {
            auth_service: AuthService::new(store.clone(), store.clone(), hasher, signer),
            car_service: CarService::new(store.clone(), store),
            cors_config,
            rate_limit_config,
        }
    }

    /// In-process state with a fresh [`MemoryStore`] and no rate limiting.
    pub fn in_memory(store: MemoryStore, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self::with_store(
            Arc::new(store),
            Arc::new(BcryptHasher::new(bcrypt_cost)),
            Arc::new(JwtSigner::new(jwt_config)),
            CorsConfig::default(),
            RateLimitConfig::disabled(),
        )
    }
}

/// Builds the state from the environment. Uses Postgres when `DATABASE_URL`
/// is set and applies pending migrations, otherwise falls back to an
/// in-memory store.
pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env();
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(server_config.bcrypt_cost));
    let signer: Arc<dyn TokenSigner> = Arc::new(JwtSigner::new(JwtConfig::from_env()));
    let cors_config = CorsConfig::from_env();
    let rate_limit_config = RateLimitConfig::from_env();

    if database_config.url.is_none() {
        tracing::warn!("DATABASE_URL is not set, using the in-memory store; data will not persist");
        return Ok(AppState::with_store(
            Arc::new(MemoryStore::new()),
            hasher,
            signer,
            cors_config,
            rate_limit_config,
        ));
    }

    let pool = init_db_pool(&database_config).await?;
    run_migrations(&pool).await?;

    Ok(AppState::with_store(
        Arc::new(PgStore::new(pool)),
        hasher,
        signer,
        cors_config,
        rate_limit_config,
    ))
}
