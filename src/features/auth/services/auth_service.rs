use sqlx::PgPool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto, MeResponseDto, RegisterRequestDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::password;
use crate::features::auth::services::TokenService;
use crate::features::users::models::User;

/// Service for registration and credential-based login.
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { pool, tokens }
    }

    /// Register a new customer account and issue a token for it.
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check existing email: {:?}", e);
                AppError::Database(e)
            })?;

        if existing > 0 {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = password::hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, display_name, role)
            VALUES ($1, $2, $3, 'customer')
            RETURNING id, email, password_hash, display_name, role, is_active, created_at, updated_at
            "#,
        )
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(&dto.display_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Unique constraint race between the existence check and the insert
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Email already registered".to_string())
            }
            _ => {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("User registered: id={}, email={}", user.id, user.email);

        self.auth_response(user)
    }

    /// Verify credentials and issue a signed token on success.
    ///
    /// Unknown email and wrong password produce the same generic 401 so the
    /// endpoint cannot be used to enumerate accounts.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, display_name, role, is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(&dto.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by email: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if !password::verify_password(&dto.password, &user.password_hash)? {
            tracing::warn!("Failed login attempt for {}", dto.email);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Account is deactivated".to_string()));
        }

        tracing::info!("User logged in: id={}", user.id);

        self.auth_response(user)
    }

    pub fn get_current_user(&self, user: AuthenticatedUser) -> MeResponseDto {
        MeResponseDto {
            id: user.user_id,
            email: user.email,
            role: user.role,
        }
    }

    fn auth_response(&self, user: User) -> Result<AuthResponseDto> {
        let issued = self.tokens.issue_token(user.id, &user.email, user.role)?;
        Ok(AuthResponseDto {
            access_token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            user: user.into(),
        })
    }
}
