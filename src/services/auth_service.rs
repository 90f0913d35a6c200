//! 认证服务：注册与登录

use crate::{
    auth::password::PasswordHasher,
    auth::token::TokenService,
    error::AppError,
    models::credential::*,
    repository::credential_repo::CredentialRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

pub struct AuthService {
    db: PgPool,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(db: PgPool, tokens: Arc<TokenService>) -> Self {
        Self { db, tokens }
    }

    /// 注册新凭据
    /// 邮箱已存在时返回 Conflict
    pub async fn register(&self, req: RegisterRequest) -> Result<RegisterResponse, AppError> {
        let repo = CredentialRepository::new(self.db.clone());

        if repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        // 并发注册同一邮箱时由唯一约束兜底，同样映射为 Conflict
        let id = repo
            .insert(&req.email, &password_hash, &req.role, req.ref_id.as_deref())
            .await?;

        tracing::info!(email = %req.email, role = %req.role, "Credential registered");

        Ok(RegisterResponse { id })
    }

    /// 登录并签发访问令牌
    ///
    /// 未知邮箱与密码错误统一返回同一个 InvalidCredentials，
    /// 避免账号枚举。
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let repo = CredentialRepository::new(self.db.clone());

        let credential = repo
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hasher = PasswordHasher::new();
        if !hasher.verify(&req.password, &credential.password_hash) {
            tracing::debug!(email = %req.email, "Password mismatch");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(
            &credential.email,
            &credential.role,
            credential.ref_id.as_deref(),
            chrono::Utc::now(),
        )?;

        tracing::info!(email = %credential.email, "Login succeeded");

        Ok(LoginResponse::bearer(token))
    }
}
