//! Credential repository (凭据数据访问)

use crate::{error::AppError, models::credential::Credential};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CredentialRepository {
    db: PgPool,
}

impl CredentialRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 按邮箱查找凭据
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AppError> {
        let credential = sqlx::query_as::<_, Credential>(
            "SELECT * FROM credentials WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(credential)
    }

    /// 插入新凭据
    /// 邮箱唯一约束冲突映射为 Conflict
    pub async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        role: &str,
        ref_id: Option<&str>,
    ) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO credentials (id, email, password_hash, role, ref_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(ref_id)
        .bind(chrono::Utc::now())
        .execute(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::conflict("Email already registered")
            }
            _ => AppError::from(e),
        })?;

        Ok(id)
    }
}
