//! Document repository (通用文档存储)
//!
//! Generic record store over named collections. Documents are stored as
//! JSONB with timestamps stamped into the body on write, so list results
//! round-trip the full document shape without a per-collection schema.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// One stored document row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DocumentRow {
    pub id: Uuid,
    pub collection: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct DocumentRepository {
    db: PgPool,
}

impl DocumentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 插入一个文档，返回新 id
    pub async fn create(&self, collection: &str, mut data: Value) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let Some(map) = data.as_object_mut() else {
            return Err(AppError::BadRequest(
                "Document body must be a JSON object".to_string(),
            ));
        };
        map.insert("created_at".to_string(), serde_json::json!(now));
        map.insert("updated_at".to_string(), serde_json::json!(now));

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(collection)
        .bind(&data)
        .bind(now)
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(id)
    }

    /// 列出集合中的文档
    ///
    /// `filter` 为顶层字段等值过滤（JSONB 包含匹配），None 表示全量。
    /// 返回的每个文档附带字符串形式的 `id` 字段。
    pub async fn list(
        &self,
        collection: &str,
        filter: Option<&Value>,
    ) -> Result<Vec<Value>, AppError> {
        let rows: Vec<DocumentRow> = match filter {
            Some(filter) => {
                sqlx::query_as::<_, DocumentRow>(
                    r#"
                    SELECT * FROM documents
                    WHERE collection = $1 AND data @> $2
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(collection)
                .bind(filter)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT * FROM documents WHERE collection = $1 ORDER BY created_at ASC",
                )
                .bind(collection)
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(serialize_row).collect())
    }

    /// 按 id 更新单个文档（浅合并 patch）
    /// 返回匹配行数：0 表示文档不存在
    pub async fn update_one(
        &self,
        collection: &str,
        id: Uuid,
        mut patch: Value,
    ) -> Result<u64, AppError> {
        let now = Utc::now();

        let Some(map) = patch.as_object_mut() else {
            return Err(AppError::BadRequest(
                "Patch must be a JSON object".to_string(),
            ));
        };
        map.insert("updated_at".to_string(), serde_json::json!(now));

        let result = sqlx::query(
            r#"
            UPDATE documents
            SET data = data || $3, updated_at = $4
            WHERE id = $1 AND collection = $2
            "#,
        )
        .bind(id)
        .bind(collection)
        .bind(&patch)
        .bind(now)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }

    /// 列出当前存在的集合名（用于连通性诊断）
    pub async fn list_collections(&self, limit: i64) -> Result<Vec<String>, AppError> {
        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT collection FROM documents ORDER BY collection LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(names.into_iter().map(|(n,)| n).collect())
    }
}

/// 文档序列化：把行 id 以字符串形式并入文档体
fn serialize_row(row: DocumentRow) -> Value {
    let mut data = row.data;
    if let Some(map) = data.as_object_mut() {
        map.insert("id".to_string(), Value::String(row.id.to_string()));
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_row_surfaces_id() {
        let id = Uuid::new_v4();
        let row = DocumentRow {
            id,
            collection: "teacher".to_string(),
            data: serde_json::json!({"name": "Ada"}),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let doc = serialize_row(row);
        assert_eq!(doc["id"], id.to_string());
        assert_eq!(doc["name"], "Ada");
    }
}
