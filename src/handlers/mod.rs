//! HTTP 处理器模块

pub mod admin;
pub mod audit;
pub mod auth;
pub mod feed;
pub mod health;
pub mod meta;
pub mod metrics;
pub mod student;
pub mod teacher;

use crate::error::AppError;
use serde::Serialize;
use serde_json::Value;

/// 把请求负载转换为文档体
pub(crate) fn to_document<T: Serialize>(payload: &T) -> Result<Value, AppError> {
    serde_json::to_value(payload)
        .map_err(|e| AppError::Internal(format!("Failed to serialize document: {}", e)))
}

/// 读取文档中的 RFC 3339 时间字段，缺失或无法解析时取最小值
pub(crate) fn document_time(doc: &Value, key: &str) -> chrono::DateTime<chrono::Utc> {
    doc.get(key)
        .and_then(Value::as_str)
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&chrono::Utc))
        .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_time_parses_rfc3339() {
        let doc = json!({"starts_at": "2024-06-01T10:00:00Z"});
        let t = document_time(&doc, "starts_at");
        assert_eq!(t.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    }

    #[test]
    fn test_document_time_missing_is_min() {
        let doc = json!({});
        assert_eq!(
            document_time(&doc, "starts_at"),
            chrono::DateTime::<chrono::Utc>::MIN_UTC
        );
    }
}
