//! 元信息处理器
//! 根路径横幅、模型概览与数据库连通性诊断

use crate::{db, middleware::AppState, repository::DocumentRepository};
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// 根路径横幅
pub async fn read_root() -> Json<Value> {
    Json(json!({
        "message": "School/College Management Backend is running"
    }))
}

/// 模型概览
/// 每个负载模型的集合名与字段类型，供数据库查看工具使用
pub async fn get_schema() -> Json<Value> {
    Json(json!({
        "Admin": {
            "collection": "admin",
            "fields": {"name": "string", "email": "string"}
        },
        "Teacher": {
            "collection": "teacher",
            "fields": {
                "name": "string", "email": "string", "department": "string?",
                "phone": "string?", "join_date": "date?"
            }
        },
        "Student": {
            "collection": "student",
            "fields": {
                "name": "string", "email": "string", "roll_number": "string",
                "department": "string?", "year": "integer? (1..=8)",
                "section": "string?", "phone": "string?"
            }
        },
        "Classroom": {
            "collection": "classroom",
            "fields": {
                "name": "string", "department": "string?", "year": "integer? (1..=8)",
                "section": "string?", "teacher_id": "string?"
            }
        },
        "Enrollment": {
            "collection": "enrollment",
            "fields": {"class_id": "string", "student_id": "string", "active": "bool"}
        },
        "Announcement": {
            "collection": "announcement",
            "fields": {
                "title": "string", "body": "string", "audience": "string",
                "author_id": "string?", "pinned": "bool"
            }
        },
        "Circular": {
            "collection": "circular",
            "fields": {
                "title": "string", "body": "string", "audience": "string",
                "author_id": "string?"
            }
        },
        "Event": {
            "collection": "event",
            "fields": {
                "title": "string", "description": "string?", "starts_at": "datetime",
                "ends_at": "datetime", "location": "string?", "audience": "string",
                "host_id": "string?"
            }
        },
        "EventRegistration": {
            "collection": "eventregistration",
            "fields": {"event_id": "string", "user_id": "string", "role": "string"}
        },
        "StudyMaterial": {
            "collection": "studymaterial",
            "fields": {
                "class_id": "string", "title": "string", "description": "string?",
                "file_url": "string?", "uploaded_by": "string"
            }
        },
        "Assignment": {
            "collection": "assignment",
            "fields": {
                "class_id": "string", "title": "string", "description": "string?",
                "due_date": "date?", "type": "string", "created_by": "string"
            }
        },
        "Submission": {
            "collection": "submission",
            "fields": {
                "assignment_id": "string", "student_id": "string", "file_url": "string?",
                "text": "string?", "score": "number? (>= 0)", "graded_by": "string?"
            }
        },
        "AttendanceRecord": {
            "collection": "attendancerecord",
            "fields": {
                "class_id": "string", "student_id": "string", "date": "date",
                "status": "string", "marked_by": "string?", "approved": "bool",
                "approved_by": "string?"
            }
        },
        "PerformanceReview": {
            "collection": "performancereview",
            "fields": {
                "teacher_id": "string", "reviewer_id": "string", "period": "string",
                "score": "number (0..=5)", "feedback": "string?"
            }
        }
    }))
}

/// 数据库连通性诊断
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<Value> {
    match db::health_check(&state.db).await {
        db::HealthStatus::Healthy => {
            let repo = DocumentRepository::new(state.db.clone());
            let collections = repo.list_collections(20).await.unwrap_or_default();

            Json(json!({
                "backend": "running",
                "database": "connected",
                "connection_status": "connected",
                "collections": collections,
            }))
        }
        db::HealthStatus::Unhealthy(reason) => Json(json!({
            "backend": "running",
            "database": "unavailable",
            "connection_status": "not_connected",
            "detail": reason,
            "collections": [],
        })),
    }
}
