//! 教师端的 HTTP 处理器
//! 学生与班级管理、资料与作业发布、考勤审批

use crate::{
    error::AppError,
    handlers::to_document,
    middleware::AppState,
    models::school::{collections, Assignment, Classroom, Student, StudyMaterial},
    repository::DocumentRepository,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 学生/班级列表的等值过滤参数
#[derive(Debug, Default, Deserialize)]
pub struct SectionQuery {
    pub department: Option<String>,
    pub year: Option<i32>,
    pub section: Option<String>,
}

impl SectionQuery {
    /// 组装为文档过滤器，全部为空时返回 None
    fn into_filter(self) -> Option<Value> {
        let mut filter = Map::new();

        if let Some(department) = self.department {
            filter.insert("department".to_string(), Value::String(department));
        }
        if let Some(year) = self.year {
            filter.insert("year".to_string(), json!(year));
        }
        if let Some(section) = self.section {
            filter.insert("section".to_string(), Value::String(section));
        }

        if filter.is_empty() {
            None
        } else {
            Some(Value::Object(filter))
        }
    }
}

/// 资料/作业列表的班级过滤参数
#[derive(Debug, Default, Deserialize)]
pub struct ClassQuery {
    pub class_id: Option<String>,
}

impl ClassQuery {
    fn into_filter(self) -> Option<Value> {
        self.class_id.map(|class_id| json!({"class_id": class_id}))
    }
}

/// 新增学生
pub async fn add_student(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Student>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::STUDENT, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出学生（可按系、年级、班别过滤）
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let filter = query.into_filter();
    let docs = repo.list(collections::STUDENT, filter.as_ref()).await?;

    Ok(Json(docs))
}

/// 新增班级
pub async fn add_classroom(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Classroom>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::CLASSROOM, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出班级（可按系、年级、班别过滤）
pub async fn list_classrooms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SectionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let filter = query.into_filter();
    let docs = repo.list(collections::CLASSROOM, filter.as_ref()).await?;

    Ok(Json(docs))
}

/// 发布学习资料
pub async fn add_material(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StudyMaterial>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::STUDY_MATERIAL, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出学习资料（可按班级过滤）
pub async fn list_materials(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClassQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let filter = query.into_filter();
    let docs = repo
        .list(collections::STUDY_MATERIAL, filter.as_ref())
        .await?;

    Ok(Json(docs))
}

/// 发布作业
pub async fn add_assignment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Assignment>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let repo = DocumentRepository::new(state.db.clone());
    let id = repo
        .create(collections::ASSIGNMENT, to_document(&payload)?)
        .await?;

    Ok(Json(json!({"id": id})))
}

/// 列出作业（可按班级过滤）
pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ClassQuery>,
) -> Result<impl IntoResponse, AppError> {
    let repo = DocumentRepository::new(state.db.clone());
    let filter = query.into_filter();
    let docs = repo.list(collections::ASSIGNMENT, filter.as_ref()).await?;

    Ok(Json(docs))
}

/// 考勤审批请求
#[derive(Debug, Deserialize)]
pub struct ApproveAttendanceRequest {
    pub record_id: String,
    pub approved_by: String,
}

/// 审批一条考勤记录
pub async fn approve_attendance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ApproveAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record_id = Uuid::parse_str(&req.record_id)
        .map_err(|_| AppError::BadRequest("Invalid record id".to_string()))?;

    let repo = DocumentRepository::new(state.db.clone());
    let patch = json!({
        "approved": true,
        "approved_by": req.approved_by,
    });

    let matched = repo
        .update_one(collections::ATTENDANCE_RECORD, record_id, patch)
        .await?;

    if matched == 0 {
        return Err(AppError::not_found("Attendance record not found"));
    }

    Ok(Json(json!({"status": "approved", "updated": matched})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_query_empty_filter() {
        let query = SectionQuery::default();
        assert!(query.into_filter().is_none());
    }

    #[test]
    fn test_section_query_partial_filter() {
        let query = SectionQuery {
            department: Some("CS".to_string()),
            year: Some(2),
            section: None,
        };

        let filter = query.into_filter().unwrap();
        assert_eq!(filter["department"], "CS");
        assert_eq!(filter["year"], 2);
        assert!(filter.get("section").is_none());
    }

    #[test]
    fn test_class_query_filter() {
        let query = ClassQuery {
            class_id: Some("c-9".to_string()),
        };
        assert_eq!(query.into_filter().unwrap()["class_id"], "c-9");

        assert!(ClassQuery::default().into_filter().is_none());
    }
}
