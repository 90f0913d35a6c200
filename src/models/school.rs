//! School domain payload models
//!
//! Each model maps to a document collection (type name lowercased) and
//! validates the shape of create requests. Documents themselves stay
//! schemaless in the store; these types are the write-side contract.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Collection names, one per payload model
pub mod collections {
    pub const ADMIN: &str = "admin";
    pub const TEACHER: &str = "teacher";
    pub const STUDENT: &str = "student";
    pub const CLASSROOM: &str = "classroom";
    pub const ENROLLMENT: &str = "enrollment";
    pub const ANNOUNCEMENT: &str = "announcement";
    pub const CIRCULAR: &str = "circular";
    pub const EVENT: &str = "event";
    pub const EVENT_REGISTRATION: &str = "eventregistration";
    pub const STUDY_MATERIAL: &str = "studymaterial";
    pub const ASSIGNMENT: &str = "assignment";
    pub const SUBMISSION: &str = "submission";
    pub const ATTENDANCE_RECORD: &str = "attendancerecord";
    pub const PERFORMANCE_REVIEW: &str = "performancereview";
}

fn default_audience() -> String {
    "all".to_string()
}

fn default_assignment_type() -> String {
    "homework".to_string()
}

fn default_attendance_status() -> String {
    "present".to_string()
}

// Core identities

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Admin {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Teacher {
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Student {
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub department: Option<String>,
    #[validate(range(min = 1, max = 8))]
    pub year: Option<i32>,
    pub section: Option<String>,
    pub phone: Option<String>,
}

// Academic structure

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Classroom {
    pub name: String,
    pub department: Option<String>,
    #[validate(range(min = 1, max = 8))]
    pub year: Option<i32>,
    pub section: Option<String>,
    /// Class in-charge teacher id
    pub teacher_id: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Enrollment {
    pub class_id: String,
    pub student_id: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

// Communications

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Announcement {
    pub title: String,
    pub body: String,
    /// all | students | teachers | department name | class id
    #[serde(default = "default_audience")]
    pub audience: String,
    pub author_id: Option<String>,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Circular {
    pub title: String,
    pub body: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Event {
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub location: Option<String>,
    #[serde(default = "default_audience")]
    pub audience: String,
    pub host_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventRegistration {
    pub event_id: String,
    pub user_id: String,
    /// student | teacher | admin
    pub role: String,
}

// Learning resources and work

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudyMaterial {
    pub class_id: String,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub uploaded_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Assignment {
    pub class_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    /// homework | test | project | quiz
    #[serde(rename = "type", default = "default_assignment_type")]
    pub kind: String,
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Submission {
    pub assignment_id: String,
    pub student_id: String,
    pub file_url: Option<String>,
    pub text: Option<String>,
    #[validate(range(min = 0.0))]
    pub score: Option<f64>,
    pub graded_by: Option<String>,
}

// Attendance and performance

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttendanceRecord {
    pub class_id: String,
    pub student_id: String,
    pub date: NaiveDate,
    /// present | absent | late | excused
    #[serde(default = "default_attendance_status")]
    pub status: String,
    /// Who marked (student or teacher id)
    pub marked_by: Option<String>,
    #[serde(default)]
    pub approved: bool,
    pub approved_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PerformanceReview {
    pub teacher_id: String,
    pub reviewer_id: String,
    /// e.g. "2024-Q1"
    pub period: String,
    #[validate(range(min = 0.0, max = 5.0))]
    pub score: f64,
    pub feedback: Option<String>,
}
